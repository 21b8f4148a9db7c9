//! Fixtures for driving the router in-process.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;

use crate::{
    config::Config,
    repositories::memory::MemoryRepo,
    routes::create_routes,
    services::store::StoreService,
    uploads::{ImageHost, ImageUpload},
    views::Views,
    AppState, Error, Result,
};

pub const BOUNDARY: &str = "storefront-test-boundary";

#[derive(Default)]
pub struct FakeImageHost {
    uploads: Mutex<Vec<ImageUpload>>,
    down: bool,
}

impl FakeImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.file_name.clone())
            .collect()
    }
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(&self, image: ImageUpload) -> Result<String> {
        if self.down {
            return Err(Error::Upload("image host unavailable".to_string()));
        }
        let url = format!("https://images.test/{}", image.file_name);
        self.uploads.lock().unwrap().push(image);
        Ok(url)
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/storefront_test".to_string(),
        port: 0,
        max_connections: 1,
        static_dir: "target/no-static-files".to_string(),
        max_upload_bytes: 1024 * 1024,
        cloudinary: None,
    }
}

pub fn app(repo: Arc<MemoryRepo>, image_host: Arc<FakeImageHost>) -> Router {
    let app_state = AppState {
        config: test_config(),
        store_service: StoreService::new(repo),
        image_host,
        views: Views::new().unwrap(),
    };
    create_routes(Arc::new(app_state))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A `multipart/form-data` POST with text fields and an optional `featureImage` file.
pub fn multipart_post(uri: &str, fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"featureImage\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
