use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error};

use crate::{config::CloudinaryConfig, Error, Result};

const CLOUDINARY_API: &str = "https://api.cloudinary.com/v1_1";

/// A file taken from the add-item form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Third-party image hosting. Takes the bytes, hands back a public URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<String>;
}

#[derive(Clone)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    config: Option<CloudinaryConfig>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

impl CloudinaryUploader {
    pub fn new(config: Option<CloudinaryConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, cloud_name: &str) -> String {
        format!("{CLOUDINARY_API}/{cloud_name}/image/upload")
    }
}

/// Signed-upload signature: SHA-256 over the sorted parameters followed by the secret.
fn sign(timestamp: i64, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("timestamp={timestamp}{api_secret}"));
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageHost for CloudinaryUploader {
    async fn upload(&self, image: ImageUpload) -> Result<String> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| Error::Upload("image hosting is not configured".to_string()))?;

        let timestamp = Utc::now().timestamp();
        let mut file = Part::bytes(image.bytes.to_vec()).file_name(image.file_name);
        if let Some(content_type) = image.content_type {
            file = file
                .mime_str(&content_type)
                .map_err(|e| Error::Upload(e.to_string()))?;
        }

        let form = Form::new()
            .part("file", file)
            .text("api_key", config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature_algorithm", "sha256")
            .text("signature", sign(timestamp, &config.api_secret));

        let response = self
            .client
            .post(self.endpoint(&config.cloud_name))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "image host unreachable");
                Error::Upload(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "image host rejected the upload");
            return Err(Error::Upload(format!("image host answered {status}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::Upload(e.to_string()))?;
        debug!(url = %uploaded.url, "image uploaded");
        Ok(uploaded.url)
    }
}
