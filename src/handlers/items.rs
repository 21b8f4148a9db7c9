use std::sync::Arc;

use axum::{
    extract::{
        rejection::QueryRejection, DefaultBodyLimit, FromRequest, Multipart, Path, Query, Request,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Extension, Form, Router,
};
use tracing::{error, warn};

use crate::{
    handlers::pages::{not_found_page, parse_id},
    models::{
        category::Category,
        item::{AddItemForm, Item},
        query::ItemsQuery,
    },
    uploads::ImageUpload,
    views::page,
    AppState, Error, Result,
};

pub fn items_handler(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/items", get(items))
        .route(
            "/items/add",
            get(add_item_form)
                .post(add_item)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/items/delete/{id}", get(delete_item))
        .route("/item/{id}", get(item))
}

async fn items(
    Extension(app_state): Extension<Arc<AppState>>,
    query: std::result::Result<Query<ItemsQuery>, QueryRejection>,
) -> Result<Response> {
    let mut context = page("Items", "items");
    let mut status = StatusCode::OK;

    let listing = match query {
        Ok(Query(query)) => listing(&app_state, query).await,
        Err(rejection) => Err(Error::BadRequest(rejection.body_text())),
    };

    match listing {
        Ok((items, categories)) => {
            context.insert("items", &items);
            context.insert("categories", &categories);
        }
        Err(err) => {
            warn!(error = %err, "item listing unavailable");
            context.insert("items", &Vec::<Item>::new());
            context.insert("categories", &Vec::<Category>::new());
            match err {
                Error::BadRequest(reason) => {
                    status = StatusCode::BAD_REQUEST;
                    context.insert("message", &reason);
                }
                _ => context.insert("message", "No items found"),
            }
        }
    }

    let html = app_state.views.render("items.html", &context)?;
    Ok((status, html).into_response())
}

/// Category wins over the minimum date when both are given.
async fn listing(app_state: &AppState, query: ItemsQuery) -> Result<(Vec<Item>, Vec<Category>)> {
    let service = &app_state.store_service;
    let items = match (query.category, query.min_date) {
        (Some(category), _) => service.get_items_by_category(category).await?,
        (None, Some(min_date)) => service.get_items_by_min_date(&min_date).await?,
        (None, None) => service.get_all_items().await?,
    };
    let categories = service.get_categories().await?;
    Ok((items, categories))
}

async fn item(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(item_id): Path<String>,
) -> Result<Response> {
    let service = &app_state.store_service;
    let Some(item_id) = parse_id(&item_id) else {
        return not_found_page(&app_state, Some("Item not found"));
    };

    let item = match service.get_item_by_id(item_id).await {
        Ok(Some(item)) => item,
        Ok(None) => return not_found_page(&app_state, Some("Item not found")),
        Err(err) => {
            warn!(error = %err, item_id, "item lookup failed");
            return not_found_page(&app_state, Some("Item not found"));
        }
    };

    let category = match item.category {
        Some(category_id) => service
            .get_categories()
            .await
            .unwrap_or_default()
            .into_iter()
            .find(|c| c.id == category_id),
        None => None,
    };

    let title = item.title.clone().unwrap_or_else(|| "Item".to_string());
    let mut context = page(&title, "items");
    context.insert("item", &item);
    context.insert("category", &category);

    Ok(app_state.views.render("item.html", &context)?.into_response())
}

async fn add_item_form(Extension(app_state): Extension<Arc<AppState>>) -> Result<Html<String>> {
    let mut context = page("Add Item", "add");
    let categories = app_state
        .store_service
        .get_categories()
        .await
        .unwrap_or_else(|err| {
            warn!(error = %err, "categories unavailable for the add-item form");
            Vec::new()
        });
    context.insert("categories", &categories);

    app_state.views.render("add_item.html", &context)
}

async fn add_item(
    Extension(app_state): Extension<Arc<AppState>>,
    request: Request,
) -> Result<Redirect> {
    save_item(&app_state, request).await.map_err(|err| {
        error!(error = %err, "Error adding item");
        Error::Mutation("Unable to add item")
    })?;

    Ok(Redirect::to("/items"))
}

/// The form arrives as multipart when it carries a file and urlencoded
/// otherwise. The upload, when there is one, finishes before the insert starts.
async fn save_item(app_state: &AppState, request: Request) -> Result<()> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let (mut form, image) = if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
        read_item_form(multipart).await?
    } else {
        let Form(form) = Form::<AddItemForm>::from_request(request, &())
            .await
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
        (form, None)
    };

    form.feature_image = match image {
        Some(image) => app_state.image_host.upload(image).await?,
        None => String::new(),
    };

    app_state.store_service.add_item(form).await
}

async fn read_item_form(mut multipart: Multipart) -> Result<(AddItemForm, Option<ImageUpload>)> {
    let mut form = AddItemForm::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "featureImage" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::BadRequest(e.body_text()))?;
            // browsers send an empty part when no file was picked
            if !file_name.is_empty() && !bytes.is_empty() {
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| Error::BadRequest(e.body_text()))?;
        match name.as_str() {
            "title" => form.title = value,
            "body" => form.body = value,
            "price" => form.price = value,
            "category" => form.category = value,
            "published" => form.published = Some(value),
            _ => {}
        }
    }

    Ok((form, image))
}

async fn delete_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(item_id): Path<String>,
) -> Result<Response> {
    let Some(item_id) = parse_id(&item_id) else {
        return not_found_page(&app_state, Some("Item not found"));
    };

    app_state
        .store_service
        .delete_post_by_id(item_id)
        .await
        .map_err(|err| {
            error!(error = %err, item_id, "Error removing item");
            Error::Mutation("Unable to remove item")
        })?;

    Ok(Redirect::to("/items").into_response())
}
