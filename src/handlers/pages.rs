use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Extension, Router,
};

use crate::{views::page, AppState, Result};

pub fn pages_handler() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
}

async fn index() -> Redirect {
    Redirect::to("/about")
}

async fn about(Extension(app_state): Extension<Arc<AppState>>) -> Result<Html<String>> {
    app_state
        .views
        .render("about.html", &page("About Us", "about"))
}

pub async fn not_found(Extension(app_state): Extension<Arc<AppState>>) -> Result<Response> {
    not_found_page(&app_state, None)
}

pub fn not_found_page(app_state: &AppState, message: Option<&str>) -> Result<Response> {
    let mut context = page("Page Not Found", "");
    if let Some(message) = message {
        context.insert("message", message);
    }
    let html = app_state.views.render("404.html", &context)?;
    Ok((StatusCode::NOT_FOUND, html).into_response())
}

/// Ids come from the path as text; anything that is not a number names no page.
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}
