use std::sync::Arc;

use axum::{handler::HandlerWithoutStateExt, Extension, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{
        categories::categories_handler,
        items::items_handler,
        pages::{not_found, pages_handler},
        shop::shop_handler,
    },
    AppState,
};

/// Paths no route claims are looked up in the static directory, then 404.
/// A method no route or file answers to is a 404 as well, never a 405.
pub fn create_routes(app_state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&app_state.config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .merge(pages_handler())
        .merge(shop_handler())
        .merge(items_handler(app_state.config.max_upload_bytes))
        .merge(categories_handler())
        .fallback_service(static_files)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
