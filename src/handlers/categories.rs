use std::sync::Arc;

use axum::{
    extract::Path,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Extension, Form, Router,
};
use tracing::{error, warn};

use crate::{
    handlers::pages::{not_found_page, parse_id},
    models::category::AddCategoryForm,
    views::page,
    AppState, Error, Result,
};

pub fn categories_handler() -> Router {
    Router::new()
        .route("/categories", get(categories))
        .route("/categories/add", get(add_category_form).post(add_category))
        .route("/categories/delete/{id}", get(delete_category))
}

async fn categories(Extension(app_state): Extension<Arc<AppState>>) -> Result<Html<String>> {
    let mut context = page("Categories", "categories");
    let categories = app_state
        .store_service
        .get_categories()
        .await
        .unwrap_or_else(|err| {
            warn!(error = %err, "category listing unavailable");
            Vec::new()
        });
    context.insert("categories", &categories);

    app_state.views.render("categories.html", &context)
}

async fn add_category_form(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<Html<String>> {
    app_state
        .views
        .render("add_category.html", &page("Add Category", "categories"))
}

async fn add_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Form(category): Form<AddCategoryForm>,
) -> Result<Redirect> {
    app_state
        .store_service
        .add_category(category)
        .await
        .map_err(|err| {
            error!(error = %err, "Error adding category");
            Error::Mutation("Unable to add category")
        })?;

    Ok(Redirect::to("/categories"))
}

async fn delete_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Response> {
    let Some(category_id) = parse_id(&category_id) else {
        return not_found_page(&app_state, Some("Category not found"));
    };

    app_state
        .store_service
        .delete_category_by_id(category_id)
        .await
        .map_err(|err| {
            error!(error = %err, category_id, "Error removing category");
            Error::Mutation("Unable to remove category")
        })?;

    Ok(Redirect::to("/categories").into_response())
}
