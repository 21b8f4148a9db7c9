use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query},
    response::Html,
    routing::get,
    Extension, Router,
};
use tracing::warn;

use crate::{
    models::{category::Category, item::Item, query::ShopQuery},
    views::page,
    AppState, Error, Result,
};

pub fn shop_handler() -> Router {
    Router::new().route("/shop", get(shop))
}

async fn shop(
    Extension(app_state): Extension<Arc<AppState>>,
    query: std::result::Result<Query<ShopQuery>, QueryRejection>,
) -> Result<Html<String>> {
    let mut context = page("Shop", "shop");

    let listing = match query {
        Ok(Query(query)) => published_listing(&app_state, query.category).await,
        Err(rejection) => Err(Error::BadRequest(rejection.body_text())),
    };

    match listing {
        Ok((items, categories)) => {
            context.insert("items", &items);
            context.insert("categories", &categories);
        }
        Err(err) => {
            warn!(error = %err, "shop listing unavailable");
            context.insert("items", &Vec::<Item>::new());
            context.insert("categories", &Vec::<Category>::new());
            context.insert("message", "No items found");
        }
    }

    app_state.views.render("shop.html", &context)
}

async fn published_listing(
    app_state: &AppState,
    category: Option<i32>,
) -> Result<(Vec<Item>, Vec<Category>)> {
    let service = &app_state.store_service;
    let items = match category {
        Some(category) => service.get_published_items_by_category(category).await?,
        None => service.get_published_items().await?,
    };
    let categories = service.get_categories().await?;
    Ok((items, categories))
}
