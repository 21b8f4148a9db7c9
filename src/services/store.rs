use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::{
    models::{
        category::{AddCategoryForm, Category, NewCategory},
        item::{AddItemForm, Item, ItemFilter, NewItem},
    },
    repositories::StoreRepository,
    Error, Result,
};

const NO_RESULTS: &str = "no results returned";
const SYNC_FAILED: &str = "unable to sync the database";
const CREATE_POST_FAILED: &str = "unable to create post";
const CREATE_CATEGORY_FAILED: &str = "unable to create category";
const DELETE_CATEGORY_FAILED: &str = "unable to delete category";
const DELETE_POST_FAILED: &str = "unable to delete post";

/// Sole entry point to persisted items and categories.
///
/// Repository failures never cross this boundary as-is: they collapse into
/// an [`Error::Store`] carrying an opaque reason.
#[derive(Clone)]
pub struct StoreService {
    repo: Arc<dyn StoreRepository>,
}

impl StoreService {
    pub fn new(repo: Arc<dyn StoreRepository>) -> Self {
        Self { repo }
    }

    pub async fn initialize(&self) -> Result<()> {
        self.repo
            .sync_schema()
            .await
            .map_err(|_| Error::Store(SYNC_FAILED))
    }

    pub async fn get_all_items(&self) -> Result<Vec<Item>> {
        self.find(ItemFilter::all()).await
    }

    pub async fn get_published_items(&self) -> Result<Vec<Item>> {
        self.find(ItemFilter::published()).await
    }

    pub async fn get_items_by_category(&self, category_id: i32) -> Result<Vec<Item>> {
        self.find(ItemFilter::all().with_category(category_id)).await
    }

    pub async fn get_published_items_by_category(&self, category_id: i32) -> Result<Vec<Item>> {
        self.find(ItemFilter::published().with_category(category_id))
            .await
    }

    /// Rejects an unparseable date before touching the store.
    pub async fn get_items_by_min_date(&self, min_date: &str) -> Result<Vec<Item>> {
        let min_date = parse_min_date(min_date)?;
        self.find(ItemFilter::all().posted_since(min_date)).await
    }

    pub async fn get_item_by_id(&self, item_id: i32) -> Result<Option<Item>> {
        let items = self.find(ItemFilter::by_id(item_id)).await?;
        Ok(items.into_iter().next())
    }

    pub async fn add_item(&self, form: AddItemForm) -> Result<()> {
        let item = normalize_item(form, Utc::now()).map_err(|reason| {
            warn!(%reason, "rejecting item");
            Error::Store(CREATE_POST_FAILED)
        })?;

        self.repo
            .insert_item(&item)
            .await
            .map_err(|_| Error::Store(CREATE_POST_FAILED))?;

        info!(title = ?item.title, published = item.published, "item added");
        Ok(())
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        self.repo
            .categories()
            .await
            .map_err(|_| Error::Store(NO_RESULTS))
    }

    pub async fn add_category(&self, form: AddCategoryForm) -> Result<()> {
        let category = NewCategory {
            category: non_empty(form.category),
        };

        self.repo
            .insert_category(&category)
            .await
            .map_err(|_| Error::Store(CREATE_CATEGORY_FAILED))?;

        info!(category = ?category.category, "category added");
        Ok(())
    }

    pub async fn delete_category_by_id(&self, category_id: i32) -> Result<()> {
        self.repo
            .delete_category(category_id)
            .await
            .map_err(|_| Error::Store(DELETE_CATEGORY_FAILED))?;

        info!(category_id, "category deleted");
        Ok(())
    }

    pub async fn delete_post_by_id(&self, item_id: i32) -> Result<()> {
        self.repo
            .delete_item(item_id)
            .await
            .map_err(|_| Error::Store(DELETE_POST_FAILED))?;

        info!(item_id, "item deleted");
        Ok(())
    }

    async fn find(&self, filter: ItemFilter) -> Result<Vec<Item>> {
        self.repo
            .find_items(&filter)
            .await
            .map_err(|_| Error::Store(NO_RESULTS))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_field<T: std::str::FromStr>(name: &str, value: String) -> std::result::Result<Option<T>, String> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("{name} is not a number: {raw:?}")),
    }
}

/// Empty strings become NULL, `published` follows checkbox truthiness and
/// `post_date` is always the server's clock.
fn normalize_item(form: AddItemForm, now: DateTime<Utc>) -> std::result::Result<NewItem, String> {
    Ok(NewItem {
        title: non_empty(form.title),
        body: non_empty(form.body),
        post_date: now,
        feature_image: non_empty(form.feature_image),
        published: form.published.is_some_and(|p| !p.is_empty()),
        price: parse_field("price", form.price)?,
        category: parse_field("category", form.category)?,
    })
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_min_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| Error::BadRequest(format!("invalid minimum date: {raw:?}")))
}
