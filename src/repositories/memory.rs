//! In-memory stand-in for Postgres used by unit tests.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;

use crate::{
    models::{
        category::{Category, NewCategory},
        item::{Item, ItemFilter, NewItem},
    },
    Error, Result,
};

use super::{categories_repo::CategoriesRepository, items_repo::ItemsRepository, SchemaRepository};

#[derive(Default)]
struct Tables {
    items: Vec<Item>,
    categories: Vec<Category>,
    next_item_id: i32,
    next_category_id: i32,
}

#[derive(Default)]
pub struct MemoryRepo {
    tables: Mutex<Tables>,
    unreachable: AtomicBool,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the database could not be reached.
    pub fn unreachable() -> Self {
        let repo = Self::default();
        repo.unreachable.store(true, Ordering::SeqCst);
        repo
    }

    pub fn items(&self) -> Vec<Item> {
        self.tables.lock().unwrap().items.clone()
    }

    fn check(&self) -> Result<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(Error::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl SchemaRepository for MemoryRepo {
    async fn sync_schema(&self) -> Result<()> {
        self.check()
    }
}

#[async_trait]
impl ItemsRepository for MemoryRepo {
    async fn find_items(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn insert_item(&self, item: &NewItem) -> Result<()> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.next_item_id += 1;
        let id = tables.next_item_id;
        tables.items.push(Item {
            id,
            title: item.title.clone(),
            body: item.body.clone(),
            post_date: item.post_date,
            feature_image: item.feature_image.clone(),
            published: item.published,
            price: item.price,
            category: item.category,
        });
        Ok(())
    }

    async fn delete_item(&self, item_id: i32) -> Result<()> {
        self.check()?;
        self.tables
            .lock()
            .unwrap()
            .items
            .retain(|item| item.id != item_id);
        Ok(())
    }
}

#[async_trait]
impl CategoriesRepository for MemoryRepo {
    async fn categories(&self) -> Result<Vec<Category>> {
        self.check()?;
        Ok(self.tables.lock().unwrap().categories.clone())
    }

    async fn insert_category(&self, category: &NewCategory) -> Result<()> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.next_category_id += 1;
        let id = tables.next_category_id;
        tables.categories.push(Category {
            id,
            category: category.category.clone(),
        });
        Ok(())
    }

    async fn delete_category(&self, category_id: i32) -> Result<()> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.categories.retain(|c| c.id != category_id);
        // ON DELETE SET NULL
        for item in tables.items.iter_mut() {
            if item.category == Some(category_id) {
                item.category = None;
            }
        }
        Ok(())
    }
}
