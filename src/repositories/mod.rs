use async_trait::async_trait;
use sqlx::PgPool;

use crate::Result;

use self::{categories_repo::CategoriesRepository, items_repo::ItemsRepository};

pub mod categories_repo;
pub mod items_repo;
#[cfg(test)]
pub mod memory;

const CREATE_CATEGORIES: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        category VARCHAR(255)
    )
"#;

const CREATE_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255),
        body TEXT,
        post_date TIMESTAMPTZ NOT NULL,
        feature_image VARCHAR(255),
        published BOOLEAN NOT NULL DEFAULT FALSE,
        price DOUBLE PRECISION,
        category INTEGER REFERENCES categories (id) ON DELETE SET NULL
    )
"#;

#[async_trait]
pub trait SchemaRepository: Send + Sync {
    /// Creates the tables if they are missing. No migration versioning.
    async fn sync_schema(&self) -> Result<()>;
}

/// Everything the store service needs from persistence.
pub trait StoreRepository: SchemaRepository + ItemsRepository + CategoriesRepository {}

impl<T> StoreRepository for T where T: SchemaRepository + ItemsRepository + CategoriesRepository {}

#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaRepository for PostgresRepo {
    async fn sync_schema(&self) -> Result<()> {
        // categories first, items references it
        sqlx::query(CREATE_CATEGORIES).execute(&self.pool).await?;
        sqlx::query(CREATE_ITEMS).execute(&self.pool).await?;
        Ok(())
    }
}
