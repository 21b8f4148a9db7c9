use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::{
    models::item::{Item, ItemFilter, NewItem},
    Result,
};

use super::PostgresRepo;

const SELECT_ITEMS: &str =
    "SELECT id, title, body, post_date, feature_image, published, price, category FROM items";

#[async_trait]
pub trait ItemsRepository: Send + Sync {
    async fn find_items(&self, filter: &ItemFilter) -> Result<Vec<Item>>;
    async fn insert_item(&self, item: &NewItem) -> Result<()>;
    async fn delete_item(&self, item_id: i32) -> Result<()>;
}

#[async_trait]
impl ItemsRepository for PostgresRepo {
    async fn find_items(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_ITEMS);
        let mut separator = " WHERE ";

        if let Some(id) = filter.id {
            query.push(separator).push("id = ").push_bind(id);
            separator = " AND ";
        }
        if let Some(published) = filter.published {
            query.push(separator).push("published = ").push_bind(published);
            separator = " AND ";
        }
        if let Some(category) = filter.category {
            query.push(separator).push("category = ").push_bind(category);
            separator = " AND ";
        }
        if let Some(min_post_date) = filter.min_post_date {
            query
                .push(separator)
                .push("post_date >= ")
                .push_bind(min_post_date);
        }
        query.push(" ORDER BY id");

        let items = query
            .build_query_as::<Item>()
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn insert_item(&self, item: &NewItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO items (title, body, post_date, feature_image, published, price, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&item.title)
        .bind(&item.body)
        .bind(item.post_date)
        .bind(&item.feature_image)
        .bind(item.published)
        .bind(item.price)
        .bind(item.category)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_item(&self, item_id: i32) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM items WHERE id = $1
            "#,
        )
        .bind(item_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
