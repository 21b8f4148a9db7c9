use async_trait::async_trait;

use crate::{
    models::category::{Category, NewCategory},
    Result,
};

use super::PostgresRepo;

#[async_trait]
pub trait CategoriesRepository: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>>;
    async fn insert_category(&self, category: &NewCategory) -> Result<()>;
    async fn delete_category(&self, category_id: i32) -> Result<()>;
}

#[async_trait]
impl CategoriesRepository for PostgresRepo {
    async fn categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, category FROM categories ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn insert_category(&self, category: &NewCategory) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (category) VALUES ($1)
            "#,
        )
        .bind(&category.category)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_category(&self, category_id: i32) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM categories WHERE id = $1;
            "#,
        )
        .bind(category_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
