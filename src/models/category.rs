use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct AddCategoryForm {
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub category: Option<String>,
}
