use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i32,
    pub title: Option<String>,
    pub body: Option<String>,
    pub post_date: DateTime<Utc>,
    pub feature_image: Option<String>,
    pub published: bool,
    pub price: Option<f64>,
    pub category: Option<i32>,
}

/// Raw add-item form as submitted, every field still text.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddItemForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    pub published: Option<String>,
    #[serde(default)]
    pub feature_image: String,
}

/// A normalized item ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub title: Option<String>,
    pub body: Option<String>,
    pub post_date: DateTime<Utc>,
    pub feature_image: Option<String>,
    pub published: bool,
    pub price: Option<f64>,
    pub category: Option<i32>,
}

/// Conditions combined with AND when selecting items. `Default` selects everything.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ItemFilter {
    pub id: Option<i32>,
    pub published: Option<bool>,
    pub category: Option<i32>,
    pub min_post_date: Option<DateTime<Utc>>,
}

impl ItemFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn published() -> Self {
        Self {
            published: Some(true),
            ..Self::default()
        }
    }

    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: i32) -> Self {
        self.category = Some(category);
        self
    }

    pub fn posted_since(mut self, date: DateTime<Utc>) -> Self {
        self.min_post_date = Some(date);
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.id.map_or(true, |id| item.id == id)
            && self.published.map_or(true, |p| item.published == p)
            && self.category.map_or(true, |c| item.category == Some(c))
            && self.min_post_date.map_or(true, |d| item.post_date >= d)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn item(published: bool, category: Option<i32>) -> Item {
        Item {
            id: 7,
            title: Some("Lamp".to_string()),
            body: None,
            post_date: Utc.with_ymd_and_hms(2025, 3, 22, 12, 0, 0).unwrap(),
            feature_image: None,
            published,
            price: Some(19.5),
            category,
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        assert!(ItemFilter::all().matches(&item(false, None)));
        assert!(ItemFilter::all().matches(&item(true, Some(2))));
    }

    #[test]
    fn published_and_category_are_combined() {
        let filter = ItemFilter::published().with_category(2);
        assert!(filter.matches(&item(true, Some(2))));
        assert!(!filter.matches(&item(false, Some(2))));
        assert!(!filter.matches(&item(true, Some(3))));
        assert!(!filter.matches(&item(true, None)));
    }

    #[test]
    fn min_post_date_is_inclusive() {
        let it = item(true, None);
        assert!(ItemFilter::all().posted_since(it.post_date).matches(&it));
        assert!(!ItemFilter::all()
            .posted_since(it.post_date + Duration::seconds(1))
            .matches(&it));
    }
}
