use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShopQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<i32>,
}

/// `?category=` submitted by an empty select box means "no filter".
fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}
