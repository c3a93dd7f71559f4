use serde::{Deserialize, Serialize};

use super::de;
use crate::slug::slugify;

/// News article, either stored or part of the built-in list.
///
/// Built-in items carry neither `id` nor `slug`; lookups always go through
/// [`NewsItem::computed_slug`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase", default)]
pub struct NewsItem {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub summary: String,
    /// URL or `data:` URI
    pub image: String,
    pub tag: String,
    pub time: String,
    pub read_time: String,
    /// HTML body
    pub content: String,
}

impl NewsItem {
    /// Slug derived from the current title.
    pub fn computed_slug(&self) -> String {
        slugify(&self.title)
    }

    /// Stored slug, if any.
    pub fn stored_slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.trim().is_empty())
    }
}
