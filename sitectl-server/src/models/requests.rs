//! Request bodies and per-kind checks
//!
//! Records arrive as the shared wire models from `sitectl-core`; this module
//! adds the key-only bodies used by DELETE and the checks each kind needs
//! before it reaches the store.

use serde::Deserialize;

use sitectl_core::models::{de, Job, NewsItem, Visa};

use super::validation::{require_text, ValidationError};

/// `{ "id": ... }` body. Numeric strings are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IdKey {
    #[serde(deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
}

impl IdKey {
    pub fn require(&self) -> Result<i64, ValidationError> {
        require_id(self.id)
    }
}

/// Row identifier of an update or delete. Zero is never assigned, so it
/// counts as missing.
pub fn require_id(id: Option<i64>) -> Result<i64, ValidationError> {
    match id {
        None | Some(0) => Err(ValidationError::Missing { field: "id" }),
        Some(id) => Ok(id),
    }
}

/// `{ "slug": ... }` body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlugKey {
    pub slug: Option<String>,
}

impl SlugKey {
    pub fn require(&self) -> Result<&str, ValidationError> {
        match self.slug.as_deref().map(str::trim) {
            None => Err(ValidationError::Missing { field: "slug" }),
            Some("") => Err(ValidationError::Empty { field: "slug" }),
            Some(slug) => Ok(slug),
        }
    }
}

pub fn check_visa(visa: &Visa) -> Result<(), ValidationError> {
    require_text("name", &visa.name)?;
    require_text("slug", &visa.slug)
}

pub fn check_job(job: &Job) -> Result<(), ValidationError> {
    require_text("title", &job.title)?;
    require_text("country", &job.country)
}

/// Validate a new article and return the slug it will be stored under:
/// the one sent, or the slug of its title.
pub fn check_new_article(item: &NewsItem) -> Result<String, ValidationError> {
    require_text("title", &item.title)?;
    require_text("content", &item.content)?;

    let slug = match item.stored_slug() {
        Some(slug) => slug.trim().to_string(),
        None => item.computed_slug(),
    };
    if slug.is_empty() {
        return Err(ValidationError::InvalidFormat {
            field: "title",
            reason: "must contain at least one letter or digit",
        });
    }
    Ok(slug)
}
