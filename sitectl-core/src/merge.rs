//! News merge resolver
//!
//! Combines store-backed articles with the built-in list into one lookup
//! surface keyed by the slug of each title. Stored articles come first, so a
//! stored article whose title slugs the same as a built-in one shadows it.

use serde::{Deserialize, Serialize};

use crate::models::NewsItem;
use crate::slug::slugify;

/// Site name appended to article page titles
pub const SITE_NAME: &str = "VJC Overseas";

const DEFAULT_TITLE: &str = "Latest Visa & Immigration News | VJC Overseas";
const DEFAULT_DESCRIPTION: &str =
    "Stay updated with global immigration and visa policy changes for Indian aspirants.";
const FALLBACK_SUMMARY: &str = "Get the latest updates on visa changes, migration routes, and PR policies impacting Indian migrants.";

/// Concatenate `dynamic` then `fixed`, keeping each side's order.
pub fn merge_news<D, F>(dynamic: D, fixed: F) -> Vec<NewsItem>
where
    D: IntoIterator<Item = NewsItem>,
    F: IntoIterator<Item = NewsItem>,
{
    dynamic.into_iter().chain(fixed).collect()
}

/// Title and description for an article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

/// Ordered, merged article list.
#[derive(Debug, Clone, Default)]
pub struct NewsCatalog {
    items: Vec<NewsItem>,
}

impl NewsCatalog {
    pub fn new<D, F>(dynamic: D, fixed: F) -> Self
    where
        D: IntoIterator<Item = NewsItem>,
        F: IntoIterator<Item = NewsItem>,
    {
        Self {
            items: merge_news(dynamic, fixed),
        }
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First article whose title slugs to `slug`.
    pub fn find(&self, slug: &str) -> Option<&NewsItem> {
        self.items.iter().find(|item| slugify(&item.title) == slug)
    }

    /// Like [`find`](Self::find) but falls back to the first article.
    pub fn resolve(&self, slug: &str) -> Option<&NewsItem> {
        self.find(slug).or_else(|| self.items.first())
    }

    /// Slug of every article, in catalog order. Duplicates are kept.
    pub fn slugs(&self) -> Vec<String> {
        self.items.iter().map(|item| slugify(&item.title)).collect()
    }

    /// Every article not addressed by `slug`.
    pub fn others(&self, slug: &str) -> Vec<&NewsItem> {
        self.items
            .iter()
            .filter(|item| slugify(&item.title) != slug)
            .collect()
    }

    /// Page metadata for `slug`; site defaults when nothing matches.
    pub fn metadata(&self, slug: &str) -> PageMetadata {
        match self.find(slug) {
            Some(story) => PageMetadata {
                title: format!("{} | {}", story.title, SITE_NAME),
                description: if story.summary.trim().is_empty() {
                    FALLBACK_SUMMARY.to_string()
                } else {
                    story.summary.clone()
                },
            },
            None => PageMetadata {
                title: DEFAULT_TITLE.to_string(),
                description: DEFAULT_DESCRIPTION.to_string(),
            },
        }
    }
}
