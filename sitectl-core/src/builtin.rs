//! News articles compiled into the binary.

use crate::error::{CoreError, Result};
use crate::models::NewsItem;

const BUILTIN_NEWS: &str = include_str!("../data/static_news.json");

/// Parse the built-in article list, preserving file order.
pub fn builtin_news() -> Result<Vec<NewsItem>> {
    serde_json::from_str(BUILTIN_NEWS).map_err(|e| CoreError::json("builtin news", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_news_parses() {
        let items = builtin_news().unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|n| n.id.is_none()));
        assert!(items.iter().all(|n| !n.computed_slug().is_empty()));
    }
}
