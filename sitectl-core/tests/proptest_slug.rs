use proptest::prelude::*;
use sitectl_core::merge::NewsCatalog;
use sitectl_core::models::NewsItem;
use sitectl_core::slug::slugify;

fn titled(title: &str, id: Option<i64>) -> NewsItem {
    NewsItem {
        id,
        title: title.to_string(),
        ..NewsItem::default()
    }
}

proptest! {
    /// Property: output alphabet is [a-z0-9-]
    #[test]
    fn prop_slug_charset(input in ".*") {
        let slug = slugify(&input);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    /// Property: no leading, trailing or doubled hyphens
    #[test]
    fn prop_slug_hyphens(input in ".*") {
        let slug = slugify(&input);
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    /// Property: slugify is idempotent
    #[test]
    fn prop_slug_idempotent(input in ".*") {
        let once = slugify(&input);
        prop_assert_eq!(slugify(&once), once);
    }

    /// Property: every alphanumeric ASCII char survives, lowercased, in order
    #[test]
    fn prop_slug_keeps_alphanumerics(input in "[ -~]{0,64}") {
        let expected: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let kept: String = slugify(&input).chars().filter(|c| *c != '-').collect();
        prop_assert_eq!(kept, expected);
    }

    /// Property: a stored article always shadows a built-in one with the same title
    #[test]
    fn prop_dynamic_wins(title in "[A-Za-z][A-Za-z0-9 ]{0,30}", id in 1i64..1_000_000) {
        let catalog = NewsCatalog::new(vec![titled(&title, Some(id))], vec![titled(&title, None)]);
        let found = catalog.find(&slugify(&title));
        prop_assert_eq!(found.and_then(|n| n.id), Some(id));
    }
}

#[test]
fn stored_article_found_before_builtin() {
    let catalog = NewsCatalog::new(vec![titled("A", Some(1))], vec![titled("A", None)]);
    assert_eq!(catalog.find("a").and_then(|n| n.id), Some(1));
}
