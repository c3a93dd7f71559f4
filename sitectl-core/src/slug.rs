//! URL slugs for titles

use serde_json::Value;

/// Turn a title into a URL-safe identifier.
///
/// ASCII letters and digits are kept (lowercased); every run of anything else
/// becomes a single `-`. The result never starts or ends with a hyphen.
/// Non-ASCII characters are separators even when their lowercase form is
/// ASCII (`İ`, the Kelvin sign `K`).
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug for an arbitrary JSON value; anything but a string yields `""`.
pub fn slugify_value(value: &Value) -> String {
    match value {
        Value::String(s) => slugify(s),
        _ => String::new(),
    }
}

/// True when `candidate` is already in canonical slug form.
pub fn is_slug(candidate: &str) -> bool {
    !candidate.is_empty() && slugify(candidate) == candidate
}
