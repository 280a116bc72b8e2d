//! Request payloads accepted by the HTTP layer and their validated forms.

use crate::domain::types::{Slug, TypeConstraintError};

pub mod categories;
pub mod comments;
pub mod content;
pub mod newsletter;
pub mod schedule;

/// Derive a slug from free text: ASCII letters and digits are kept and
/// lowercased, every other run of characters becomes a single hyphen.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Use the submitted slug when present, otherwise derive one from `fallback`.
pub(crate) fn slug_or_derived(
    slug: Option<String>,
    fallback: &str,
) -> Result<Slug, TypeConstraintError> {
    match slug {
        Some(slug) if !slug.trim().is_empty() => Slug::new(slug),
        _ => Slug::new(slugify(fallback)),
    }
}
