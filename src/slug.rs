//! # Slug Module
//!
//! Slug derivation for recipe URLs and generation of stable entity ids.

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex =
        Regex::new("[^a-z0-9]+").expect("Slug pattern should be valid");
}

/// Derive a URL-safe slug from a display name
///
/// Lowercases, trims, collapses every run of non-alphanumeric characters into
/// a single dash, and strips leading/trailing dashes.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let collapsed = NON_ALPHANUMERIC.replace_all(lowered.trim(), "-");
    collapsed.trim_matches('-').to_string()
}

/// Generate a fresh stable id for a recipe, dough, starter, ingredient, or step
pub fn make_id() -> String {
    Uuid::new_v4().to_string()
}
