//! # Identifier Resolution Module
//!
//! Resolves a free-text recipe key, possibly percent-encoded, against a
//! loaded collection. Lookups are best-effort and never fail: a miss simply
//! returns `None`.

use crate::recipe_model::Recipe;
use crate::slug::slugify;

/// Find a recipe by its stored slug, exact match
pub fn find_by_slug<'a>(recipes: &'a [Recipe], slug: &str) -> Option<&'a Recipe> {
    recipes.iter().find(|recipe| recipe.slug == slug)
}

/// Find a recipe by a free-text identifier
///
/// Case-insensitive first match against, in order of preference per recipe:
/// the stored slug, the percent-decoded slug, the decoded name, or a slug
/// re-derived from the name. Undecodable input falls back to the raw key.
pub fn find_by_identifier<'a>(recipes: &'a [Recipe], identifier: &str) -> Option<&'a Recipe> {
    if identifier.is_empty() {
        return None;
    }
    let normalized = identifier.to_lowercase();
    let decoded = match urlencoding::decode(identifier) {
        Ok(decoded) => decoded.to_lowercase(),
        Err(_) => normalized.clone(),
    };
    recipes.iter().find(|recipe| {
        let slug = recipe.slug.to_lowercase();
        let name = recipe.name.to_lowercase();
        slug == normalized || slug == decoded || name == decoded || slugify(&recipe.name) == normalized
    })
}
