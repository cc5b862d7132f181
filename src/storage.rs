//! # Recipe Storage Module
//!
//! The persistence collaborator: a store trait over the recipe collection and
//! a JSON-file-backed implementation mirroring the single-document collection
//! the app persists. Records written by older versions are backfilled on load
//! (missing slugs, pre-dough-phase flat ingredient lists) before the core
//! ever sees them.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::recipe_model::{Dough, Ingredient, Recipe};
use crate::slug::slugify;

/// Store interface over the persisted recipe collection
pub trait RecipeStore {
    /// Load every recipe, backfilled to the current shape
    fn load(&self) -> Result<Vec<Recipe>>;

    /// Replace the persisted collection
    fn save(&self, recipes: &[Recipe]) -> Result<()>;

    /// Replace the recipe with a matching id, or prepend it, then persist.
    /// Returns the updated collection.
    fn upsert(&self, recipe: Recipe) -> Result<Vec<Recipe>>;

    /// Delete by id and persist. Returns the updated collection.
    fn delete_by_id(&self, id: &str) -> Result<Vec<Recipe>>;
}

/// Persisted recipe record, tolerating legacy shapes
///
/// Older records carried a flat `ingredients` list and no dough phases; the
/// flattened list is kept here only long enough for backfill to wrap it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecipe {
    #[serde(flatten)]
    recipe: Recipe,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ingredients: Vec<Ingredient>,
}

/// Upgrade one stored record to the current recipe shape
///
/// Returns the recipe and whether anything changed: a missing slug is derived
/// from the name, and absent dough phases are synthesized as one "Main dough"
/// wrapping the legacy flat ingredient list.
fn backfill_record(stored: StoredRecipe) -> (Recipe, bool) {
    let StoredRecipe {
        mut recipe,
        ingredients,
    } = stored;
    let mut changed = false;
    if recipe.slug.trim().is_empty() {
        recipe.slug = slugify(&recipe.name);
        changed = true;
    }
    if recipe.doughs.is_empty() {
        recipe.doughs = vec![Dough {
            id: format!("dough-{}", recipe.id),
            name: "Main dough".to_string(),
            ingredients,
        }];
        changed = true;
    }
    (recipe, changed)
}

/// JSON-file-backed recipe store
///
/// The whole collection lives in one JSON document. Reads are best-effort: a
/// missing file or unreadable content yields an empty collection rather than
/// an error, matching the original storage behavior.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecipeStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Recipe>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Could not read {}: {err}", self.path.display());
                return Ok(Vec::new());
            }
        };
        let stored: Vec<StoredRecipe> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                warn!("Discarding unreadable recipe collection: {err}");
                return Ok(Vec::new());
            }
        };

        let mut changed = false;
        let recipes: Vec<Recipe> = stored
            .into_iter()
            .map(|record| {
                let (recipe, record_changed) = backfill_record(record);
                changed |= record_changed;
                recipe
            })
            .collect();

        // Write backfilled records back so the upgrade happens once
        if changed {
            info!("Backfilled legacy recipe records in {}", self.path.display());
            self.save(&recipes)?;
        }
        Ok(recipes)
    }

    fn save(&self, recipes: &[Recipe]) -> Result<()> {
        let json = serde_json::to_string_pretty(recipes)
            .context("Failed to serialize recipe collection")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn upsert(&self, recipe: Recipe) -> Result<Vec<Recipe>> {
        info!("Upserting recipe '{}'", recipe.name);
        let mut recipes = self.load()?;
        match recipes.iter().position(|item| item.id == recipe.id) {
            Some(index) => recipes[index] = recipe,
            None => recipes.insert(0, recipe),
        }
        self.save(&recipes)?;
        Ok(recipes)
    }

    fn delete_by_id(&self, id: &str) -> Result<Vec<Recipe>> {
        info!("Deleting recipe {id}");
        let mut recipes = self.load()?;
        recipes.retain(|item| item.id != id);
        self.save(&recipes)?;
        Ok(recipes)
    }
}
