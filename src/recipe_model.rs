//! # Recipe Data Model
//!
//! This module defines the data structures for festive-dough recipes:
//! ingredients with per-piece quantities, dough phases, alternative starters,
//! procedure steps, and the recipe aggregate that ties them together.
//!
//! ## Core Concepts
//!
//! - **Ingredient**: a named quantity calibrated per piece at the recipe's
//!   baseline dough weight
//! - **Dough**: one phase of the main dough (first dough, second dough, ...)
//! - **Starter**: an alternative leavening option; at most one participates in
//!   a scaling computation
//! - **RecipeStep**: a procedure step referencing ingredients by id
//!
//! ## Usage
//!
//! ```rust
//! use lievitati::recipe_model::{Ingredient, IngredientGroup};
//! use lievitati::units::IngredientUnit;
//!
//! let flour = Ingredient::new("Flour")
//!     .with_qty(500.0)
//!     .with_group(IngredientGroup::Flour);
//!
//! let eggs = Ingredient::new("Egg yolks")
//!     .with_qty(6.0)
//!     .with_unit(IngredientUnit::Count)
//!     .with_unit_weight(18.0);
//! assert_eq!(eggs.grams_per_piece(), Some(108.0));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::molds::MoldSelection;
use crate::slug::{make_id, slugify};
use crate::units::{format_number, IngredientUnit};

/// Functional grouping of an ingredient, used for baker's-percentage math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientGroup {
    /// Pre-ferment contributions
    Starter,
    /// Flours; the baker's-percentage denominator
    Flour,
    /// Water, milk, and other liquids
    Liquid,
    /// Whole eggs and yolks
    Eggs,
    /// Butter and other fats
    Fat,
    /// Sugars and honey
    Sugar,
    /// Salt
    Salt,
    /// Vanilla, citrus, candied fruit, and other aromatics
    Aromatic,
    /// Everything else
    Other,
}

impl Default for IngredientGroup {
    fn default() -> Self {
        IngredientGroup::Flour
    }
}

impl IngredientGroup {
    /// All groups in the order they are offered to the editing surface
    pub fn all() -> [IngredientGroup; 9] {
        [
            IngredientGroup::Starter,
            IngredientGroup::Flour,
            IngredientGroup::Liquid,
            IngredientGroup::Eggs,
            IngredientGroup::Fat,
            IngredientGroup::Sugar,
            IngredientGroup::Salt,
            IngredientGroup::Aromatic,
            IngredientGroup::Other,
        ]
    }
}

/// Product category of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeCategory {
    Panettone,
    Pandoro,
    #[serde(rename = "Panettone Gastronomico")]
    PanettoneGastronomico,
    Colomba,
    Other,
}

impl Default for RecipeCategory {
    fn default() -> Self {
        RecipeCategory::Panettone
    }
}

/// A single ingredient with its per-piece, unscaled quantity
///
/// `qty_g` is gram-denominated for every unit except [`IngredientUnit::Count`],
/// where it holds a per-piece count and `qty_weight_g` optionally holds
/// grams per counted unit. Identity is `id`; aggregation identity for totals
/// is the case-folded, trimmed `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Stable id, preserved across edits and dough restructuring
    pub id: String,

    /// Display name; blank names are dropped at save time
    pub name: String,

    /// Per-piece quantity: grams, or a count for the count unit
    pub qty_g: f64,

    /// Measurement unit
    #[serde(default)]
    pub unit: IngredientUnit,

    /// Functional group
    #[serde(default)]
    pub group: IngredientGroup,

    /// Grams per counted unit; only meaningful for the count unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_weight_g: Option<f64>,

    /// Optional free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Ingredient {
    /// Create a new gram-denominated ingredient with a zero quantity
    pub fn new(name: &str) -> Self {
        Self {
            id: make_id(),
            name: name.to_string(),
            qty_g: 0.0,
            unit: IngredientUnit::Grams,
            group: IngredientGroup::Flour,
            qty_weight_g: None,
            notes: None,
        }
    }

    /// Set the per-piece quantity
    pub fn with_qty(mut self, qty: f64) -> Self {
        self.qty_g = qty;
        self
    }

    /// Set the measurement unit
    pub fn with_unit(mut self, unit: IngredientUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the functional group
    pub fn with_group(mut self, group: IngredientGroup) -> Self {
        self.group = group;
        self
    }

    /// Set the grams-per-unit weight used to resolve count-unit grams
    pub fn with_unit_weight(mut self, grams: f64) -> Self {
        self.qty_weight_g = Some(grams);
        self
    }

    /// Attach a note
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Resolve the gram equivalent of an arbitrary quantity of this ingredient
    ///
    /// For weight units the quantity already is the gram figure. For the count
    /// unit the weight-per-unit must be known and positive; otherwise the
    /// gram figure is undefined and `None` is returned.
    pub fn grams_for(&self, qty: f64) -> Option<f64> {
        if self.unit.is_count() {
            match self.qty_weight_g {
                Some(weight) if weight > 0.0 => Some(qty * weight),
                _ => None,
            }
        } else {
            Some(qty)
        }
    }

    /// Gram equivalent of the stored per-piece quantity, when resolvable
    pub fn grams_per_piece(&self) -> Option<f64> {
        self.grams_for(self.qty_g)
    }

    /// Check whether the name is non-blank after trimming
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Aggregation key: the case-folded, trimmed name
    pub fn merge_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_number(self.qty_g, self.unit.display_digits()),
            self.unit.display_name(),
            self.name
        )
    }
}

/// One phase of the main dough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dough {
    /// Stable id
    pub id: String,
    /// Phase name ("First dough", "Second dough", ...)
    pub name: String,
    /// Ingredients of this phase
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Dough {
    /// Create a dough phase seeded with one blank ingredient row
    pub fn new(name: &str) -> Self {
        Self {
            id: make_id(),
            name: name.to_string(),
            ingredients: vec![Ingredient::new("")],
        }
    }

    /// Create a dough phase wrapping an existing ingredient list
    pub fn with_ingredients(name: &str, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: make_id(),
            name: name.to_string(),
            ingredients,
        }
    }
}

/// An alternative leavening option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starter {
    /// Stable id
    pub id: String,
    /// Display name ("Lievito madre", "Poolish", ...)
    pub name: String,
    /// Build notes, refresh schedule, timings
    #[serde(default)]
    pub description: String,
    /// Ingredients of this starter
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Starter {
    /// Create a starter seeded with one blank ingredient row
    pub fn new(name: &str) -> Self {
        Self {
            id: make_id(),
            name: name.to_string(),
            description: String::new(),
            ingredients: vec![Ingredient::new("")],
        }
    }
}

/// A procedure step, referencing ingredients by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    /// Stable id
    pub id: String,
    /// What to do; steps with a blank title are dropped at save time
    pub title: String,
    /// Optional phase label ("First dough", "Proof", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<f64>,
    /// Temperature in degrees Celsius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_c: Option<f64>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Ids of the ingredients this step uses; pruned when owners are removed
    #[serde(default)]
    pub ingredient_ids: Vec<String>,
}

impl RecipeStep {
    /// Create a blank step
    pub fn new() -> Self {
        Self {
            id: make_id(),
            title: String::new(),
            phase: Some(String::new()),
            duration_min: None,
            temp_c: None,
            notes: None,
            ingredient_ids: Vec::new(),
        }
    }
}

impl Default for RecipeStep {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete recipe: dough phases, starters, steps, and the baseline scale
///
/// `pieces` and `dough_per_piece_g` define the baseline (scale factor 1.0);
/// every ingredient `qty_g` is calibrated against this baseline, never against
/// a transient view-time scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Stable id
    pub id: String,
    /// Display name
    pub name: String,
    /// URL slug, derived from the name at save time
    #[serde(default)]
    pub slug: String,
    /// Product category
    #[serde(default)]
    pub category: RecipeCategory,
    /// Baseline piece count, at least 1
    pub pieces: u32,
    /// Baseline dough weight per piece in grams, at least 1
    pub dough_per_piece_g: f64,
    /// Dough phases; a recipe always has at least one
    #[serde(default)]
    pub doughs: Vec<Dough>,
    /// Alternative starters; zero or more
    #[serde(default)]
    pub starters: Vec<Starter>,
    /// Procedure steps
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    /// Last mold selection made in the mold helper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mold_selection: Option<MoldSelection>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a recipe with one empty "Main dough", no starters, and one
    /// blank procedure step
    pub fn new(name: &str, category: RecipeCategory, now: DateTime<Utc>) -> Self {
        Self {
            id: make_id(),
            name: name.to_string(),
            slug: slugify(name),
            category,
            pieces: 1,
            dough_per_piece_g: 1100.0,
            doughs: vec![Dough::new("Main dough")],
            starters: Vec::new(),
            steps: vec![RecipeStep::new()],
            mold_selection: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Iterate over the ingredients of every dough phase, in order
    pub fn dough_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.doughs.iter().flat_map(|dough| dough.ingredients.iter())
    }

    /// Iterate over every ingredient: all dough phases, then all starters
    pub fn all_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.dough_ingredients().chain(
            self.starters
                .iter()
                .flat_map(|starter| starter.ingredients.iter()),
        )
    }

    /// Look up a starter by id
    pub fn find_starter(&self, starter_id: &str) -> Option<&Starter> {
        self.starters.iter().find(|starter| starter.id == starter_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_ingredient_builder() {
        let ingredient = Ingredient::new("Butter")
            .with_qty(180.0)
            .with_group(IngredientGroup::Fat)
            .with_notes("82% fat, cold");

        assert_eq!(ingredient.name, "Butter");
        assert_eq!(ingredient.qty_g, 180.0);
        assert_eq!(ingredient.group, IngredientGroup::Fat);
        assert_eq!(ingredient.unit, IngredientUnit::Grams);
        assert_eq!(ingredient.notes.as_deref(), Some("82% fat, cold"));
    }

    #[test]
    fn test_gram_unit_resolves_directly() {
        let flour = Ingredient::new("Flour").with_qty(500.0);
        assert_eq!(flour.grams_per_piece(), Some(500.0));
        assert_eq!(flour.grams_for(550.0), Some(550.0));
    }

    #[test]
    fn test_count_unit_needs_unit_weight() {
        let eggs = Ingredient::new("Eggs")
            .with_qty(2.0)
            .with_unit(IngredientUnit::Count);
        assert_eq!(eggs.grams_per_piece(), None);

        let eggs = eggs.with_unit_weight(50.0);
        assert_eq!(eggs.grams_per_piece(), Some(100.0));
    }

    #[test]
    fn test_count_unit_rejects_non_positive_unit_weight() {
        let eggs = Ingredient::new("Eggs")
            .with_qty(2.0)
            .with_unit(IngredientUnit::Count)
            .with_unit_weight(0.0);
        assert_eq!(eggs.grams_per_piece(), None);
    }

    #[test]
    fn test_merge_key_folds_case_and_whitespace() {
        let a = Ingredient::new("Flour");
        let b = Ingredient::new(" flour ");
        assert_eq!(a.merge_key(), b.merge_key());
    }

    #[test]
    fn test_new_recipe_defaults() {
        let recipe = Recipe::new("Panettone Classico", RecipeCategory::Panettone, now());
        assert_eq!(recipe.slug, "panettone-classico");
        assert_eq!(recipe.pieces, 1);
        assert_eq!(recipe.dough_per_piece_g, 1100.0);
        assert_eq!(recipe.doughs.len(), 1);
        assert_eq!(recipe.doughs[0].name, "Main dough");
        assert!(recipe.starters.is_empty());
        assert_eq!(recipe.steps.len(), 1);
    }

    #[test]
    fn test_all_ingredients_spans_doughs_and_starters() {
        let mut recipe = Recipe::new("Colomba", RecipeCategory::Colomba, now());
        recipe.doughs[0].ingredients = vec![Ingredient::new("Flour").with_qty(400.0)];
        let mut starter = Starter::new("Lievito madre");
        starter.ingredients = vec![Ingredient::new("Starter flour").with_qty(100.0)];
        recipe.starters.push(starter);

        let names: Vec<&str> = recipe.all_ingredients().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Flour", "Starter flour"]);
    }

    #[test]
    fn test_category_wire_format() {
        let json = serde_json::to_string(&RecipeCategory::PanettoneGastronomico).unwrap();
        assert_eq!(json, "\"Panettone Gastronomico\"");
    }

    #[test]
    fn test_ingredient_display() {
        let ingredient = Ingredient::new("Flour").with_qty(500.0);
        assert_eq!(format!("{ingredient}"), "500 g Flour");
    }

    #[test]
    fn test_recipe_serde_round_trip() {
        let mut recipe = Recipe::new("Pandoro", RecipeCategory::Pandoro, now());
        recipe.doughs[0].ingredients = vec![Ingredient::new("Flour").with_qty(450.0)];
        let json = serde_json::to_string(&recipe).unwrap();
        let back: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recipe);
    }
}
