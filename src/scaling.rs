//! # Scaling Engine Module
//!
//! The pure computation that turns a recipe snapshot plus scaling parameters
//! into derived, read-only views: per-phase scaled ingredient rows, an
//! aggregated shopping list, and baker's-percentage figures.
//!
//! ## Core Concepts
//!
//! - **Scale factor**: target per-piece dough weight divided by the recipe's
//!   baseline per-piece weight. Applied uniformly to every ingredient quantity
//!   regardless of unit, modeling proportional recipe scaling.
//! - **Gram resolution**: grams are the canonical internal unit. A count-unit
//!   ingredient resolves grams only through a positive weight-per-unit;
//!   otherwise its gram contribution stays undefined and is surfaced as
//!   `None`, never as zero.
//! - **Aggregation**: ingredients from every dough phase plus the selected
//!   starter merge by case-folded, trimmed name into one sorted totals table.
//!
//! All functions here are deterministic, side-effect free, and never mutate
//! the recipe snapshot they are given.

use log::debug;
use std::collections::BTreeMap;

use crate::recipe_model::{Ingredient, IngredientGroup, Recipe, Starter};
use crate::units::IngredientUnit;

/// Scaling parameters chosen at view time
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleParams {
    /// Target piece count; clamped to at least 1
    pub pieces: u32,
    /// Target dough weight per piece in grams; clamped to at least 1
    pub dough_per_piece_g: f64,
    /// The starter participating in the computation, if any
    pub starter_id: Option<String>,
}

impl ScaleParams {
    /// Baseline parameters for a recipe: its own piece count and per-piece
    /// weight, with the first starter preselected when one exists
    pub fn for_recipe(recipe: &Recipe) -> Self {
        Self {
            pieces: recipe.pieces,
            dough_per_piece_g: recipe.dough_per_piece_g,
            starter_id: recipe.starters.first().map(|starter| starter.id.clone()),
        }
    }
}

/// One ingredient row after scaling
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledIngredient {
    pub id: String,
    pub name: String,
    pub unit: IngredientUnit,
    pub group: IngredientGroup,
    /// Scaled per-piece quantity, in the ingredient's own unit terms
    pub qty_per_piece: f64,
    /// Gram equivalent of the scaled per-piece quantity, when resolvable
    pub grams_per_piece: Option<f64>,
    /// Scaled quantity for the whole batch, in the ingredient's own unit terms
    pub total_qty: f64,
    /// Gram total for the whole batch, when resolvable
    pub total_g: Option<f64>,
    /// Weight as a percentage of the flour base; `None` when either side of
    /// the ratio is undefined
    pub bakers_pct: Option<f64>,
}

/// One dough phase after scaling
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledDough {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<ScaledIngredient>,
}

/// The selected starter after scaling
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledStarter {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<ScaledIngredient>,
}

/// One row of the aggregated shopping list
#[derive(Debug, Clone, PartialEq)]
pub struct TotalRow {
    /// First-seen trimmed spelling of the merged name
    pub name: String,
    /// First-seen unit of the merged ingredients
    pub unit: IngredientUnit,
    /// Gram total across all occurrences; `None` while no occurrence has
    /// resolved grams ("no weight known" stays visible, never becomes 0)
    pub total_g: Option<f64>,
    /// Count total across count-unit occurrences, summed independently of
    /// the gram accumulator
    pub total_count: f64,
}

/// Derived views for one recipe at one set of scaling parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledRecipe {
    /// Ratio between the target and baseline per-piece dough weight
    pub scale_factor: f64,
    /// Clamped target piece count
    pub pieces: u32,
    /// Clamped target per-piece dough weight in grams
    pub dough_per_piece_g: f64,
    /// Sanity figure: pieces times per-piece weight. Not asserted to equal
    /// the ingredient gram sum; user-entered data may not balance.
    pub total_dough_g: f64,
    /// Per-piece flour base at scale factor, the baker's-percentage denominator
    pub flour_base_g: f64,
    /// The selected starter's scaled rows, when a starter is selected
    pub starter: Option<ScaledStarter>,
    /// Every dough phase's scaled rows, in recipe order
    pub doughs: Vec<ScaledDough>,
    /// Aggregated shopping list, sorted by name, case-insensitive ascending
    pub totals: Vec<TotalRow>,
}

fn clamp_weight(value: f64) -> f64 {
    // f64::max treats NaN as absent, so malformed input lands on 1
    value.max(1.0)
}

fn clamp_qty(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Compute the scale factor for a target per-piece weight against a recipe's
/// baseline, guarding a non-positive baseline as 1
pub fn scale_factor(recipe: &Recipe, target_dough_per_piece_g: f64) -> f64 {
    clamp_weight(target_dough_per_piece_g) / clamp_weight(recipe.dough_per_piece_g)
}

/// Per-piece flour base at the given scale factor
///
/// Sums the scaled gram quantities of every Flour-group ingredient whose unit
/// is not the count unit. Count-unit flour lacks a reliable per-piece gram
/// figure and is excluded from the denominator.
fn flour_base<'a>(ingredients: impl Iterator<Item = &'a Ingredient>, factor: f64) -> f64 {
    ingredients
        .filter(|ingredient| {
            ingredient.group == IngredientGroup::Flour && !ingredient.unit.is_count()
        })
        .map(|ingredient| clamp_qty(ingredient.qty_g) * factor)
        .sum()
}

fn scale_ingredient(
    ingredient: &Ingredient,
    factor: f64,
    pieces: u32,
    flour_base_g: f64,
) -> ScaledIngredient {
    let qty_per_piece = clamp_qty(ingredient.qty_g) * factor;
    let grams_per_piece = ingredient.grams_for(qty_per_piece);
    let pieces_f = f64::from(pieces);
    let bakers_pct = match grams_per_piece {
        Some(grams) if flour_base_g > 0.0 => Some(100.0 * grams / flour_base_g),
        _ => None,
    };
    ScaledIngredient {
        id: ingredient.id.clone(),
        name: ingredient.name.clone(),
        unit: ingredient.unit,
        group: ingredient.group,
        qty_per_piece,
        grams_per_piece,
        total_qty: qty_per_piece * pieces_f,
        total_g: grams_per_piece.map(|grams| grams * pieces_f),
        bakers_pct,
    }
}

fn merge_into_totals(
    totals: &mut BTreeMap<String, TotalRow>,
    ingredient: &Ingredient,
    scaled: &ScaledIngredient,
) {
    let trimmed = ingredient.name.trim();
    if trimmed.is_empty() {
        return;
    }
    let key = ingredient.merge_key();
    let count_total = if ingredient.unit.is_count() {
        scaled.total_qty
    } else {
        0.0
    };
    match totals.get_mut(&key) {
        Some(row) => {
            if let Some(grams) = scaled.total_g {
                row.total_g = Some(row.total_g.unwrap_or(0.0) + grams);
            }
            row.total_count += count_total;
        }
        None => {
            totals.insert(
                key,
                TotalRow {
                    name: trimmed.to_string(),
                    unit: ingredient.unit,
                    total_g: scaled.total_g,
                    total_count: count_total,
                },
            );
        }
    }
}

/// Scale a recipe snapshot
///
/// Returns every derived view at once: the scale factor, the per-phase rows,
/// the selected starter's rows, the aggregated shopping list, and the
/// baker's-percentage base. The snapshot itself is left untouched.
pub fn scale_recipe(recipe: &Recipe, params: &ScaleParams) -> ScaledRecipe {
    let pieces = params.pieces.max(1);
    let dough_per_piece_g = clamp_weight(params.dough_per_piece_g);
    let factor = scale_factor(recipe, dough_per_piece_g);

    let selected_starter: Option<&Starter> = params
        .starter_id
        .as_deref()
        .and_then(|starter_id| recipe.find_starter(starter_id));

    debug!(
        "Scaling recipe '{}' to {} piece(s) at {} g/piece (factor {:.3})",
        recipe.name, pieces, dough_per_piece_g, factor
    );

    let starter_ingredients = selected_starter
        .map(|starter| starter.ingredients.as_slice())
        .unwrap_or(&[]);
    let flour_base_g = flour_base(
        recipe.dough_ingredients().chain(starter_ingredients.iter()),
        factor,
    );

    // Doughs merge ahead of the starter so a merged row keeps the dough-side
    // spelling and unit
    let mut totals: BTreeMap<String, TotalRow> = BTreeMap::new();

    let doughs = recipe
        .doughs
        .iter()
        .map(|dough| ScaledDough {
            id: dough.id.clone(),
            name: dough.name.clone(),
            ingredients: dough
                .ingredients
                .iter()
                .map(|ingredient| {
                    let scaled = scale_ingredient(ingredient, factor, pieces, flour_base_g);
                    merge_into_totals(&mut totals, ingredient, &scaled);
                    scaled
                })
                .collect(),
        })
        .collect();

    let starter = selected_starter.map(|starter| ScaledStarter {
        id: starter.id.clone(),
        name: starter.name.clone(),
        description: starter.description.clone(),
        ingredients: starter
            .ingredients
            .iter()
            .map(|ingredient| {
                let scaled = scale_ingredient(ingredient, factor, pieces, flour_base_g);
                merge_into_totals(&mut totals, ingredient, &scaled);
                scaled
            })
            .collect(),
    });

    ScaledRecipe {
        scale_factor: factor,
        pieces,
        dough_per_piece_g,
        total_dough_g: f64::from(pieces) * dough_per_piece_g,
        flour_base_g,
        starter,
        doughs,
        totals: totals.into_values().collect(),
    }
}
