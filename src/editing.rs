//! # Recipe Editing Module
//!
//! Transformations applied to the recipe draft owned by the editing surface:
//! the weight-linked baseline rescale, dough/starter restructuring with
//! cascade deletion of step references, and save-time normalization.
//!
//! Every function operates on the draft the caller passes in; nothing here
//! holds state between calls.

use log::debug;
use std::collections::HashSet;

use crate::recipe_model::{Dough, Ingredient, Recipe, Starter};
use crate::slug::{make_id, slugify};

/// Direction for [`move_step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

fn guard_weight(value: f64) -> f64 {
    // NaN and sub-1 values land on 1, keeping the rescale ratio well-defined
    value.max(1.0)
}

/// Permanently rescale the recipe baseline to a new per-piece dough weight
///
/// Every ingredient quantity across every dough and starter is multiplied by
/// `new / old` (both guarded to at least 1), so the recipe itself is
/// recalibrated rather than merely re-viewed. Quantities are clamped at 0.
pub fn set_dough_per_piece(recipe: &mut Recipe, new_weight_g: f64) {
    let safe_prev = guard_weight(recipe.dough_per_piece_g);
    let safe_next = guard_weight(new_weight_g);
    let ratio = safe_next / safe_prev;
    if ratio != 1.0 {
        debug!(
            "Rescaling recipe '{}' baseline {} g -> {} g",
            recipe.name, safe_prev, safe_next
        );
        let rescale = |ingredient: &mut Ingredient| {
            ingredient.qty_g = (ingredient.qty_g * ratio).max(0.0);
        };
        for dough in &mut recipe.doughs {
            dough.ingredients.iter_mut().for_each(rescale);
        }
        for starter in &mut recipe.starters {
            starter.ingredients.iter_mut().for_each(rescale);
        }
    }
    recipe.dough_per_piece_g = safe_next;
}

/// Append a dough phase with a positional default name, returning its id
pub fn add_dough(recipe: &mut Recipe) -> String {
    let dough = Dough::new(&format!("Dough {}", recipe.doughs.len() + 1));
    let id = dough.id.clone();
    recipe.doughs.push(dough);
    id
}

/// Append a starter with a positional default name, returning its id
pub fn add_starter(recipe: &mut Recipe) -> String {
    let starter = Starter::new(&format!("Starter {}", recipe.starters.len() + 1));
    let id = starter.id.clone();
    recipe.starters.push(starter);
    id
}

/// Merge all dough phases into a single "Main dough"
///
/// Used when the editor toggles from multi-dough to single-dough mode.
/// Ingredient ids survive the merge, so step references stay valid. With one
/// dough or none this is a no-op; the opposite toggle direction never touches
/// data.
pub fn merge_doughs(recipe: &mut Recipe) {
    if recipe.doughs.len() <= 1 {
        return;
    }
    let merged: Vec<Ingredient> = recipe
        .doughs
        .drain(..)
        .flat_map(|dough| dough.ingredients)
        .collect();
    recipe.doughs.push(Dough {
        id: make_id(),
        name: "Main dough".to_string(),
        ingredients: merged,
    });
}

fn prune_step_references(recipe: &mut Recipe, removed: &[Ingredient]) {
    let removed_ids: HashSet<&str> = removed
        .iter()
        .map(|ingredient| ingredient.id.as_str())
        .collect();
    for step in &mut recipe.steps {
        step.ingredient_ids
            .retain(|id| !removed_ids.contains(id.as_str()));
    }
}

/// Remove a dough phase and prune its ingredients from every step reference
///
/// Removal and pruning happen together, so no dangling reference survives.
/// Returns false when the id matches no dough.
pub fn remove_dough(recipe: &mut Recipe, dough_id: &str) -> bool {
    let Some(position) = recipe.doughs.iter().position(|dough| dough.id == dough_id) else {
        return false;
    };
    let removed = recipe.doughs.remove(position);
    prune_step_references(recipe, &removed.ingredients);
    true
}

/// Remove a starter and prune its ingredients from every step reference
pub fn remove_starter(recipe: &mut Recipe, starter_id: &str) -> bool {
    let Some(position) = recipe
        .starters
        .iter()
        .position(|starter| starter.id == starter_id)
    else {
        return false;
    };
    let removed = recipe.starters.remove(position);
    prune_step_references(recipe, &removed.ingredients);
    true
}

/// Move a step one position up or down; out-of-range moves are no-ops
pub fn move_step(recipe: &mut Recipe, step_id: &str, direction: StepDirection) -> bool {
    let Some(index) = recipe.steps.iter().position(|step| step.id == step_id) else {
        return false;
    };
    let target = match direction {
        StepDirection::Up if index > 0 => index - 1,
        StepDirection::Down if index + 1 < recipe.steps.len() => index + 1,
        _ => return false,
    };
    recipe.steps.swap(index, target);
    true
}

/// Clean a recipe draft before it is persisted
///
/// - drops ingredients with blank names
/// - defaults blank dough/starter names to `"Dough {n}"` / `"Starter {n}"`,
///   1-indexed by position
/// - trims starter descriptions
/// - drops steps with a blank title
/// - clamps `pieces` and `dough_per_piece_g` to at least 1
/// - re-derives the slug from the trimmed name
pub fn normalize_for_save(recipe: &mut Recipe) {
    recipe.name = recipe.name.trim().to_string();
    recipe.slug = slugify(&recipe.name);
    recipe.pieces = recipe.pieces.max(1);
    recipe.dough_per_piece_g = guard_weight(recipe.dough_per_piece_g);

    for (index, dough) in recipe.doughs.iter_mut().enumerate() {
        let trimmed = dough.name.trim();
        dough.name = if trimmed.is_empty() {
            format!("Dough {}", index + 1)
        } else {
            trimmed.to_string()
        };
        dough.ingredients.retain(Ingredient::has_name);
    }

    for (index, starter) in recipe.starters.iter_mut().enumerate() {
        let trimmed = starter.name.trim();
        starter.name = if trimmed.is_empty() {
            format!("Starter {}", index + 1)
        } else {
            trimmed.to_string()
        };
        starter.description = starter.description.trim().to_string();
        starter.ingredients.retain(Ingredient::has_name);
    }

    recipe.steps.retain(|step| !step.title.trim().is_empty());
}
