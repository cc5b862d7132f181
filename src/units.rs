//! # Unit Conversion Module
//!
//! This module defines the measurement units a recipe ingredient can carry and
//! the fixed gram-equivalence table used to convert between stored gram values
//! and display values.
//!
//! ## Core Concepts
//!
//! - Grams are the canonical internal unit: every stored quantity is
//!   gram-denominated except the count unit.
//! - The count unit (`qty` on the wire) is not a weight. Its conversion factor
//!   is the identity, and resolving a gram figure requires the ingredient's
//!   weight-per-unit, which is the caller's responsibility.
//! - The cup factor is an estimate for enriched-dough flour, not a physical
//!   constant.

use serde::{Deserialize, Serialize};

/// Measurement units supported for recipe ingredients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientUnit {
    /// Grams
    #[serde(rename = "g")]
    Grams,
    /// Ounces
    #[serde(rename = "oz")]
    Ounces,
    /// Pounds
    #[serde(rename = "lb")]
    Pounds,
    /// Cups (estimated gram equivalence)
    #[serde(rename = "cup")]
    Cup,
    /// Discrete pieces (eggs, candied fruit halves, ...)
    #[serde(rename = "qty")]
    Count,
}

impl Default for IngredientUnit {
    fn default() -> Self {
        IngredientUnit::Grams
    }
}

impl IngredientUnit {
    /// All units in the order they are offered to the editing surface
    pub fn all() -> [IngredientUnit; 5] {
        [
            IngredientUnit::Grams,
            IngredientUnit::Ounces,
            IngredientUnit::Pounds,
            IngredientUnit::Cup,
            IngredientUnit::Count,
        ]
    }

    /// Grams per one display unit
    ///
    /// The count unit maps to 1: conversion is the identity and never consults
    /// the ingredient's weight-per-unit.
    pub fn grams_per_unit(&self) -> f64 {
        match self {
            IngredientUnit::Grams => 1.0,
            IngredientUnit::Ounces => 28.3495,
            IngredientUnit::Pounds => 453.592,
            IngredientUnit::Cup => 120.0,
            IngredientUnit::Count => 1.0,
        }
    }

    /// Short unit tag, matching the persisted representation
    pub fn display_name(&self) -> &'static str {
        match self {
            IngredientUnit::Grams => "g",
            IngredientUnit::Ounces => "oz",
            IngredientUnit::Pounds => "lb",
            IngredientUnit::Cup => "cup",
            IngredientUnit::Count => "qty",
        }
    }

    /// Label shown in unit pickers
    pub fn label(&self) -> &'static str {
        match self {
            IngredientUnit::Cup => "cup (est.)",
            other => other.display_name(),
        }
    }

    /// Check if this is the discrete count unit
    pub fn is_count(&self) -> bool {
        matches!(self, IngredientUnit::Count)
    }

    /// Default number of decimals when displaying a value in this unit
    pub fn display_digits(&self) -> usize {
        match self {
            IngredientUnit::Grams | IngredientUnit::Count => 0,
            _ => 2,
        }
    }
}

/// Ordered `(unit, label)` pairs for unit pickers
pub fn unit_options() -> Vec<(IngredientUnit, &'static str)> {
    IngredientUnit::all()
        .into_iter()
        .map(|unit| (unit, unit.label()))
        .collect()
}

/// Convert a gram value into its display-unit value
pub fn to_display(grams: f64, unit: IngredientUnit) -> f64 {
    grams / unit.grams_per_unit()
}

/// Convert a display-unit value back into grams
pub fn to_grams(value: f64, unit: IngredientUnit) -> f64 {
    value * unit.grams_per_unit()
}

/// Format a numeric value for display
///
/// Rounds to `digits` decimals and strips a fractional part that is all
/// zeroes. Non-finite input never panics and renders as `"0"`.
pub fn format_number(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let formatted = format!("{value:.digits$}");
    match formatted.split_once('.') {
        Some((whole, frac)) if frac.bytes().all(|b| b == b'0') => whole.to_string(),
        _ => formatted,
    }
}
