//! # Lievitati
//!
//! A recipe authoring and scaling library for festive leavened doughs
//! (panettone, pandoro, colomba). Recipes are composed of dough phases and
//! optional starters; the library scales per-piece quantities by a target
//! piece count and dough weight, computes baker's-percentage ratios,
//! aggregates shopping-list totals across phases, and suggests dough weights
//! from a catalog of known mold sizes.
//!
//! The computational core is pure: it receives a recipe snapshot plus scaling
//! parameters and returns derived read-only views, never touching storage.

pub mod editing;
pub mod molds;
pub mod recipe_model;
pub mod resolve;
pub mod scaling;
pub mod slug;
pub mod storage;
pub mod units;
