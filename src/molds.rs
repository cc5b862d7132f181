//! # Mold Catalog Module
//!
//! Static catalog of baking-mold presets grouped by product type, plus the
//! helpers that derive canonical size keys, human-readable size labels,
//! suggested dough weights, and normalized mold selections.
//!
//! The catalog is reference data injected into the lookup functions rather
//! than a module-level singleton, so callers can swap it for a custom table.
//! The shape of each mold is discriminated once, at data-load time, into a
//! tagged variant instead of being re-inferred from nullable dimension fields
//! on every call.

use serde::{Deserialize, Serialize};

/// A mold choice as stored on a recipe
///
/// `mold_rating` may hold either a legacy raw rating ("1 kg") or a canonical
/// size key ("H11-D17"); [`MoldCatalog::normalize_selection`] upgrades the
/// former to the latter when the preset is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoldSelection {
    pub product_type: String,
    pub mold_rating: String,
}

/// Physical shape family of a mold, fixed at data-load time
#[derive(Debug, Clone, PartialEq)]
pub enum MoldShape {
    /// Round paper molds: panettone, panettone gastronomico
    Circular { height_cm: f64, diameter_cm: f64 },
    /// Flat rectangular baskets: colomba
    Rectangular { width_cm: f64, length_cm: f64 },
    /// Low round-edged forms catalogued by height and width
    SemiRectangular { height_cm: f64, width_cm: f64 },
    /// No usable dimensions; identified by the rating string alone
    Unspecified { rating: String },
}

impl MoldShape {
    /// Discriminate a shape from nullable dimension fields
    ///
    /// Precedence: diameter, then length, then width; zero and negative
    /// dimensions count as absent. Falls back to the rating string.
    pub fn from_dimensions(
        height_cm: Option<f64>,
        diameter_cm: Option<f64>,
        width_cm: Option<f64>,
        length_cm: Option<f64>,
        rating: &str,
    ) -> Self {
        let present = |dim: Option<f64>| dim.filter(|value| *value > 0.0);
        if let Some(diameter) = present(diameter_cm) {
            return MoldShape::Circular {
                height_cm: present(height_cm).unwrap_or(0.0),
                diameter_cm: diameter,
            };
        }
        if let Some(length) = present(length_cm) {
            return MoldShape::Rectangular {
                width_cm: present(width_cm).unwrap_or(0.0),
                length_cm: length,
            };
        }
        if let Some(width) = present(width_cm) {
            return MoldShape::SemiRectangular {
                height_cm: present(height_cm).unwrap_or(0.0),
                width_cm: width,
            };
        }
        MoldShape::Unspecified {
            rating: rating.to_string(),
        }
    }

    /// Canonical size key, stable and collision-free within one product type
    pub fn size_key(&self) -> String {
        match self {
            MoldShape::Circular {
                height_cm,
                diameter_cm,
            } => format!("H{height_cm}-D{diameter_cm}"),
            MoldShape::Rectangular {
                width_cm,
                length_cm,
            } => format!("W{width_cm}-L{length_cm}"),
            MoldShape::SemiRectangular {
                height_cm,
                width_cm,
            } => format!("H{height_cm}-W{width_cm}"),
            MoldShape::Unspecified { rating } => rating.clone(),
        }
    }

    /// Human-readable size label for pickers
    pub fn size_label(&self) -> String {
        match self {
            MoldShape::Circular {
                height_cm,
                diameter_cm,
            } => format!("H {height_cm} cm × Ø {diameter_cm} cm"),
            MoldShape::Rectangular {
                width_cm,
                length_cm,
            } => format!("W {width_cm} cm × L {length_cm} cm"),
            MoldShape::SemiRectangular {
                height_cm,
                width_cm,
            } => format!("H {height_cm} cm × W {width_cm} cm"),
            MoldShape::Unspecified { rating } => rating.clone(),
        }
    }
}

/// One immutable mold preset
#[derive(Debug, Clone, PartialEq)]
pub struct MoldPreset {
    pub product_type: String,
    /// Manufacturer rating, usually the nominal baked weight
    pub mold_rating: String,
    pub shape: MoldShape,
    pub suggested_dough_weight_min_g: u32,
    pub suggested_dough_weight_max_g: u32,
    pub notes: String,
}

impl MoldPreset {
    /// Canonical size key for this preset
    pub fn size_key(&self) -> String {
        self.shape.size_key()
    }

    /// Human-readable size label for this preset
    pub fn size_label(&self) -> String {
        self.shape.size_label()
    }

    /// Suggested dough weight: the integer midpoint of the preset's range,
    /// or the single value when the range is degenerate
    pub fn suggested_weight_g(&self) -> u32 {
        if self.suggested_dough_weight_min_g == self.suggested_dough_weight_max_g {
            return self.suggested_dough_weight_min_g;
        }
        let min = f64::from(self.suggested_dough_weight_min_g);
        let max = f64::from(self.suggested_dough_weight_max_g);
        ((min + max) / 2.0).round() as u32
    }
}

/// Immutable preset table, injected into lookups
#[derive(Debug, Clone)]
pub struct MoldCatalog {
    presets: Vec<MoldPreset>,
}

impl MoldCatalog {
    /// Build a catalog from an arbitrary preset list
    pub fn new(presets: Vec<MoldPreset>) -> Self {
        Self { presets }
    }

    /// The shipped preset data
    pub fn builtin() -> Self {
        Self::new(builtin_presets())
    }

    /// All presets, in catalog order
    pub fn presets(&self) -> &[MoldPreset] {
        &self.presets
    }

    /// Distinct product types, in first-seen order
    pub fn product_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for preset in &self.presets {
            if !types.contains(&preset.product_type.as_str()) {
                types.push(preset.product_type.as_str());
            }
        }
        types
    }

    /// `(size_key, size_label)` pairs for one product type, in catalog order
    pub fn size_options(&self, product_type: &str) -> Vec<(String, String)> {
        self.presets
            .iter()
            .filter(|preset| preset.product_type == product_type)
            .map(|preset| (preset.size_key(), preset.size_label()))
            .collect()
    }

    /// Find the preset a selection points at
    ///
    /// Matches the selection's rating against either the canonical size key
    /// or the legacy raw rating, so selections saved before key canonicalization
    /// keep resolving.
    pub fn find_preset(&self, selection: &MoldSelection) -> Option<&MoldPreset> {
        if selection.product_type.is_empty() || selection.mold_rating.is_empty() {
            return None;
        }
        self.presets.iter().find(|preset| {
            preset.product_type == selection.product_type
                && (preset.size_key() == selection.mold_rating
                    || preset.mold_rating == selection.mold_rating)
        })
    }

    /// Rewrite a legacy raw rating to the canonical size key
    ///
    /// Best-effort: a selection that matches no preset by raw rating is
    /// returned unchanged, so older or foreign selections remain usable.
    pub fn normalize_selection(&self, selection: &MoldSelection) -> MoldSelection {
        let found = self.presets.iter().find(|preset| {
            preset.product_type == selection.product_type
                && preset.mold_rating == selection.mold_rating
        });
        match found {
            Some(preset) => MoldSelection {
                product_type: selection.product_type.clone(),
                mold_rating: preset.size_key(),
            },
            None => selection.clone(),
        }
    }

    /// Suggested dough weight for a selection, when its preset is known
    pub fn suggested_weight(&self, selection: &MoldSelection) -> Option<u32> {
        self.find_preset(selection)
            .map(MoldPreset::suggested_weight_g)
    }
}

fn preset(
    product_type: &str,
    mold_rating: &str,
    height_cm: Option<f64>,
    diameter_cm: Option<f64>,
    width_cm: Option<f64>,
    length_cm: Option<f64>,
    min_g: u32,
    max_g: u32,
    notes: &str,
) -> MoldPreset {
    MoldPreset {
        product_type: product_type.to_string(),
        mold_rating: mold_rating.to_string(),
        shape: MoldShape::from_dimensions(height_cm, diameter_cm, width_cm, length_cm, mold_rating),
        suggested_dough_weight_min_g: min_g,
        suggested_dough_weight_max_g: max_g,
        notes: notes.to_string(),
    }
}

fn builtin_presets() -> Vec<MoldPreset> {
    vec![
        preset(
            "Panettone",
            "500 g",
            Some(9.5),
            Some(13.4),
            None,
            None,
            450,
            550,
            "Classic tall paper mold.",
        ),
        preset(
            "Panettone",
            "750 g",
            Some(10.0),
            Some(15.8),
            None,
            None,
            700,
            800,
            "Classic tall paper mold.",
        ),
        preset(
            "Panettone",
            "1 kg",
            Some(11.0),
            Some(17.0),
            None,
            None,
            950,
            1100,
            "The standard size for competition pieces.",
        ),
        preset(
            "Panettone",
            "1 kg basso",
            Some(7.0),
            Some(21.5),
            None,
            None,
            950,
            1050,
            "Low form; wider crumb, shorter proof in the mold.",
        ),
        preset(
            "Panettone",
            "2 kg",
            Some(13.0),
            Some(21.2),
            None,
            None,
            1900,
            2100,
            "Needs a long final proof; watch the core temperature.",
        ),
        preset(
            "Pandoro",
            "750 g",
            None,
            None,
            None,
            None,
            700,
            800,
            "Eight-point star tin, buttered and floured.",
        ),
        preset(
            "Pandoro",
            "1 kg",
            None,
            None,
            None,
            None,
            950,
            1100,
            "Eight-point star tin, buttered and floured.",
        ),
        preset(
            "Colomba",
            "500 g",
            None,
            None,
            Some(21.0),
            Some(26.0),
            480,
            550,
            "Dove-shaped paper basket.",
        ),
        preset(
            "Colomba",
            "750 g",
            None,
            None,
            Some(24.0),
            Some(30.0),
            700,
            800,
            "Dove-shaped paper basket.",
        ),
        preset(
            "Colomba",
            "1 kg",
            None,
            None,
            Some(26.5),
            Some(35.0),
            950,
            1100,
            "Dove-shaped paper basket.",
        ),
        preset(
            "Panettone Gastronomico",
            "750 g",
            Some(14.0),
            Some(14.0),
            None,
            None,
            700,
            750,
            "Straight-sided tin for sandwich slicing.",
        ),
        preset(
            "Panettone Gastronomico",
            "1 kg",
            Some(16.0),
            Some(16.0),
            None,
            None,
            950,
            1000,
            "Straight-sided tin for sandwich slicing.",
        ),
        preset(
            "Veneziana",
            "500 g",
            Some(5.0),
            None,
            Some(22.0),
            None,
            480,
            560,
            "Low round-edged form.",
        ),
        preset(
            "Veneziana",
            "750 g",
            Some(6.0),
            None,
            Some(28.0),
            None,
            720,
            840,
            "Low round-edged form.",
        ),
    ]
}
