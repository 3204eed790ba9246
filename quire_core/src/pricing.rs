//! # Pricing Profiles
//!
//! A `PricingProfile` is the constant set the cost formula runs with. There
//! are two built-in profiles, matching the two rate cards the print shop
//! quotes from:
//!
//! | Profile      | Printing / 10k | Folding / 1k | Plate | Shipping / kg | Trim step |
//! |--------------|----------------|--------------|-------|---------------|-----------|
//! | `simple`     | 10             | 2            | 10    | 0.1           | no        |
//! | `trim-aware` | 6              | 2            | 10    | 2             | yes       |
//!
//! Which one is active is always an explicit choice made by the caller.
//! Custom profiles can be loaded from TOML:
//!
//! ```toml
//! name = "house-rates"
//! printing_cost_per_10k = 6.0
//! folding_cost_per_1k = 2.0
//! plate_cost_unit = 10.0
//! shipping_cost_per_kg = 2.0
//! use_builtin_trim_sizes = true
//!
//! [[trim_sizes]]
//! name = "21 x 29.7"
//! family = "70x100"
//! multiplier = 1.5
//! ```
//!
//! Entries under `[[trim_sizes]]` are appended after the built-in table when
//! `use_builtin_trim_sizes` is set, otherwise they form the whole table. A
//! profile with neither has no trim step.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};
use crate::paper::{TrimSize, TrimSizeTable};
use crate::reference::ShippingRegion;

/// Name of the built-in profile without a trim step
pub const SIMPLE_PROFILE: &str = "simple";

/// Name of the built-in profile with the trim-size multiplier step
pub const TRIM_AWARE_PROFILE: &str = "trim-aware";

/// Which shape of the formula a profile runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingVariant {
    /// No trim-size multiplier step
    Simple,
    /// Paper, printing and plate costs scaled by the trim-size multiplier
    TrimAware,
}

impl std::fmt::Display for PricingVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingVariant::Simple => write!(f, "simple"),
            PricingVariant::TrimAware => write!(f, "trim-aware"),
        }
    }
}

/// Cost constants and trim table for one rate card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingProfile {
    /// Profile name, reported back in every result
    pub name: String,
    /// Printing cost per booklet per color
    pub printing_cost_per_10k: f64,
    /// Folding cost per thousand booklets
    pub folding_cost_per_1k: f64,
    /// Plate cost per booklet per color
    pub plate_cost_unit: f64,
    /// Shipping cost per kilogram
    pub shipping_cost_per_kg: f64,
    /// Trim-size multipliers; `None` disables the trim step
    pub trim_sizes: Option<TrimSizeTable>,
}

impl PricingProfile {
    /// Rate card without a trim step (10 / 2 / 10 / 0.1)
    pub fn simple() -> Self {
        PricingProfile {
            name: SIMPLE_PROFILE.to_string(),
            printing_cost_per_10k: 10.0,
            folding_cost_per_1k: 2.0,
            plate_cost_unit: 10.0,
            shipping_cost_per_kg: 0.1,
            trim_sizes: None,
        }
    }

    /// Rate card with the built-in trim-size table (6 / 2 / 10 / 2)
    pub fn trim_aware() -> Self {
        PricingProfile {
            name: TRIM_AWARE_PROFILE.to_string(),
            printing_cost_per_10k: 6.0,
            folding_cost_per_1k: 2.0,
            plate_cost_unit: 10.0,
            shipping_cost_per_kg: 2.0,
            trim_sizes: Some(TrimSizeTable::builtin().clone()),
        }
    }

    /// Resolve a built-in profile by name
    pub fn builtin(name: &str) -> CostResult<Self> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            SIMPLE_PROFILE => Ok(Self::simple()),
            TRIM_AWARE_PROFILE | "trim" | "multi" => Ok(Self::trim_aware()),
            _ => Err(CostError::profile_not_found(name)),
        }
    }

    /// Names of the built-in profiles
    pub fn builtin_names() -> [&'static str; 2] {
        [SIMPLE_PROFILE, TRIM_AWARE_PROFILE]
    }

    /// Parse a profile from a TOML document
    pub fn from_toml_str(contents: &str) -> CostResult<Self> {
        let file: ProfileFile = toml::from_str(contents)?;
        file.into_profile()
    }

    /// Load a profile from a TOML file
    pub fn load(path: &Path) -> CostResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CostError::config(format!("Cannot read pricing profile '{}': {}", path.display(), e))
        })?;
        let profile = Self::from_toml_str(&contents)?;
        tracing::debug!(profile = %profile.name, path = %path.display(), "Loaded pricing profile");
        Ok(profile)
    }

    /// Copy of this profile shipping at a region's per-kg rate
    pub fn with_shipping_region(&self, region: &ShippingRegion) -> Self {
        PricingProfile {
            name: format!("{}@{}", self.name, region.key),
            shipping_cost_per_kg: region.cost_per_kg,
            ..self.clone()
        }
    }

    /// Which formula variant this profile runs
    pub fn variant(&self) -> PricingVariant {
        if self.trim_sizes.is_some() {
            PricingVariant::TrimAware
        } else {
            PricingVariant::Simple
        }
    }

    /// Check every constant is finite and non-negative
    pub fn validate(&self) -> CostResult<()> {
        if self.name.trim().is_empty() {
            return Err(CostError::config("Pricing profile name cannot be empty"));
        }
        let constants = [
            ("printing_cost_per_10k", self.printing_cost_per_10k),
            ("folding_cost_per_1k", self.folding_cost_per_1k),
            ("plate_cost_unit", self.plate_cost_unit),
            ("shipping_cost_per_kg", self.shipping_cost_per_kg),
        ];
        for (field, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(CostError::config(format!(
                    "Profile '{}': {} must be a non-negative number, got {}",
                    self.name, field, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for PricingProfile {
    fn default() -> Self {
        PricingProfile::trim_aware()
    }
}

/// On-disk profile layout
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    name: String,
    printing_cost_per_10k: f64,
    folding_cost_per_1k: f64,
    plate_cost_unit: f64,
    shipping_cost_per_kg: f64,
    #[serde(default)]
    use_builtin_trim_sizes: bool,
    #[serde(default)]
    trim_sizes: Vec<TrimSize>,
}

impl ProfileFile {
    fn into_profile(self) -> CostResult<PricingProfile> {
        let trim_sizes = match (self.use_builtin_trim_sizes, self.trim_sizes.is_empty()) {
            (false, true) => None,
            (false, false) => Some(TrimSizeTable::new(self.trim_sizes)?),
            (true, _) => {
                let mut sizes = TrimSizeTable::builtin().sizes().to_vec();
                sizes.extend(self.trim_sizes);
                Some(TrimSizeTable::new(sizes)?)
            }
        };

        let profile = PricingProfile {
            name: self.name,
            printing_cost_per_10k: self.printing_cost_per_10k,
            folding_cost_per_1k: self.folding_cost_per_1k,
            plate_cost_unit: self.plate_cost_unit,
            shipping_cost_per_kg: self.shipping_cost_per_kg,
            trim_sizes,
        };
        profile.validate()?;
        Ok(profile)
    }
}
