//! # Paper Sizes
//!
//! Reference press sheets and finished (trimmed) book sizes.
//!
//! A reference sheet is quoted as `"<length> x <width>"` in meters, e.g.
//! `"0.70 x 1.00"`. The separator is the literal `" x "` (space, x, space);
//! anything else is rejected rather than guessed at.
//!
//! ## Example
//!
//! ```rust
//! use quire_core::paper::SheetSize;
//!
//! let sheet: SheetSize = "0.70 x 1.00".parse().unwrap();
//! assert_eq!(sheet.length_m.0, 0.70);
//! assert_eq!(sheet.width_m.0, 1.00);
//! assert!("70x100".parse::<SheetSize>().is_err());
//! ```

pub mod trim_sizes;

pub use trim_sizes::{TrimFamily, TrimSize, TrimSizeTable, BUILTIN_TRIM_SIZES};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CostError, CostResult};
use crate::units::{Gsm, Grams, Meters, SquareMeters};

/// Separator between the two dimensions of a sheet size string
pub const DIMENSION_SEPARATOR: &str = " x ";

/// Sheets in one booklet unit (a ream). Fixed by the production model.
pub const SHEETS_PER_BOOKLET_UNIT: f64 = 500.0;

/// Reference press sheets offered to the user, as quoted on the order form
pub const STANDARD_SHEETS: [&str; 3] = ["0.57 x 0.82", "0.60 x 0.90", "0.70 x 1.00"];

/// Press sheet dimensions in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    /// Sheet length in meters
    pub length_m: Meters,
    /// Sheet width in meters
    pub width_m: Meters,
}

impl SheetSize {
    /// Create a sheet size from raw meter values
    pub fn new(length_m: f64, width_m: f64) -> Self {
        SheetSize {
            length_m: Meters(length_m),
            width_m: Meters(width_m),
        }
    }

    /// Parse a `"<length> x <width>"` string, reporting failures against `field`.
    pub fn parse_field(field: &str, raw: &str) -> CostResult<Self> {
        let parts: Vec<&str> = raw.split(DIMENSION_SEPARATOR).collect();
        let [length, width] = parts.as_slice() else {
            return Err(CostError::invalid_input(
                field,
                raw,
                "Expected '<length> x <width>' in meters, e.g. '0.70 x 1.00'",
            ));
        };

        let length_m = parse_dimension(field, raw, length)?;
        let width_m = parse_dimension(field, raw, width)?;
        Ok(SheetSize::new(length_m, width_m))
    }

    /// Sheet area in square meters
    pub fn area(&self) -> SquareMeters {
        self.length_m * self.width_m
    }

    /// Weight of one booklet unit of this sheet at the given grammage.
    ///
    /// `length * width * 500 * gsm`, evaluated left to right.
    pub fn booklet_unit_weight(&self, grammage: Gsm) -> Grams {
        (self.area() * SHEETS_PER_BOOKLET_UNIT) * grammage
    }

    /// Standard reference sheets, parsed
    pub fn standard() -> Vec<SheetSize> {
        STANDARD_SHEETS
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect()
    }

    /// True if this sheet matches one of the standard reference sheets
    pub fn is_standard(&self) -> bool {
        Self::standard()
            .iter()
            .any(|s| (s.length_m.0 - self.length_m.0).abs() < 1e-9 && (s.width_m.0 - self.width_m.0).abs() < 1e-9)
    }
}

fn parse_dimension(field: &str, raw: &str, half: &str) -> CostResult<f64> {
    let value: f64 = half.trim().parse().map_err(|_| {
        CostError::invalid_input(field, raw, format!("'{}' is not a number", half.trim()))
    })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(CostError::invalid_input(
            field,
            raw,
            "Sheet dimensions must be positive finite numbers",
        ));
    }
    Ok(value)
}

impl FromStr for SheetSize {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SheetSize::parse_field("reference_paper_size", s)
    }
}

impl std::fmt::Display for SheetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}{}{:.2}", self.length_m.0, DIMENSION_SEPARATOR, self.width_m.0)
    }
}
