//! # Unit Types
//!
//! Type-safe wrappers for the physical quantities in a print job. These
//! keep sheet dimensions, paper grammage and weights from being mixed up
//! while serializing as plain numbers.
//!
//! ## Units
//!
//! - Length: meters (sheet dimensions are quoted as "0.70 x 1.00")
//! - Area: square meters
//! - Grammage: grams per square meter (gsm)
//! - Weight: grams
//!
//! ## Example
//!
//! ```rust
//! use quire_core::units::{Gsm, Meters};
//!
//! let area = Meters(0.70) * Meters(1.00);
//! let ream_weight = (area * 500.0) * Gsm(80.0);
//! assert!((ream_weight.0 - 28_000.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

// ============================================================================
// Length / Area
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl Mul<Meters> for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> Self::Output {
        SquareMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Grammage / Weight
// ============================================================================

/// Paper grammage in grams per square meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gsm(pub f64);

/// Weight in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(pub f64);

impl Mul<Gsm> for SquareMeters {
    type Output = Grams;
    fn mul(self, rhs: Gsm) -> Self::Output {
        Grams(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(Gsm);
impl_arithmetic!(Grams);

// ============================================================================
// Display rounding
// ============================================================================

/// Round a value to two decimal places for display.
///
/// Rounds the exact binary value, so `2.675` (stored as 2.67499999...)
/// becomes `2.67`. Only applied to final outputs, never to values that
/// feed further arithmetic.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}
