//! # quire_core - Book Printing Cost Engine
//!
//! `quire_core` estimates what a print shop should charge per copy of a
//! printed book: paper by weight, printing, plates, folding, shipping,
//! cover and profit margin.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `calculate` is a pure function of input and pricing profile
//! - **JSON-First**: Inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Every rejection names the offending field
//!
//! ## Quick Start
//!
//! ```rust
//! use quire_core::calculations::{calculate, BookJobInput};
//! use quire_core::pricing::PricingProfile;
//!
//! let input = BookJobInput {
//!     page_count: 160,
//!     reference_paper_size: "0.70 x 1.00".to_string(),
//!     final_trim_size: Some("17 x 24".to_string()),
//!     paper_weight_per_area: 80.0,
//!     print_run: 1000,
//!     color_count: 4,
//!     cover_unit_price: 1.0,
//!     profit_margin_percent: 20.0,
//!     paper_price_per_ton: 900.0,
//!     waste_units: 50,
//!     cover_unit_count: 1,
//!     cover_type: None,
//! };
//!
//! let result = calculate(&input, &PricingProfile::trim_aware()).unwrap();
//! assert_eq!(result.booklets, 10);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Single-book and batch estimates
//! - [`pricing`] - Pricing profiles (rate constants, trim table)
//! - [`paper`] - Press sheet sizes and finished trim sizes
//! - [`form`] - Order form field decoding
//! - [`reference`] - Static lookup tables for front ends
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod form;
pub mod paper;
pub mod pricing;
pub mod reference;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, calculate_batch, BatchFailure, BatchPolicy, BookJobInput, BookJobResult, ItemError};
pub use errors::{CostError, CostResult};
pub use pricing::{PricingProfile, PricingVariant};
