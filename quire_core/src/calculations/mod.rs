//! # Cost Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, profile) -> Result<*Result, CostError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`book_cost`] - Per-copy price of one book job
//! - [`batch`] - The same calculation over an ordered list of book jobs

pub mod batch;
pub mod book_cost;

// Re-export commonly used types
pub use batch::{calculate_batch, BatchFailure, BatchPolicy, ItemError};
pub use book_cost::{calculate, BookJobInput, BookJobResult, CostBreakdown, PAGES_PER_BOOKLET};
