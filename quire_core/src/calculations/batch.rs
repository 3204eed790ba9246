//! # Batch Estimates
//!
//! Applies the single-book calculation to every book of a request, in
//! order, with the same pricing profile. A batch either yields one result
//! per book or fails as a whole, reporting which books were rejected.
//!
//! ## Example
//!
//! ```rust
//! use quire_core::calculations::batch::{calculate_batch, BatchPolicy};
//! use quire_core::calculations::book_cost::BookJobInput;
//! use quire_core::pricing::PricingProfile;
//!
//! let book = BookJobInput {
//!     page_count: 96,
//!     reference_paper_size: "0.60 x 0.90".to_string(),
//!     final_trim_size: Some("15 x 22".to_string()),
//!     paper_weight_per_area: 70.0,
//!     print_run: 1500,
//!     color_count: 1,
//!     cover_unit_price: 1.25,
//!     profit_margin_percent: 10.0,
//!     paper_price_per_ton: 820.0,
//!     waste_units: 75,
//!     cover_unit_count: 1,
//!     cover_type: None,
//! };
//!
//! let mut broken = book.clone();
//! broken.print_run = 0;
//!
//! let profile = PricingProfile::trim_aware();
//! let results = calculate_batch(&[book.clone(), book.clone()], &profile, BatchPolicy::FailFast).unwrap();
//! assert_eq!(results.len(), 2);
//!
//! let failure = calculate_batch(&[book, broken], &profile, BatchPolicy::CollectAll).unwrap_err();
//! assert_eq!(failure.errors[0].index, 1);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::book_cost::{calculate, BookJobInput, BookJobResult};
use crate::errors::CostError;
use crate::pricing::PricingProfile;

/// How a batch reacts to a rejected book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Stop at the first rejected book
    #[default]
    FailFast,
    /// Check every book and report all rejections
    CollectAll,
}

impl BatchPolicy {
    /// Parse from a query/CLI value ("fail_fast", "collect-all", ...)
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fail_fast" | "failfast" | "first" => Some(BatchPolicy::FailFast),
            "collect_all" | "collectall" | "all" => Some(BatchPolicy::CollectAll),
            _ => None,
        }
    }
}

/// A rejected book and why
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("book #{index}: {error}")]
pub struct ItemError {
    /// Zero-based position of the book in the request
    pub index: usize,
    pub error: CostError,
}

impl ItemError {
    pub fn new(index: usize, error: CostError) -> Self {
        ItemError { index, error }
    }
}

/// A batch that produced no results
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{} book(s) rejected; first: {}", .errors.len(), first_message(.errors))]
pub struct BatchFailure {
    /// Rejected books in ascending index order; never empty
    pub errors: Vec<ItemError>,
}

fn first_message(errors: &[ItemError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}

impl BatchFailure {
    /// Failure not tied to any single book (e.g., an empty batch)
    pub fn whole_batch(error: CostError) -> Self {
        BatchFailure {
            errors: vec![ItemError::new(0, error)],
        }
    }

    pub fn first(&self) -> Option<&ItemError> {
        self.errors.first()
    }

    /// Indices of the rejected books
    pub fn indices(&self) -> Vec<usize> {
        self.errors.iter().map(|e| e.index).collect()
    }
}

/// Estimate every book of a batch with one profile.
///
/// Results come back in input order, one per book, each identical to what
/// [`calculate`] returns for that book alone. An empty batch is rejected.
pub fn calculate_batch(
    inputs: &[BookJobInput],
    profile: &PricingProfile,
    policy: BatchPolicy,
) -> Result<Vec<BookJobResult>, BatchFailure> {
    if inputs.is_empty() {
        return Err(BatchFailure::whole_batch(CostError::EmptyBatch));
    }

    let mut results = Vec::with_capacity(inputs.len());
    let mut errors = Vec::new();

    for (index, input) in inputs.iter().enumerate() {
        match calculate(input, profile) {
            Ok(result) => results.push(result),
            Err(error) => {
                tracing::warn!(index, code = error.error_code(), %error, "Book rejected");
                errors.push(ItemError::new(index, error));
                if policy == BatchPolicy::FailFast {
                    break;
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(BatchFailure { errors });
    }

    tracing::debug!(count = results.len(), profile = %profile.name, "Batch calculated");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(pages: u32, run: u32) -> BookJobInput {
        BookJobInput {
            page_count: pages,
            reference_paper_size: "0.57 x 0.82".to_string(),
            final_trim_size: Some("14 x 20".to_string()),
            paper_weight_per_area: 70.0,
            print_run: run,
            color_count: 2,
            cover_unit_price: 0.5,
            profit_margin_percent: 25.0,
            paper_price_per_ton: 800.0,
            waste_units: 20,
            cover_unit_count: 1,
            cover_type: None,
        }
    }

    #[test]
    fn test_results_in_input_order() {
        let profile = PricingProfile::trim_aware();
        let inputs = vec![book(32, 500), book(200, 3000), book(17, 100), book(64, 1000)];
        let results = calculate_batch(&inputs, &profile, BatchPolicy::FailFast).unwrap();

        assert_eq!(results.len(), inputs.len());
        for (input, result) in inputs.iter().zip(&results) {
            assert_eq!(result, &calculate(input, &profile).unwrap());
            assert_eq!(result.page_count, input.page_count);
        }
    }

    #[test]
    fn test_fail_fast_reports_first_failure_only() {
        let mut inputs = vec![book(32, 500), book(64, 0), book(96, 1000), book(16, 0)];
        inputs[2].reference_paper_size = "bad".to_string();

        let failure = calculate_batch(&inputs, &PricingProfile::simple(), BatchPolicy::FailFast).unwrap_err();
        assert_eq!(failure.indices(), vec![1]);
        assert_eq!(failure.first().unwrap().error.field(), Some("print_run"));
    }

    #[test]
    fn test_collect_all_reports_every_failure() {
        let mut inputs = vec![book(32, 500), book(64, 0), book(96, 1000), book(16, 0)];
        inputs[2].reference_paper_size = "bad".to_string();

        let failure = calculate_batch(&inputs, &PricingProfile::simple(), BatchPolicy::CollectAll).unwrap_err();
        assert_eq!(failure.indices(), vec![1, 2, 3]);
        assert_eq!(failure.errors[1].error.field(), Some("reference_paper_size"));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let failure = calculate_batch(&[], &PricingProfile::simple(), BatchPolicy::FailFast).unwrap_err();
        assert_eq!(failure.errors.len(), 1);
        assert_eq!(failure.errors[0].error, CostError::EmptyBatch);
    }

    #[test]
    fn test_single_book_batch_matches_single_calculation() {
        let profile = PricingProfile::simple();
        let input = book(160, 1000);
        let results = calculate_batch(std::slice::from_ref(&input), &profile, BatchPolicy::default()).unwrap();
        assert_eq!(results, vec![calculate(&input, &profile).unwrap()]);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(BatchPolicy::from_str_flexible("collect-all"), Some(BatchPolicy::CollectAll));
        assert_eq!(BatchPolicy::from_str_flexible("FAIL_FAST"), Some(BatchPolicy::FailFast));
        assert_eq!(BatchPolicy::from_str_flexible("sometimes"), None);
    }

    #[test]
    fn test_failure_message_and_serialization() {
        let failure = BatchFailure {
            errors: vec![ItemError::new(3, CostError::missing_field("page_count"))],
        };
        assert_eq!(
            failure.to_string(),
            "1 book(s) rejected; first: book #3: Missing required field: page_count"
        );
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["errors"][0]["index"], 3);
        assert_eq!(json["errors"][0]["error"]["type"], "MissingField");
    }
}
