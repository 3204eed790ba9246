//! # Order Form Decoding
//!
//! Turns the key/value pairs posted by the order form into
//! [`BookJobInput`]s, coercing each field to its numeric type.
//!
//! ## Single book
//!
//! One value per key: `num_pages`, `paper_size`, `final_book_size`,
//! `paper_weight_per_m2`, `num_books`, `num_colors`, `cover_type`,
//! `cover_price`, `profit_margin`, `paper_price_per_ton`, `waste`,
//! `num_moujalad`.
//!
//! ## Several books
//!
//! The same names wrapped as `books[][<name>]`, repeated once per book. The
//! n-th value of every key belongs to the n-th book; the number of books is
//! the number of `books[][num_pages]` values.
//!
//! ## Example
//!
//! ```rust
//! use quire_core::form::{decode_batch, FormFields};
//! use quire_core::calculations::BatchPolicy;
//!
//! let mut pairs = Vec::new();
//! for pages in ["160", "48"] {
//!     pairs.push(("books[][num_pages]", pages));
//!     pairs.push(("books[][paper_size]", "0.70 x 1.00"));
//!     pairs.push(("books[][final_book_size]", "17 x 24"));
//!     pairs.push(("books[][paper_weight_per_m2]", "80"));
//!     pairs.push(("books[][num_books]", "1000"));
//!     pairs.push(("books[][num_colors]", "4"));
//!     pairs.push(("books[][cover_price]", "1.0"));
//!     pairs.push(("books[][profit_margin]", "20"));
//!     pairs.push(("books[][paper_price_per_ton]", "900"));
//!     pairs.push(("books[][waste]", "50"));
//!     pairs.push(("books[][num_moujalad]", "1"));
//! }
//!
//! let fields = FormFields::from_pairs(pairs);
//! let books = decode_batch(&fields, BatchPolicy::FailFast).unwrap();
//! assert_eq!(books.len(), 2);
//! assert_eq!(books[1].page_count, 48);
//! ```

use std::collections::HashMap;

use crate::calculations::batch::{BatchFailure, BatchPolicy, ItemError};
use crate::calculations::book_cost::BookJobInput;
use crate::errors::{CostError, CostResult};

/// Form key → input field, for every field the order form posts
pub const FORM_FIELDS: [(&str, &str); 12] = [
    ("num_pages", "page_count"),
    ("paper_size", "reference_paper_size"),
    ("final_book_size", "final_trim_size"),
    ("paper_weight_per_m2", "paper_weight_per_area"),
    ("num_books", "print_run"),
    ("num_colors", "color_count"),
    ("cover_type", "cover_type"),
    ("cover_price", "cover_unit_price"),
    ("profit_margin", "profit_margin_percent"),
    ("paper_price_per_ton", "paper_price_per_ton"),
    ("waste", "waste_units"),
    ("num_moujalad", "cover_unit_count"),
];

/// Key whose value count decides how many books a batch form carries
pub const BATCH_COUNT_KEY: &str = "books[][num_pages]";

/// Wrap a form key the way the multi-book form names it
pub fn batch_key(key: &str) -> String {
    format!("books[][{}]", key)
}

/// Posted form values, keeping every value of repeated keys in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    values: HashMap<String, Vec<String>>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect decoded key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = FormFields::new();
        for (key, value) in pairs {
            fields.push(key, value);
        }
        fields
    }

    /// Append a value to a key
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// First value of a key
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// Every value of a key, in posted order
    pub fn all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// n-th value of a key
    pub fn nth(&self, key: &str, index: usize) -> Option<&str> {
        self.all(key).get(index).map(String::as_str)
    }

    /// Number of books posted by the multi-book form
    pub fn batch_len(&self) -> usize {
        self.all(BATCH_COUNT_KEY).len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Decode a single-book form.
pub fn decode_single(fields: &FormFields) -> CostResult<BookJobInput> {
    decode_record(|key| fields.first(key))
}

/// Decode a multi-book form into one input per book.
///
/// Field errors are attributed to the book they belong to. With
/// `FailFast` decoding stops at the first bad book.
pub fn decode_batch(fields: &FormFields, policy: BatchPolicy) -> Result<Vec<BookJobInput>, BatchFailure> {
    let count = fields.batch_len();
    if count == 0 {
        return Err(BatchFailure::whole_batch(CostError::EmptyBatch));
    }

    let mut inputs = Vec::with_capacity(count);
    let mut errors = Vec::new();

    for index in 0..count {
        match decode_record(|key| fields.nth(&batch_key(key), index)) {
            Ok(input) => inputs.push(input),
            Err(error) => {
                errors.push(ItemError::new(index, error));
                if policy == BatchPolicy::FailFast {
                    break;
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(inputs)
    } else {
        Err(BatchFailure { errors })
    }
}

fn decode_record<'a>(get: impl Fn(&str) -> Option<&'a str>) -> CostResult<BookJobInput> {
    Ok(BookJobInput {
        page_count: parse_count(required(&get, "num_pages", "page_count")?, "page_count")?,
        reference_paper_size: required(&get, "paper_size", "reference_paper_size")?.to_string(),
        final_trim_size: optional(&get, "final_book_size"),
        paper_weight_per_area: parse_real(
            required(&get, "paper_weight_per_m2", "paper_weight_per_area")?,
            "paper_weight_per_area",
        )?,
        print_run: parse_count(required(&get, "num_books", "print_run")?, "print_run")?,
        color_count: parse_count(required(&get, "num_colors", "color_count")?, "color_count")?,
        cover_unit_price: parse_real(required(&get, "cover_price", "cover_unit_price")?, "cover_unit_price")?,
        profit_margin_percent: parse_real(
            required(&get, "profit_margin", "profit_margin_percent")?,
            "profit_margin_percent",
        )?,
        paper_price_per_ton: parse_real(
            required(&get, "paper_price_per_ton", "paper_price_per_ton")?,
            "paper_price_per_ton",
        )?,
        waste_units: parse_count(required(&get, "waste", "waste_units")?, "waste_units")?,
        cover_unit_count: parse_count(required(&get, "num_moujalad", "cover_unit_count")?, "cover_unit_count")?,
        cover_type: optional(&get, "cover_type"),
    })
}

fn required<'a>(get: &impl Fn(&str) -> Option<&'a str>, key: &str, field: &str) -> CostResult<&'a str> {
    match get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CostError::missing_field(field)),
    }
}

fn optional<'a>(get: &impl Fn(&str) -> Option<&'a str>, key: &str) -> Option<String> {
    get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_count(raw: &str, field: &str) -> CostResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CostError::invalid_input(field, raw, "Expected a non-negative whole number"))
}

fn parse_real(raw: &str, field: &str) -> CostResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CostError::invalid_input(field, raw, "Expected a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("num_pages", "160"),
            ("paper_size", "0.70 x 1.00"),
            ("paper_weight_per_m2", "80"),
            ("num_books", "1000"),
            ("num_colors", "4"),
            ("cover_type", "مجلد"),
            ("cover_price", "1.0"),
            ("profit_margin", "20"),
            ("paper_price_per_ton", "900"),
            ("waste", "50"),
            ("num_moujalad", "1"),
        ]
    }

    fn batch_fields(books: usize) -> FormFields {
        let mut fields = FormFields::new();
        for i in 0..books {
            for (key, value) in single_pairs() {
                let value = if key == "num_pages" { (16 * (i + 1)).to_string() } else { value.to_string() };
                fields.push(batch_key(key), value);
            }
            fields.push(batch_key("final_book_size"), "17 x 24");
        }
        fields
    }

    #[test]
    fn test_decode_single() {
        let input = decode_single(&FormFields::from_pairs(single_pairs())).unwrap();
        assert_eq!(input.page_count, 160);
        assert_eq!(input.reference_paper_size, "0.70 x 1.00");
        assert_eq!(input.paper_weight_per_area, 80.0);
        assert_eq!(input.print_run, 1000);
        assert_eq!(input.color_count, 4);
        assert_eq!(input.cover_unit_price, 1.0);
        assert_eq!(input.profit_margin_percent, 20.0);
        assert_eq!(input.paper_price_per_ton, 900.0);
        assert_eq!(input.waste_units, 50);
        assert_eq!(input.cover_unit_count, 1);
        assert_eq!(input.cover_type.as_deref(), Some("مجلد"));
        assert_eq!(input.final_trim_size, None);
    }

    #[test]
    fn test_whitespace_tolerated_like_numeric_coercion() {
        let mut pairs = single_pairs();
        pairs[0] = ("num_pages", " 160 ");
        pairs[2] = ("paper_weight_per_m2", "80.5\n");
        let input = decode_single(&FormFields::from_pairs(pairs)).unwrap();
        assert_eq!(input.page_count, 160);
        assert_eq!(input.paper_weight_per_area, 80.5);
    }

    #[test]
    fn test_missing_field() {
        let pairs: Vec<_> = single_pairs().into_iter().filter(|(k, _)| *k != "num_books").collect();
        let err = decode_single(&FormFields::from_pairs(pairs)).unwrap_err();
        assert_eq!(err, CostError::missing_field("print_run"));
    }

    #[test]
    fn test_empty_value_is_missing() {
        let mut pairs = single_pairs();
        pairs[4] = ("num_colors", "  ");
        let err = decode_single(&FormFields::from_pairs(pairs)).unwrap_err();
        assert_eq!(err, CostError::missing_field("color_count"));
    }

    #[test]
    fn test_non_numeric_values() {
        let mut pairs = single_pairs();
        pairs[0] = ("num_pages", "160.5");
        let err = decode_single(&FormFields::from_pairs(pairs)).unwrap_err();
        assert_eq!(err.field(), Some("page_count"));

        let mut pairs = single_pairs();
        pairs[6] = ("cover_price", "one dollar");
        let err = decode_single(&FormFields::from_pairs(pairs)).unwrap_err();
        match err {
            CostError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "cover_unit_price");
                assert_eq!(value, "one dollar");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let mut pairs = single_pairs();
        pairs[9] = ("waste", "-5");
        let err = decode_single(&FormFields::from_pairs(pairs)).unwrap_err();
        assert_eq!(err.field(), Some("waste_units"));
    }

    #[test]
    fn test_decode_batch_positional() {
        let books = decode_batch(&batch_fields(3), BatchPolicy::FailFast).unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books.iter().map(|b| b.page_count).collect::<Vec<_>>(), vec![16, 32, 48]);
        assert!(books.iter().all(|b| b.final_trim_size.as_deref() == Some("17 x 24")));
    }

    #[test]
    fn test_decode_batch_short_array_reports_index() {
        let mut fields = batch_fields(2);
        fields.push(batch_key("num_pages"), "64");

        let failure = decode_batch(&fields, BatchPolicy::CollectAll).unwrap_err();
        assert_eq!(failure.indices(), vec![2]);
        assert_eq!(failure.errors[0].error, CostError::missing_field("reference_paper_size"));
    }

    #[test]
    fn test_decode_batch_policies() {
        let mut fields = FormFields::new();
        for (i, pages) in ["10", "x", "30", "y"].iter().enumerate() {
            for (key, value) in single_pairs() {
                let value = if key == "num_pages" { pages.to_string() } else { value.to_string() };
                fields.push(batch_key(key), value);
            }
            assert_eq!(fields.batch_len(), i + 1);
        }

        let fast = decode_batch(&fields, BatchPolicy::FailFast).unwrap_err();
        assert_eq!(fast.indices(), vec![1]);

        let all = decode_batch(&fields, BatchPolicy::CollectAll).unwrap_err();
        assert_eq!(all.indices(), vec![1, 3]);
        assert!(all.errors.iter().all(|e| e.error.field() == Some("page_count")));
    }

    #[test]
    fn test_decode_batch_empty() {
        let failure = decode_batch(&FormFields::from_pairs(single_pairs()), BatchPolicy::FailFast).unwrap_err();
        assert_eq!(failure.errors[0].error, CostError::EmptyBatch);
    }

    #[test]
    fn test_form_field_table_covers_input() {
        let input = decode_single(&FormFields::from_pairs(single_pairs())).unwrap();
        let json = serde_json::to_value(&input).unwrap();
        for (_, field) in FORM_FIELDS {
            if field == "final_trim_size" {
                continue;
            }
            assert!(json.get(field).is_some(), "{field} missing from BookJobInput");
        }
    }
}
