//! # Error Types
//!
//! Structured error types for quire_core. Every failure names the field it
//! came from so a front end can point the user at the offending input
//! instead of showing an opaque message.
//!
//! ## Example
//!
//! ```rust
//! use quire_core::errors::{CostError, CostResult};
//!
//! fn validate_print_run(print_run: u32) -> CostResult<()> {
//!     if print_run == 0 {
//!         return Err(CostError::InvalidInput {
//!             field: "print_run".to_string(),
//!             value: print_run.to_string(),
//!             reason: "Print run must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quire_core operations
pub type CostResult<T> = Result<T, CostError>;

/// Structured error type for estimate operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CostError {
    /// An input value is malformed, non-numeric or out of range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A batch request carried no books
    #[error("Batch contains no books")]
    EmptyBatch,

    /// Named pricing profile does not exist
    #[error("Pricing profile not found: {name}")]
    ProfileNotFound { name: String },

    /// Pricing profile or settings could not be read or are inconsistent
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CostError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CostError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CostError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ProfileNotFound error
    pub fn profile_not_found(name: impl Into<String>) -> Self {
        CostError::ProfileNotFound { name: name.into() }
    }

    /// Create a ConfigError
    pub fn config(reason: impl Into<String>) -> Self {
        CostError::ConfigError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the submitted book parameters
    pub fn is_input_error(&self) -> bool {
        matches!(self, CostError::InvalidInput { .. } | CostError::MissingField { .. })
    }

    /// The input field this error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CostError::InvalidInput { field, .. } | CostError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CostError::InvalidInput { .. } => "INVALID_INPUT",
            CostError::MissingField { .. } => "MISSING_FIELD",
            CostError::EmptyBatch => "EMPTY_BATCH",
            CostError::ProfileNotFound { .. } => "PROFILE_NOT_FOUND",
            CostError::ConfigError { .. } => "CONFIG_ERROR",
            CostError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CostError {
    fn from(err: serde_json::Error) -> Self {
        CostError::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CostError {
    fn from(err: toml::de::Error) -> Self {
        CostError::SerializationError {
            reason: err.to_string(),
        }
    }
}
