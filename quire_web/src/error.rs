use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::fmt;

use quire_core::calculations::{BatchFailure, ItemError};
use quire_core::errors::CostError;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// A single-book request was rejected
    Cost(CostError),
    /// One or more books of a batch request were rejected
    Batch(BatchFailure),
    /// Body could not be read as the expected JSON document
    MalformedBody(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cost(err) => write!(f, "{}", err),
            Self::Batch(failure) => write!(f, "{}", failure),
            Self::MalformedBody(msg) => write!(f, "Malformed request body: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Cost(err) => cost_status(err),
            Self::Batch(failure) => failure
                .first()
                .map(|item| cost_status(&item.error))
                .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY),
            Self::MalformedBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn cost_status(err: &CostError) -> StatusCode {
    match err {
        CostError::InvalidInput { .. } | CostError::MissingField { .. } | CostError::EmptyBatch => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CostError::ProfileNotFound { .. } => StatusCode::NOT_FOUND,
        CostError::ConfigError { .. } | CostError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_type_name(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNPROCESSABLE_ENTITY => "invalid_input",
        StatusCode::NOT_FOUND => "not_found",
        _ => "internal_error",
    }
}

fn item_json(item: &ItemError) -> Value {
    json!({
        "index": item.index,
        "code": item.error.error_code(),
        "field": item.error.field(),
        "message": item.error.to_string(),
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let mut error = json!({
            "type": error_type_name(status),
            "message": self.to_string(),
        });

        match &self {
            Self::Cost(err) => {
                error["code"] = json!(err.error_code());
                error["field"] = json!(err.field());
                error["errors"] = json!([{
                    "code": err.error_code(),
                    "field": err.field(),
                    "message": err.to_string(),
                }]);
            }
            Self::Batch(failure) => {
                if let Some(first) = failure.first() {
                    error["code"] = json!(first.error.error_code());
                    error["field"] = json!(first.error.field());
                    // An empty batch is not about any one book
                    if first.error != CostError::EmptyBatch {
                        error["index"] = json!(first.index);
                    }
                }
                error["errors"] = Value::Array(failure.errors.iter().map(item_json).collect());
            }
            Self::MalformedBody(_) | Self::InternalError(_) => {}
        }

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<CostError> for AppError {
    fn from(err: CostError) -> Self {
        Self::Cost(err)
    }
}

impl From<BatchFailure> for AppError {
    fn from(failure: BatchFailure) -> Self {
        Self::Batch(failure)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InternalError(format!("JSON error: {}", err))
    }
}
