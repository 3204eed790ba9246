//! Estimate endpoints
//!
//! `/calculate` and `/calculate_multiple` take the order form's
//! url-encoded bodies; `/api/estimate` takes the same books as JSON.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use url::form_urlencoded;

use quire_core::calculations::{calculate, calculate_batch, BatchPolicy, BookJobInput};
use quire_core::errors::CostError;
use quire_core::form::{decode_batch, decode_single, FormFields};

use crate::error::AppError;
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    /// `fail_fast` (default) or `collect_all`
    pub policy: Option<String>,
}

impl BatchQuery {
    fn policy(&self) -> Result<BatchPolicy, AppError> {
        match self.policy.as_deref() {
            None => Ok(BatchPolicy::default()),
            Some(raw) => BatchPolicy::from_str_flexible(raw)
                .ok_or_else(|| CostError::invalid_input("policy", raw, "Expected fail_fast or collect_all").into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub books: Vec<BookJobInput>,
    #[serde(default)]
    pub policy: Option<BatchPolicy>,
}

fn form_fields(body: &[u8]) -> FormFields {
    FormFields::from_pairs(form_urlencoded::parse(body))
}

/// Single book from the order form
pub async fn calculate_single(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, AppError> {
    let input = decode_single(&form_fields(&body))?;
    let result = calculate(&input, &state.profile)?;

    tracing::info!(pages = input.page_count, copies = input.print_run, final_price = result.final_price, "Estimated book");
    Ok(Json(json!({ "result": result })))
}

/// Several books from the order form's `books[][field]` arrays
pub async fn calculate_multiple(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let policy = query.policy()?;
    let inputs = decode_batch(&form_fields(&body), policy)?;
    let results = calculate_batch(&inputs, &state.profile, policy)?;

    tracing::info!(count = results.len(), "Estimated batch");
    Ok(Json(json!({ "count": results.len(), "results": results })))
}

/// Several books as a JSON document
pub async fn api_estimate(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
    let policy = request.policy.unwrap_or_default();
    let results = calculate_batch(&request.books, &state.profile, policy)?;

    tracing::info!(count = results.len(), "Estimated batch");
    Ok(Json(json!({ "count": results.len(), "results": results })))
}
