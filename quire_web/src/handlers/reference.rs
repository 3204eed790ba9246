use axum::{extract::State, Json};
use serde::Serialize;

use quire_core::pricing::PricingProfile;
use quire_core::reference::ReferenceCatalog;

use crate::error::AppError;
use crate::server::AppState;

#[derive(Serialize)]
pub struct ReferenceResponse<'a> {
    #[serde(flatten)]
    pub catalog: &'a ReferenceCatalog,
    /// Profile the server estimates with
    pub profile: &'a PricingProfile,
}

/// Lookup tables for building the order form, plus the active rate card
pub async fn reference(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let response = ReferenceResponse {
        catalog: ReferenceCatalog::get(),
        profile: &state.profile,
    };
    Ok(Json(serde_json::to_value(&response)?))
}
