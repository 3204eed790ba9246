use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use quire_core::pricing::PricingProfile;

use crate::config::Config;
use crate::handlers;

/// Order forms are small; anything past this is not a form
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared, read-only request state
#[derive(Debug, Clone)]
pub struct AppState {
    pub profile: Arc<PricingProfile>,
}

impl AppState {
    pub fn new(profile: PricingProfile) -> Self {
        AppState {
            profile: Arc::new(profile),
        }
    }
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/reference", get(handlers::reference::reference))
        .route("/calculate", post(handlers::estimate::calculate_single))
        .route("/calculate_multiple", post(handlers::estimate::calculate_multiple))
        .route("/api/estimate", post(handlers::estimate::api_estimate))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &Config, profile: PricingProfile) -> anyhow::Result<()> {
    info!(
        profile = %profile.name,
        variant = %profile.variant(),
        shipping_cost_per_kg = profile.shipping_cost_per_kg,
        "Pricing profile ready"
    );

    let app = create_router(AppState::new(profile));
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
