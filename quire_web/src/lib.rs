//! # quire_web
//!
//! HTTP front end for the cost engine. Accepts the order form's
//! url-encoded posts (one book, or several as `books[][field]` arrays) and
//! a JSON alternative, and answers with JSON estimates.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogFormat;

/// Initialize tracing/logging
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).json())
            .init(),
    }
}
