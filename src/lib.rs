pub mod analytics;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod estimator;
pub mod export;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod server;
pub mod signals;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over `default_level`. With `json` set, events
/// are written as one JSON object per line.
///
/// Note: This function can only be called once per process.
pub fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let (text_layer, json_layer) = if json {
        (None, Some(fmt::layer().json().with_target(true)))
    } else {
        (Some(fmt::layer().with_target(true)), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .init();
}
