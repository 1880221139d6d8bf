use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    config::Config,
    dataset::Dataset,
    estimator::HttpPricePredictor,
    handlers::{self, AppState},
    metrics,
    signals::shutdown_signal,
};

/// Start the market analysis server
///
/// This function:
/// 1. Initializes metrics (if enabled)
/// 2. Wires the estimator and result cache around the loaded dataset
/// 3. Binds to the configured address
/// 4. Serves requests until SIGTERM/SIGINT, then drains connections
pub async fn start_server(config: Config, dataset: Dataset) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };
    metrics::set_dataset_records(dataset.len());

    let state = build_state(&config, dataset)?;
    let app = create_router(&config, state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting market analysis API on {}", addr);
    info!(
        estimator = %config.estimator.endpoint,
        timeout_seconds = config.estimator.timeout_seconds,
        "Estimator configured"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Assemble shared state: dataset, result cache and HTTP-backed estimator
pub fn build_state(config: &Config, dataset: Dataset) -> Result<AppState> {
    let dataset = Arc::new(dataset);
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.estimator.timeout_seconds))
        .build()?;
    let predictor = HttpPricePredictor::new(
        http_client,
        config.estimator.endpoint.clone(),
        Duration::from_secs(config.estimator.timeout_seconds),
    );

    Ok(AppState::new(dataset, Arc::new(predictor)))
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    config: &Config,
    state: AppState,
    metrics_handle: Option<Arc<PrometheusHandle>>,
) -> Router {
    let mut app = Router::new()
        .route("/market/health", get(handlers::market::health))
        .route("/market/summary", get(handlers::market::summary))
        .route("/market/segments", get(handlers::market::segments))
        .route(
            "/market/distribution/bedrooms",
            get(handlers::market::bedroom_distribution),
        )
        .route("/market/what-if", post(handlers::market::what_if))
        .route("/market/export", get(handlers::export::export))
        .route("/health", get(handlers::health::health_check))
        .with_state(state);

    if let Some(handle) = metrics_handle {
        app = app.merge(
            Router::new()
                .route(&config.metrics.endpoint, get(handlers::metrics_handler::metrics))
                .with_state(handle),
        );
    }

    app
        // what-if bodies are a handful of numbers
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(cors_layer(&config.server.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // tower-http refuses "*" inside an origin list
    if origins.iter().any(|origin| origin.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(allowed)
}
