use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder and register metric descriptions
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "market_cache_lookups_total",
        "Result cache lookups by cache and outcome (hit/miss)"
    );
    describe_counter!(
        "market_cache_computations_total",
        "Underlying computations executed on behalf of the result cache"
    );
    describe_counter!(
        "market_estimator_requests_total",
        "Price estimator calls by outcome"
    );
    describe_histogram!(
        "market_estimator_duration_seconds",
        "Price estimator call duration in seconds"
    );
    describe_gauge!(
        "market_dataset_records",
        "Number of property records loaded"
    );
    describe_gauge!(
        "market_analysis_info",
        "Service version information"
    );

    gauge!("market_analysis_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a cache lookup
pub fn record_cache_lookup(cache: &'static str, hit: bool) {
    counter!(
        "market_cache_lookups_total",
        "cache" => cache,
        "outcome" => if hit { "hit" } else { "miss" },
    )
    .increment(1);
}

/// Record an executed cache computation
pub fn record_cache_computation(cache: &'static str) {
    counter!("market_cache_computations_total", "cache" => cache).increment(1);
}

/// Record an estimator call and its duration
pub fn record_estimator_request(outcome: &'static str, duration: Duration) {
    counter!("market_estimator_requests_total", "outcome" => outcome).increment(1);
    histogram!("market_estimator_duration_seconds", "outcome" => outcome)
        .record(duration.as_secs_f64());
}

/// Record the loaded dataset size
pub fn set_dataset_records(count: usize) {
    gauge!("market_dataset_records").set(count as f64);
}
