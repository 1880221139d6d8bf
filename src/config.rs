use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Origins allowed to call the API from a browser
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            cors_allowed_origins: default_cors_allowed_origins(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    /// Housing CSV loaded at startup
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimatorConfig {
    /// Full URL of the prediction endpoint
    #[serde(default = "default_estimator_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_estimator_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_estimator_endpoint(),
            timeout_seconds: default_estimator_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_endpoint")]
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            endpoint: default_metrics_endpoint(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_dataset_path() -> String {
    "data/housing.csv".to_string()
}

fn default_estimator_endpoint() -> String {
    "http://localhost:8000/predict".to_string()
}

fn default_estimator_timeout() -> u64 {
    5
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_endpoint() -> String {
    "/metrics".to_string()
}

/// Load configuration from `path` (optional TOML file) overlaid with
/// `MARKET_ANALYSIS__SECTION__KEY` environment variables.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("MARKET_ANALYSIS").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        anyhow::bail!("Server port must be non-zero");
    }

    if !matches!(cfg.server.log_format.as_str(), "text" | "json") {
        anyhow::bail!(
            "Invalid log format '{}': expected 'text' or 'json'",
            cfg.server.log_format
        );
    }

    if cfg.dataset.path.trim().is_empty() {
        anyhow::bail!("Dataset path cannot be empty");
    }

    let endpoint = reqwest::Url::parse(&cfg.estimator.endpoint).map_err(|e| {
        anyhow::anyhow!("Invalid estimator endpoint '{}': {}", cfg.estimator.endpoint, e)
    })?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        anyhow::bail!(
            "Estimator endpoint must use http or https, got '{}'",
            endpoint.scheme()
        );
    }

    if !(1..=300).contains(&cfg.estimator.timeout_seconds) {
        anyhow::bail!(
            "Estimator timeout must be between 1 and 300 seconds, got {}",
            cfg.estimator.timeout_seconds
        );
    }

    if cfg.metrics.enabled && !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!("Metrics endpoint must start with '/'");
    }

    Ok(())
}
