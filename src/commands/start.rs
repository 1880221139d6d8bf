use anyhow::{Context, Result};
use colored::Colorize;
use market_analysis::{config, dataset, init_tracing, server};
use std::path::Path;
use tracing::info;

/// Execute the start command
///
/// This will:
/// 1. Load configuration
/// 2. Initialize tracing with the configured level and format
/// 3. Load the dataset; any failure aborts before the listener is bound
/// 4. Start the server
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting market analysis API...".green());

    let cfg = config::load_config(config_path)?;
    init_tracing(&cfg.server.log_level, cfg.server.log_format == "json");

    info!(path = %cfg.dataset.path, "Loading dataset");
    let dataset = dataset::load_path(Path::new(&cfg.dataset.path))
        .with_context(|| format!("Failed to load dataset from {}", cfg.dataset.path))?;

    // Start the server (blocks until shutdown)
    server::start_server(cfg, dataset).await?;

    Ok(())
}
