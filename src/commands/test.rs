use anyhow::{Context, Result};
use colored::Colorize;
use market_analysis::{analytics, config, dataset};
use std::path::Path;
use tracing::info;

/// Execute the test command
///
/// Validates the configuration and loads the dataset without starting the server
pub fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Testing configuration...".yellow());
    info!("Loading and validating configuration");

    let cfg = config::load_config(config_path)?;
    let dataset = dataset::load_path(Path::new(&cfg.dataset.path))
        .with_context(|| format!("Failed to load dataset from {}", cfg.dataset.path))?;

    println!("{}", "✓ Configuration test successful".green());
    println!();

    println!("{}", "Configuration Summary:".bold());
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    println!("  {}: {}", "Log Level".cyan(), cfg.server.log_level);
    println!("  {}: {}", "Log Format".cyan(), cfg.server.log_format);
    println!(
        "  {}: {}",
        "CORS Origins".cyan(),
        cfg.server.cors_allowed_origins.join(", ")
    );
    println!();

    let summary = analytics::summarize(dataset.records());
    println!("  {}: {}", "Dataset".cyan(), cfg.dataset.path);
    println!("    Records: {}", summary.total_count);
    if summary.total_count > 0 {
        println!(
            "    Price: min {:.2} / median {:.2} / max {:.2} / avg {:.2}",
            summary.min_price, summary.median_price, summary.max_price, summary.avg_price
        );
    } else {
        println!("    {}", "(empty dataset)".dimmed());
    }
    println!();

    println!(
        "  {}: {} (timeout {}s)",
        "Estimator".cyan(),
        cfg.estimator.endpoint,
        cfg.estimator.timeout_seconds
    );
    println!("  {}: {}", "Metrics".cyan(), if cfg.metrics.enabled {
        "enabled".green()
    } else {
        "disabled".red()
    });
    if cfg.metrics.enabled {
        println!("    Endpoint: {}", cfg.metrics.endpoint);
    }

    info!("Configuration validation completed successfully");
    Ok(())
}
