use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use market_analysis::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // The start command initializes tracing itself, once the configured
    // log level and format are known
    let needs_early_tracing = !matches!(args.get_command(), cli::Commands::Start);
    if needs_early_tracing {
        init_tracing("info", false);
    }

    match args.get_command() {
        cli::Commands::Start => {
            commands::start::execute(&args.config).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("Market Analysis v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
