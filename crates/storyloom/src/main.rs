//! Storyloom CLI binary.
//!
//! Runs the story pipeline end to end or one stage at a time:
//! - Draft stories from a theme spreadsheet
//! - Illustrate drafted stories
//! - Assemble PDFs and slide decks, and combine decks
//! - List generated documents

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    let cli = Cli::parse();

    // RUST_LOG applies unless --verbose asks for debug output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = storyloom::StoryloomConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            themes,
            format,
            combine,
        } => cli::run(config, &themes, format, combine).await?,
        Commands::Draft { themes } => cli::draft(config, &themes).await?,
        Commands::Illustrate => cli::illustrate(config).await?,
        Commands::Assemble { format } => cli::assemble(&config, format)?,
        Commands::Combine { output } => cli::combine(&config, output.as_deref())?,
        Commands::List { format } => cli::list(&config, format)?,
    }

    Ok(())
}
