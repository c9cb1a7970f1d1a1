//! Command handlers.
//!
//! Each handler prints a one-line summary per stage; per-item failures are
//! listed under it but do not fail the command.

use super::FormatArg;
use std::path::Path;
use storyloom::{
    Credentials, DocumentStage, Pipeline, StageReport, StoryloomConfig, StoryloomResult,
};
use tracing::info;

fn pipeline(config: StoryloomConfig) -> StoryloomResult<Pipeline> {
    let credentials = Credentials::from_env(config.illustration.provider)?;
    Pipeline::from_config(config, &credentials)
}

fn print_report(report: &StageReport) {
    println!("{report}");
    for failure in report.failed() {
        println!("  failed: {} ({})", failure.item(), failure.reason());
    }
}

/// Runs every stage.
pub async fn run(
    config: StoryloomConfig,
    themes: &Path,
    format: FormatArg,
    combine: bool,
) -> StoryloomResult<()> {
    let summary = pipeline(config)?
        .run(themes, &format.formats(), combine)
        .await?;
    summary.reports().iter().for_each(print_report);
    if let Some(combined) = summary.combined() {
        println!("combined: {}", combined.path().display());
    }
    Ok(())
}

/// Drafts stories for every theme.
pub async fn draft(config: StoryloomConfig, themes: &Path) -> StoryloomResult<()> {
    print_report(&pipeline(config)?.draft(themes).await?);
    Ok(())
}

/// Illustrates drafted stories.
pub async fn illustrate(config: StoryloomConfig) -> StoryloomResult<()> {
    print_report(&pipeline(config)?.illustrate().await?);
    Ok(())
}

/// Assembles documents for drafted stories.
pub fn assemble(config: &StoryloomConfig, format: FormatArg) -> StoryloomResult<()> {
    let stage = DocumentStage::new(config);
    for format in format.formats() {
        print_report(&stage.assemble_all(format)?);
    }
    Ok(())
}

/// Combines every deck.
pub fn combine(config: &StoryloomConfig, output: Option<&Path>) -> StoryloomResult<()> {
    let handle = DocumentStage::new(config).combine_all(output)?;
    println!("combined: {}", handle.path().display());
    Ok(())
}

/// Lists generated documents.
pub fn list(config: &StoryloomConfig, format: FormatArg) -> StoryloomResult<()> {
    let stage = DocumentStage::new(config);
    for format in format.formats() {
        let documents = stage.list(format)?;
        info!(%format, count = documents.len(), "Listing documents");
        if documents.is_empty() {
            println!("No {format} documents found.");
        }
        for path in documents {
            println!("{}", path.display());
        }
    }
    Ok(())
}
