//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storyloom::DocumentFormat;
use strum::IntoEnumIterator;

/// Storyloom - themed children's stories as illustrated PDFs and slide decks
#[derive(Parser, Debug)]
#[command(name = "storyloom")]
#[command(
    about = "Themed children's stories as illustrated PDFs and slide decks",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draft, illustrate and assemble stories for every theme
    Run {
        /// Spreadsheet (.xlsx or .csv) with a theme column
        #[arg(long)]
        themes: PathBuf,

        /// Documents to build
        #[arg(long, value_enum, default_value = "pdf")]
        format: FormatArg,

        /// Combine the built decks into one
        #[arg(long)]
        combine: bool,
    },

    /// Draft one story per theme
    Draft {
        /// Spreadsheet (.xlsx or .csv) with a theme column
        #[arg(long)]
        themes: PathBuf,
    },

    /// Illustrate every drafted story
    Illustrate,

    /// Assemble documents for every drafted story
    Assemble {
        /// Documents to build
        #[arg(long, value_enum, default_value = "pdf")]
        format: FormatArg,
    },

    /// Combine every slide deck into one
    Combine {
        /// Output deck (defaults to the configured combined deck)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List generated documents
    List {
        /// Documents to list
        #[arg(long, value_enum, default_value = "both")]
        format: FormatArg,
    },
}

/// Document format selection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// PDF documents
    Pdf,
    /// Slide decks
    Deck,
    /// Both PDFs and slide decks
    Both,
}

impl FormatArg {
    /// Formats selected, PDF first.
    pub fn formats(self) -> Vec<DocumentFormat> {
        match self {
            FormatArg::Pdf => vec![DocumentFormat::Pdf],
            FormatArg::Deck => vec![DocumentFormat::Deck],
            FormatArg::Both => DocumentFormat::iter().collect(),
        }
    }
}
