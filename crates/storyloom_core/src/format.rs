//! Output document formats and handles.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of document the assembler produces.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Paginated PDF with paragraph-level text blocks.
    #[display("pdf")]
    Pdf,
    /// Slide deck (PPTX) with word-count-bounded slides.
    #[display("deck")]
    Deck,
}

impl DocumentFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Deck => "pptx",
        }
    }
}

/// Reference to a document written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct DocumentHandle {
    /// Where the document was written.
    path: PathBuf,
    /// Format of the document.
    format: DocumentFormat,
}

impl DocumentHandle {
    /// Creates a handle for a written document.
    pub fn new(path: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}
