//! Layout blocks that make up a document.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Position and extent in English Metric Units (914400 per inch).
///
/// Slide pictures keep their source geometry across a combine, so geometry is
/// stored in the deck's native unit and converted for PDF output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Left offset
    pub x: i64,
    /// Top offset
    pub y: i64,
    /// Width
    pub width: i64,
    /// Height
    pub height: i64,
}

impl Geometry {
    /// Creates a geometry from EMU values.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Title with an optional subtitle line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct TitleBlock {
    /// Title text
    title: String,
    /// Subtitle text (deck title slides carry a story excerpt here)
    subtitle: Option<String>,
}

impl TitleBlock {
    /// Creates a title block.
    pub fn new(title: impl Into<String>, subtitle: Option<String>) -> Self {
        Self {
            title: title.into(),
            subtitle,
        }
    }
}

/// Image file placed at a fixed geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct ImageBlock {
    /// Image file on disk
    path: PathBuf,
    /// Placement (position is ignored by flowing PDF layout)
    geometry: Geometry,
}

impl ImageBlock {
    /// Creates an image block.
    pub fn new(path: impl Into<PathBuf>, geometry: Geometry) -> Self {
        Self {
            path: path.into(),
            geometry,
        }
    }
}

/// One layout unit within a document.
///
/// In a PDF a text block is one paragraph; in a deck each block becomes one slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::From)]
pub enum Block {
    /// Title (and subtitle)
    Title(TitleBlock),
    /// Body text
    Text(String),
    /// Image
    Image(ImageBlock),
}

impl Block {
    /// Body text if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Block::Text(text) => Some(text),
            _ => None,
        }
    }
}
