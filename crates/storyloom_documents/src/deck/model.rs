//! In-memory slide deck.

use std::path::Path;
use storyloom_core::{Geometry, ImageFormat};
use storyloom_error::{DocumentError, DocumentErrorKind, StoryloomResult};

/// Slide layouts provided by the generated slide master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideLayout {
    /// Centred title with a subtitle
    Title,
    /// Title and one body placeholder
    TitleAndContent,
    /// No placeholders
    Blank,
}

impl SlideLayout {
    /// 1-based index of the layout part.
    pub(crate) fn part_index(&self) -> usize {
        match self {
            SlideLayout::Title => 1,
            SlideLayout::TitleAndContent => 2,
            SlideLayout::Blank => 3,
        }
    }
}

/// Embedded picture bytes with their placement.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Picture {
    /// Encoded image
    bytes: Vec<u8>,
    /// File extension used for the media part
    extension: String,
    /// Placement in EMU
    geometry: Geometry,
}

impl Picture {
    /// Wraps image bytes. The extension is taken from the image signature when
    /// recognised, otherwise from `fallback_extension`.
    pub fn new(bytes: Vec<u8>, fallback_extension: &str, geometry: Geometry) -> Self {
        let extension = ImageFormat::sniff(&bytes)
            .map(|format| format.extension().to_string())
            .unwrap_or_else(|| fallback_extension.to_ascii_lowercase());
        Self {
            bytes,
            extension,
            geometry,
        }
    }

    /// Reads an image file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read.
    pub fn from_file(path: &Path, geometry: Geometry) -> StoryloomResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            DocumentError::new(DocumentErrorKind::Image(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("png");
        Ok(Self::new(bytes, extension, geometry))
    }

    /// MIME type of the media part.
    pub fn content_type(&self) -> &'static str {
        match self.extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "tif" | "tiff" => "image/tiff",
            "emf" => "image/x-emf",
            "wmf" => "image/x-wmf",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}

/// One shape on a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Title placeholder
    Title(String),
    /// Subtitle placeholder of a title slide
    Subtitle(String),
    /// Body placeholder; each line becomes a paragraph
    Body(String),
    /// Picture
    Picture(Picture),
}

/// A slide: a layout and its shapes in z-order.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Slide {
    /// Layout the slide is based on
    layout: SlideLayout,
    /// Shapes back to front
    shapes: Vec<Shape>,
}

impl Slide {
    /// Empty slide on `layout`.
    pub fn new(layout: SlideLayout) -> Self {
        Self {
            layout,
            shapes: Vec::new(),
        }
    }

    /// Adds a shape on top.
    pub fn with(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Adds a shape on top.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

/// An ordered list of slides.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct Deck {
    /// Slides in presentation order
    slides: Vec<Slide>,
}

impl Deck {
    /// Empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slide.
    pub fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }
}
