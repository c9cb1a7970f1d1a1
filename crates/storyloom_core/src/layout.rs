//! Layout settings shared by every generated document.

use crate::Geometry;
use serde::{Deserialize, Serialize};

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// English Metric Units per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// Layout settings for assembled documents.
///
/// All title and body text is rendered at `font_size_pt`, which keeps every
/// generated document visually consistent.
///
/// # Examples
///
/// ```
/// use storyloom_core::LayoutConfig;
///
/// let layout = LayoutConfig::builder().max_words_per_slide(300).build();
/// assert_eq!(*layout.max_words_per_slide(), 300);
/// assert_eq!(*layout.font_size_pt(), 12.0);
/// assert!(layout.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Upper bound on words per content slide (default 450).
    #[serde(default = "default_max_words_per_slide")]
    max_words_per_slide: usize,

    /// Point size for all title and body text (default 12).
    #[serde(default = "default_font_size_pt")]
    font_size_pt: f32,

    /// Characters of raw story text used as the deck subtitle (default 100).
    #[serde(default = "default_subtitle_chars")]
    subtitle_chars: usize,

    /// Candidate images looked up per story for PDFs (default 2).
    #[serde(default = "default_pdf_images")]
    pdf_images_per_story: usize,

    /// Candidate images looked up per story for decks (default 1).
    #[serde(default = "default_deck_images")]
    deck_images_per_story: usize,

    /// Vertical space after each PDF paragraph and image, in points (default 12).
    #[serde(default = "default_spacing_pt")]
    paragraph_spacing_pt: f32,

    /// PDF image width in points (default 400).
    #[serde(default = "default_pdf_image_width")]
    pdf_image_width_pt: f32,

    /// PDF image height in points (default 300).
    #[serde(default = "default_pdf_image_height")]
    pdf_image_height_pt: f32,

    /// Placement of the picture on a deck's image slide (default 1in, 1in, 6in × 4.5in).
    #[serde(default = "default_deck_picture")]
    deck_picture: Geometry,
}

fn default_max_words_per_slide() -> usize {
    450
}

fn default_font_size_pt() -> f32 {
    12.0
}

fn default_subtitle_chars() -> usize {
    100
}

fn default_pdf_images() -> usize {
    2
}

fn default_deck_images() -> usize {
    1
}

fn default_spacing_pt() -> f32 {
    12.0
}

fn default_pdf_image_width() -> f32 {
    400.0
}

fn default_pdf_image_height() -> f32 {
    300.0
}

fn default_deck_picture() -> Geometry {
    Geometry::new(EMU_PER_INCH, EMU_PER_INCH, 6 * EMU_PER_INCH, EMU_PER_INCH * 9 / 2)
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LayoutConfig {
    /// Creates a new layout config builder.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }

    /// Validates that sizes and counts are usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_words_per_slide == 0 {
            return Err("max_words_per_slide must be at least 1".to_string());
        }
        if self.font_size_pt <= 0.0 {
            return Err(format!(
                "font_size_pt must be positive, got {}",
                self.font_size_pt
            ));
        }
        if self.paragraph_spacing_pt < 0.0 {
            return Err(format!(
                "paragraph_spacing_pt must not be negative, got {}",
                self.paragraph_spacing_pt
            ));
        }
        if self.pdf_image_width_pt <= 0.0 || self.pdf_image_height_pt <= 0.0 {
            return Err("PDF image size must be positive".to_string());
        }
        if self.deck_picture.width <= 0 || self.deck_picture.height <= 0 {
            return Err("deck picture size must be positive".to_string());
        }
        Ok(())
    }
}

/// Builder for `LayoutConfig`.
#[derive(Debug, Default)]
pub struct LayoutConfigBuilder {
    max_words_per_slide: Option<usize>,
    font_size_pt: Option<f32>,
    subtitle_chars: Option<usize>,
    pdf_images_per_story: Option<usize>,
    deck_images_per_story: Option<usize>,
    paragraph_spacing_pt: Option<f32>,
    pdf_image_width_pt: Option<f32>,
    pdf_image_height_pt: Option<f32>,
    deck_picture: Option<Geometry>,
}

impl LayoutConfigBuilder {
    /// Sets the word limit per content slide.
    pub fn max_words_per_slide(mut self, value: usize) -> Self {
        self.max_words_per_slide = Some(value);
        self
    }

    /// Sets the text point size.
    pub fn font_size_pt(mut self, value: f32) -> Self {
        self.font_size_pt = Some(value);
        self
    }

    /// Sets the subtitle excerpt length.
    pub fn subtitle_chars(mut self, value: usize) -> Self {
        self.subtitle_chars = Some(value);
        self
    }

    /// Sets how many images a PDF looks for.
    pub fn pdf_images_per_story(mut self, value: usize) -> Self {
        self.pdf_images_per_story = Some(value);
        self
    }

    /// Sets how many images a deck looks for.
    pub fn deck_images_per_story(mut self, value: usize) -> Self {
        self.deck_images_per_story = Some(value);
        self
    }

    /// Sets the spacing after PDF paragraphs.
    pub fn paragraph_spacing_pt(mut self, value: f32) -> Self {
        self.paragraph_spacing_pt = Some(value);
        self
    }

    /// Sets the PDF image size in points.
    pub fn pdf_image_size_pt(mut self, width: f32, height: f32) -> Self {
        self.pdf_image_width_pt = Some(width);
        self.pdf_image_height_pt = Some(height);
        self
    }

    /// Sets the deck image slide picture geometry.
    pub fn deck_picture(mut self, value: Geometry) -> Self {
        self.deck_picture = Some(value);
        self
    }

    /// Builds the `LayoutConfig`.
    pub fn build(self) -> LayoutConfig {
        LayoutConfig {
            max_words_per_slide: self
                .max_words_per_slide
                .unwrap_or_else(default_max_words_per_slide),
            font_size_pt: self.font_size_pt.unwrap_or_else(default_font_size_pt),
            subtitle_chars: self.subtitle_chars.unwrap_or_else(default_subtitle_chars),
            pdf_images_per_story: self.pdf_images_per_story.unwrap_or_else(default_pdf_images),
            deck_images_per_story: self
                .deck_images_per_story
                .unwrap_or_else(default_deck_images),
            paragraph_spacing_pt: self.paragraph_spacing_pt.unwrap_or_else(default_spacing_pt),
            pdf_image_width_pt: self
                .pdf_image_width_pt
                .unwrap_or_else(default_pdf_image_width),
            pdf_image_height_pt: self
                .pdf_image_height_pt
                .unwrap_or_else(default_pdf_image_height),
            deck_picture: self.deck_picture.unwrap_or_else(default_deck_picture),
        }
    }
}
