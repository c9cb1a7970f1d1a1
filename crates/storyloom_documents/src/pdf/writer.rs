//! Flowing PDF layout on US Letter pages.

use genpdf::elements::{Break, Image, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, Margins, PaperSize, Scale, SimplePageDecorator};
use image::GenericImageView;
use storyloom_core::{Block, EMU_PER_POINT, ImageBlock, LayoutConfig, TitleBlock};
use storyloom_error::{DocumentError, DocumentErrorKind, StoryloomResult};
use tracing::{debug, warn};

const REGULAR_FONT: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");
const BOLD_FONT: &[u8] = include_bytes!("../../fonts/DejaVuSans-Bold.ttf");

/// One inch.
const MARGIN_MM: f64 = 25.4;
/// Text frame width of a Letter page inside the margins, in points.
const FRAME_WIDTH_PT: f64 = 612.0 - 144.0;
/// Text frame height of a Letter page inside the margins, in points.
const FRAME_HEIGHT_PT: f64 = 792.0 - 144.0;
/// Renders one image pixel per point before scaling.
const IMAGE_DPI: f64 = 72.0;

fn pdf_error(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::new(DocumentErrorKind::Pdf(e.to_string()))
}

/// Renders block sequences to PDF bytes.
///
/// Text flows inside 1 inch margins in the bundled DejaVu Sans at the
/// configured size; the title is set in the bold face at the same size.
/// Every block is followed by a break of the configured spacing and images
/// are centred horizontally. Pagination is left to `genpdf`.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    layout: LayoutConfig,
}

impl PdfWriter {
    /// Creates a writer for the given layout.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    fn font_family() -> StoryloomResult<FontFamily<FontData>> {
        let regular = FontData::new(REGULAR_FONT.to_vec(), None).map_err(pdf_error)?;
        let bold = FontData::new(BOLD_FONT.to_vec(), None).map_err(pdf_error)?;
        Ok(FontFamily {
            italic: regular.clone(),
            bold_italic: bold.clone(),
            regular,
            bold,
        })
    }

    /// Vertical spacing after each block, in lines of body text.
    fn spacing_lines(&self) -> f64 {
        f64::from(*self.layout.paragraph_spacing_pt()) / f64::from(*self.layout.font_size_pt())
    }

    fn push_title(&self, doc: &mut Document, title: &TitleBlock) {
        doc.push(
            Paragraph::new(title.title().clone())
                .aligned(Alignment::Center)
                .styled(Style::new().bold()),
        );
        doc.push(Break::new(self.spacing_lines()));
        if let Some(subtitle) = title.subtitle() {
            doc.push(Paragraph::new(subtitle.clone()).aligned(Alignment::Center));
            doc.push(Break::new(self.spacing_lines()));
        }
    }

    fn push_image(&self, doc: &mut Document, block: &ImageBlock) {
        let decoded = match std::fs::read(block.path())
            .map_err(|e| e.to_string())
            .and_then(|bytes| image::load_from_memory(&bytes).map_err(|e| e.to_string()))
        {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(path = %block.path().display(), error = %e, "Image unreadable, skipping");
                return;
            }
        };

        let (pixels_wide, pixels_high) = decoded.dimensions();
        if pixels_wide == 0 || pixels_high == 0 {
            warn!(path = %block.path().display(), "Image is empty, skipping");
            return;
        }

        let mut width = block.geometry().width as f64 / EMU_PER_POINT as f64;
        let mut height = block.geometry().height as f64 / EMU_PER_POINT as f64;
        let fit = (FRAME_WIDTH_PT / width).min(FRAME_HEIGHT_PT / height).min(1.0);
        width *= fit;
        height *= fit;

        // genpdf rejects images with an alpha channel.
        let flattened = image::DynamicImage::ImageRgb8(decoded.to_rgb8());
        let element = match Image::from_dynamic_image(flattened) {
            Ok(element) => element
                .with_dpi(IMAGE_DPI)
                .with_scale(Scale::new(
                    width / f64::from(pixels_wide),
                    height / f64::from(pixels_high),
                ))
                .with_alignment(Alignment::Center),
            Err(e) => {
                warn!(
                    path = %block.path().display(),
                    error = %e,
                    "Image could not be embedded, skipping"
                );
                return;
            }
        };

        doc.push(element);
        doc.push(Break::new(self.spacing_lines()));
        debug!(path = %block.path().display(), width, height, "Image placed");
    }

    /// Renders `blocks` to PDF bytes, using `title` as the document title.
    ///
    /// Images that cannot be read or decoded are skipped with a warning.
    pub fn render(&self, title: &str, blocks: &[Block]) -> StoryloomResult<Vec<u8>> {
        let mut doc = Document::new(Self::font_family()?);
        doc.set_title(title);
        doc.set_paper_size(PaperSize::Letter);
        doc.set_font_size(self.layout.font_size_pt().round() as u8);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::all(MARGIN_MM));
        doc.set_page_decorator(decorator);

        for block in blocks {
            match block {
                Block::Title(title) => self.push_title(&mut doc, title),
                Block::Text(text) => {
                    doc.push(Paragraph::new(text.clone()));
                    doc.push(Break::new(self.spacing_lines()));
                }
                Block::Image(image) => self.push_image(&mut doc, image),
            }
        }

        let mut bytes = Vec::new();
        doc.render(&mut bytes).map_err(pdf_error)?;
        debug!(bytes = bytes.len(), "PDF rendered");
        Ok(bytes)
    }
}
