//! Story text plus available images to one PDF or deck.

use crate::deck::{Deck, Picture, Shape, Slide, SlideLayout, write_deck};
use crate::pdf::PdfWriter;
use crate::plan::DocumentPlan;
use std::path::{Path, PathBuf};
use storyloom_core::{Block, DocumentFormat, DocumentHandle, ImageFormat, LayoutConfig, StoryName};
use storyloom_error::{StorageError, StorageErrorKind, StoryloomResult};
use storyloom_storage::{ImageStore, StoryStore, ensure_dir, write_atomic};
use tracing::{debug, info, instrument, warn};

/// Builds documents from story files.
///
/// Output paths are a pure function of the story file name:
/// `<pdf_dir>/<stem>.pdf` and `<deck_dir>/<stem>.pptx`. Rebuilding overwrites.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use storyloom_core::{DocumentFormat, LayoutConfig};
/// use storyloom_documents::DocumentAssembler;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let assembler =
///     DocumentAssembler::new("out/images", "out/pdfs", "out/decks", LayoutConfig::default());
/// let story = Path::new("out/stories/story_1_brave_hanuman.txt");
/// let handle = assembler.assemble(story, DocumentFormat::Deck)?;
/// assert!(handle.path().ends_with("story_1_brave_hanuman.pptx"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    images: ImageStore,
    pdf_dir: PathBuf,
    deck_dir: PathBuf,
    layout: LayoutConfig,
}

impl DocumentAssembler {
    /// Creates an assembler reading images from `images_dir`.
    pub fn new(
        images_dir: impl Into<PathBuf>,
        pdf_dir: impl Into<PathBuf>,
        deck_dir: impl Into<PathBuf>,
        layout: LayoutConfig,
    ) -> Self {
        Self {
            images: ImageStore::at(images_dir),
            pdf_dir: pdf_dir.into(),
            deck_dir: deck_dir.into(),
            layout,
        }
    }

    /// Layout settings in use.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Directory documents of `format` are written to.
    pub fn output_dir(&self, format: DocumentFormat) -> &Path {
        match format {
            DocumentFormat::Pdf => &self.pdf_dir,
            DocumentFormat::Deck => &self.deck_dir,
        }
    }

    /// Where the document for `name` in `format` is written.
    pub fn output_path(&self, name: &StoryName, format: DocumentFormat) -> PathBuf {
        self.output_dir(format).join(name.document_file_name(format))
    }

    /// Reads the story and plans its blocks without writing anything.
    ///
    /// # Errors
    ///
    /// Fails if the story file cannot be read or has no usable file stem.
    pub fn plan(&self, story_path: &Path, format: DocumentFormat) -> StoryloomResult<DocumentPlan> {
        let name = StoryName::from_path(story_path).ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidPath(story_path.display().to_string()))
        })?;
        let text = StoryStore::read_story(story_path)?;
        let limit = match format {
            DocumentFormat::Pdf => *self.layout.pdf_images_per_story(),
            DocumentFormat::Deck => *self.layout.deck_images_per_story(),
        };
        let images = self.images.find_images(&name, limit);
        debug!(story = %name, images = images.len(), "Planned document");
        Ok(DocumentPlan::new(name, format, &text, &images, &self.layout))
    }

    /// Renders a plan to document bytes.
    pub fn render(&self, plan: &DocumentPlan) -> StoryloomResult<Vec<u8>> {
        match plan.format() {
            DocumentFormat::Pdf => {
                PdfWriter::new(self.layout.clone()).render(&plan.name().title(), plan.blocks())
            }
            DocumentFormat::Deck => {
                write_deck(&deck_from_blocks(plan.blocks()), *self.layout.font_size_pt())
            }
        }
    }

    /// Builds the document for one story and writes it atomically.
    ///
    /// # Errors
    ///
    /// An unreadable story or a failed write aborts this document only; nothing
    /// is left at the output path.
    #[instrument(skip(self), fields(story = %story_path.display()))]
    pub fn assemble(
        &self,
        story_path: &Path,
        format: DocumentFormat,
    ) -> StoryloomResult<DocumentHandle> {
        let plan = self.plan(story_path, format)?;
        let bytes = self.render(&plan)?;

        let path = self.output_path(plan.name(), format);
        ensure_dir(self.output_dir(format))?;
        write_atomic(&path, &bytes)?;

        match format {
            DocumentFormat::Pdf => info!(path = %path.display(), "PDF created"),
            DocumentFormat::Deck => info!(path = %path.display(), "Deck created"),
        }
        Ok(DocumentHandle::new(path, format))
    }
}

/// One slide per block: title slide, content slides, blank picture slides.
fn deck_from_blocks(blocks: &[Block]) -> Deck {
    let mut deck = Deck::new();
    for block in blocks {
        match block {
            Block::Title(title) => {
                let mut slide =
                    Slide::new(SlideLayout::Title).with(Shape::Title(title.title().clone()));
                if let Some(subtitle) = title.subtitle() {
                    slide.push(Shape::Subtitle(subtitle.clone()));
                }
                deck.push(slide);
            }
            Block::Text(text) => {
                deck.push(Slide::new(SlideLayout::TitleAndContent).with(Shape::Body(text.clone())));
            }
            Block::Image(image) => match Picture::from_file(image.path(), *image.geometry()) {
                Ok(picture) if ImageFormat::sniff(picture.bytes()).is_some() => {
                    deck.push(Slide::new(SlideLayout::Blank).with(Shape::Picture(picture)));
                }
                Ok(_) => warn!(path = %image.path().display(), "Not a recognised image, skipping"),
                Err(e) => {
                    warn!(path = %image.path().display(), error = %e, "Image unreadable, skipping")
                }
            },
        }
    }
    deck
}
