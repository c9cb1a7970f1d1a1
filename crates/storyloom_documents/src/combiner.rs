//! Merges slide decks into one.

use crate::deck::{Deck, Picture, Shape, Slide, SlideLayout, SourcePicture, read_deck, write_deck};
use std::io::Write;
use std::path::{Path, PathBuf};
use storyloom_core::{DocumentFormat, DocumentHandle, LayoutConfig};
use storyloom_error::{DocumentError, DocumentErrorKind, StoryloomResult};
use storyloom_storage::{ensure_dir, list_files, write_atomic};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

/// Combines decks slide by slide.
///
/// Every source slide becomes one "title and content" slide: the text of all
/// its text shapes goes into the body placeholder and its pictures are
/// re-embedded at their original offset and extent. The combine is
/// all-or-nothing; any unreadable source aborts it before the output is written.
#[derive(Debug, Clone)]
pub struct DeckCombiner {
    layout: LayoutConfig,
}

/// Picture bytes parked in a temporary file for the duration of one insert.
///
/// The file is removed when this value drops, on success and on error alike.
struct ScopedImage {
    file: NamedTempFile,
}

impl ScopedImage {
    fn write(picture: &SourcePicture) -> StoryloomResult<Self> {
        let image_error =
            |e: std::io::Error| DocumentError::new(DocumentErrorKind::Image(e.to_string()));
        let suffix = if picture.extension().is_empty() {
            String::new()
        } else {
            format!(".{}", picture.extension())
        };
        let mut file = tempfile::Builder::new()
            .prefix("storyloom-")
            .suffix(&suffix)
            .tempfile()
            .map_err(image_error)?;
        file.write_all(picture.bytes()).map_err(image_error)?;
        file.flush().map_err(image_error)?;
        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }
}

impl DeckCombiner {
    /// Creates a combiner; text is set at the layout's font size and pictures
    /// without their own geometry use the layout's picture placement.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Combines `sources` in the given order into `output`.
    ///
    /// # Errors
    ///
    /// Fails with no output file if `sources` is empty, any source is not a
    /// readable deck, or the output cannot be written.
    #[instrument(skip(self, sources), fields(sources = sources.len(), output = %output.display()))]
    pub fn combine(&self, sources: &[PathBuf], output: &Path) -> StoryloomResult<DocumentHandle> {
        if sources.is_empty() {
            return Err(DocumentError::new(DocumentErrorKind::EmptySources(
                output.display().to_string(),
            ))
            .into());
        }

        let mut deck = Deck::new();
        for source in sources {
            let source_deck = read_deck(source)?;
            debug!(source = %source.display(), slides = source_deck.slides().len(), "Adding deck");

            for source_slide in source_deck.slides() {
                let mut slide = Slide::new(SlideLayout::TitleAndContent);
                if let Some(text) = source_slide.text() {
                    slide.push(Shape::Body(text));
                }
                for source_picture in source_slide.pictures() {
                    let geometry = source_picture
                        .geometry()
                        .unwrap_or(*self.layout.deck_picture());
                    let scoped = ScopedImage::write(source_picture)?;
                    let picture = Picture::from_file(scoped.path(), geometry)?;
                    slide.push(Shape::Picture(picture));
                }
                deck.push(slide);
            }
        }

        let bytes = write_deck(&deck, *self.layout.font_size_pt())?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        write_atomic(output, &bytes)?;

        info!(path = %output.display(), slides = deck.slides().len(), "Combined deck saved");
        Ok(DocumentHandle::new(output, DocumentFormat::Deck))
    }

    /// Combines every `.pptx` in `dir`, sorted by file name, into `output`.
    ///
    /// A previous combined deck at `output` inside `dir` is not treated as a source.
    pub fn combine_dir(&self, dir: &Path, output: &Path) -> StoryloomResult<DocumentHandle> {
        let sources: Vec<PathBuf> = list_files(dir, "pptx")?
            .into_iter()
            .filter(|path| !same_file(path, output))
            .collect();
        if sources.is_empty() {
            return Err(DocumentError::new(DocumentErrorKind::EmptySources(
                dir.display().to_string(),
            ))
            .into());
        }
        self.combine(&sources, output)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
