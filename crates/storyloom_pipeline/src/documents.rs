//! Document stages: per-story assembly, deck combination and listing.
//!
//! None of these touch a remote service, so they need no credentials.

use crate::{PathsConfig, Stage, StageReport, StoryloomConfig};
use std::path::{Path, PathBuf};
use storyloom_core::{DocumentFormat, DocumentHandle};
use storyloom_documents::{DeckCombiner, DocumentAssembler};
use storyloom_error::StoryloomResult;
use storyloom_storage::list_files;
use tracing::{info, instrument, warn};

/// Assembly and combination over the configured directories.
#[derive(Debug, Clone)]
pub struct DocumentStage {
    paths: PathsConfig,
    assembler: DocumentAssembler,
    combiner: DeckCombiner,
}

impl DocumentStage {
    /// Builds the stage from configuration.
    pub fn new(config: &StoryloomConfig) -> Self {
        let paths = config.paths.clone();
        let assembler = DocumentAssembler::new(
            paths.images_dir.clone(),
            paths.pdfs_dir.clone(),
            paths.decks_dir.clone(),
            config.layout.clone(),
        );
        Self {
            paths,
            assembler,
            combiner: DeckCombiner::new(config.layout.clone()),
        }
    }

    /// Every story in the stories directory, sorted by file name.
    pub fn stories(&self) -> StoryloomResult<Vec<PathBuf>> {
        list_files(&self.paths.stories_dir, "txt")
    }

    /// Assembles one document per story.
    ///
    /// A story that fails to build is logged and recorded; the others are
    /// still assembled.
    #[instrument(skip(self, stories), fields(stories = stories.len()))]
    pub fn assemble(&self, stories: &[PathBuf], format: DocumentFormat) -> StageReport {
        let stage = match format {
            DocumentFormat::Pdf => Stage::AssemblePdf,
            DocumentFormat::Deck => Stage::AssembleDeck,
        };
        let mut report = StageReport::new(stage);

        for story in stories {
            match self.assembler.assemble(story, format) {
                Ok(handle) => report.record_success(handle.path().clone()),
                Err(e) => {
                    warn!(story = %story.display(), error = %e, "Document build failed");
                    report.record_failure(story.display().to_string(), e);
                }
            }
        }

        info!(%report, "Assembly finished");
        report
    }

    /// Assembles every story in the stories directory.
    ///
    /// # Errors
    ///
    /// Fails only if the stories directory cannot be listed.
    pub fn assemble_all(&self, format: DocumentFormat) -> StoryloomResult<StageReport> {
        Ok(self.assemble(&self.stories()?, format))
    }

    /// Combines `decks` in order into `output`, or the configured combined deck.
    ///
    /// # Errors
    ///
    /// Any unreadable source aborts the combine with no output written.
    pub fn combine(
        &self,
        decks: &[PathBuf],
        output: Option<&Path>,
    ) -> StoryloomResult<DocumentHandle> {
        self.combiner
            .combine(decks, output.unwrap_or(self.paths.combined_deck.as_path()))
    }

    /// Combines every deck in the decks directory, sorted by file name.
    ///
    /// # Errors
    ///
    /// Fails if there are no decks or any deck is unreadable.
    pub fn combine_all(&self, output: Option<&Path>) -> StoryloomResult<DocumentHandle> {
        self.combiner.combine_dir(
            &self.paths.decks_dir,
            output.unwrap_or(self.paths.combined_deck.as_path()),
        )
    }

    /// Generated documents of `format`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Fails if the output directory exists but cannot be read.
    pub fn list(&self, format: DocumentFormat) -> StoryloomResult<Vec<PathBuf>> {
        list_files(self.assembler.output_dir(format), format.extension())
    }
}
