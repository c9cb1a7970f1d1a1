//! End-to-end orchestration over the configured services.

use crate::{
    Credentials, DocumentStage, ImageProvider, StageReport, StoryloomConfig, draft_stories,
    illustrate_stories,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyloom_core::{DocumentFormat, DocumentHandle, Theme};
use storyloom_error::{ConfigError, StoryloomResult};
use storyloom_interface::{Illustrator, StoryDrafter, ThemeSource};
use storyloom_models::{GeminiClient, HuggingFaceImageClient};
use storyloom_storage::{ImageStore, SpreadsheetThemeSource, StoryStore};
use tracing::{info, instrument};

/// Outcome of a full run.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct RunSummary {
    /// Stage reports in execution order
    reports: Vec<StageReport>,
    /// Combined deck, when combining was requested and decks were built
    combined: Option<DocumentHandle>,
}

/// Sequential story pipeline: draft, illustrate, assemble, combine.
///
/// Stages hand work to each other through the configured directories and
/// await each remote call in turn.
#[derive(Clone)]
pub struct Pipeline {
    config: StoryloomConfig,
    drafter: Arc<dyn StoryDrafter>,
    illustrator: Arc<dyn Illustrator>,
    documents: DocumentStage,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("drafter", &self.drafter.model_name())
            .field("illustrator", &self.illustrator.model_name())
            .finish()
    }
}

impl Pipeline {
    /// Creates a pipeline over explicit services.
    pub fn new(
        config: StoryloomConfig,
        drafter: Arc<dyn StoryDrafter>,
        illustrator: Arc<dyn Illustrator>,
    ) -> Self {
        let documents = DocumentStage::new(&config);
        Self {
            config,
            drafter,
            illustrator,
            documents,
        }
    }

    /// Creates a pipeline with the services the configuration selects.
    ///
    /// # Errors
    ///
    /// Returns an error if a required credential is absent or an HTTP client
    /// cannot be built.
    #[instrument(skip_all, fields(provider = %config.illustration.provider))]
    pub fn from_config(
        config: StoryloomConfig,
        credentials: &Credentials,
    ) -> StoryloomResult<Self> {
        let gemini = GeminiClient::new(credentials.gemini_api_key(), config.http.timeout())?
            .with_text_model(config.drafting.model.clone())
            .with_image_model(config.illustration.gemini_model.clone())
            .with_retry(config.http.retry());

        let illustrator: Arc<dyn Illustrator> = match config.illustration.provider {
            ImageProvider::Gemini => Arc::new(gemini.clone()),
            ImageProvider::HuggingFace => {
                let token = credentials.huggingface_token().ok_or_else(|| {
                    ConfigError::new("HuggingFace provider selected without a token")
                })?;
                Arc::new(
                    HuggingFaceImageClient::new(
                        token,
                        config.illustration.huggingface_model.clone(),
                        config.http.timeout(),
                    )?
                    .with_retry(config.http.retry()),
                )
            }
        };

        info!(
            drafter = StoryDrafter::model_name(&gemini),
            illustrator = illustrator.model_name(),
            "Services configured"
        );
        Ok(Self::new(config, Arc::new(gemini), illustrator))
    }

    /// Configuration in use.
    pub fn config(&self) -> &StoryloomConfig {
        &self.config
    }

    /// Document stage over the same directories.
    pub fn documents(&self) -> &DocumentStage {
        &self.documents
    }

    /// Loads themes from a spreadsheet using the configured column.
    ///
    /// # Errors
    ///
    /// An unreadable or malformed theme file is an error.
    pub fn load_themes(&self, path: &Path) -> StoryloomResult<Vec<Theme>> {
        SpreadsheetThemeSource::new(self.config.drafting.theme_column.clone()).load(path)
    }

    /// Drafts a story for every theme in the spreadsheet.
    ///
    /// # Errors
    ///
    /// Fails if the themes cannot be loaded or the stories directory cannot
    /// be created; individual drafting failures are only reported.
    #[instrument(skip(self, themes_path), fields(themes = %themes_path.display()))]
    pub async fn draft(&self, themes_path: &Path) -> StoryloomResult<StageReport> {
        let themes = self.load_themes(themes_path)?;
        self.draft_themes(&themes).await
    }

    /// Drafts a story for each of `themes`.
    ///
    /// # Errors
    ///
    /// Fails if the stories directory cannot be created.
    pub async fn draft_themes(&self, themes: &[Theme]) -> StoryloomResult<StageReport> {
        let store = StoryStore::new(self.config.paths.stories_dir.clone())?;
        Ok(draft_stories(self.drafter.as_ref(), themes, &store, &self.config.drafting).await)
    }

    /// Illustrates every story in the stories directory.
    ///
    /// # Errors
    ///
    /// Fails if the stories or images directory is unusable.
    pub async fn illustrate(&self) -> StoryloomResult<StageReport> {
        let stories = self.documents.stories()?;
        self.illustrate_stories(&stories).await
    }

    /// Illustrates the given stories.
    ///
    /// # Errors
    ///
    /// Fails if the images directory cannot be created.
    pub async fn illustrate_stories(&self, stories: &[PathBuf]) -> StoryloomResult<StageReport> {
        let images = ImageStore::new(self.config.paths.images_dir.clone())?;
        Ok(illustrate_stories(
            self.drafter.as_ref(),
            self.illustrator.as_ref(),
            stories,
            &images,
            &self.config.illustration,
        )
        .await)
    }

    /// Runs every stage for the themes in `themes_path`.
    ///
    /// Only the stories drafted in this run are illustrated and assembled.
    /// When `combine` is set and decks were built, they are combined in story
    /// order into the configured combined deck.
    ///
    /// # Errors
    ///
    /// Fails on unreadable themes, unusable directories or a failed combine.
    /// Per-item failures in the other stages are reported, not raised.
    #[instrument(
        skip(self, themes_path, formats),
        fields(themes = %themes_path.display(), formats = formats.len())
    )]
    pub async fn run(
        &self,
        themes_path: &Path,
        formats: &[DocumentFormat],
        combine: bool,
    ) -> StoryloomResult<RunSummary> {
        let mut reports = Vec::new();

        let drafted = self.draft(themes_path).await?;
        let stories = drafted.succeeded().clone();
        reports.push(drafted);

        reports.push(self.illustrate_stories(&stories).await?);

        let mut decks = Vec::new();
        for format in formats {
            let report = self.documents.assemble(&stories, *format);
            if *format == DocumentFormat::Deck {
                decks.extend(report.succeeded().iter().cloned());
            }
            reports.push(report);
        }

        let combined = if combine && !decks.is_empty() {
            Some(self.documents.combine(&decks, None)?)
        } else {
            None
        };

        info!(stages = reports.len(), combined = combined.is_some(), "Run finished");
        Ok(RunSummary { reports, combined })
    }
}
