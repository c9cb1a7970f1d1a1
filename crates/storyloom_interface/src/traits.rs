//! Collaborator traits consumed by the pipeline.

use async_trait::async_trait;
use std::path::Path;
use storyloom_core::{DraftRequest, Theme};
use storyloom_error::StoryloomResult;

/// Language model service that drafts stories.
#[async_trait]
pub trait StoryDrafter: Send + Sync {
    /// Draft a story for the given theme, age range and target length.
    async fn draft(&self, request: &DraftRequest) -> StoryloomResult<String>;

    /// Turn a story excerpt into a one-paragraph visual description for an image model.
    async fn describe_scene(&self, excerpt: &str) -> StoryloomResult<String>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used for drafting.
    fn model_name(&self) -> &str;
}

/// Image generation service.
#[async_trait]
pub trait Illustrator: Send + Sync {
    /// Generate one image for a descriptive prompt, returning encoded image bytes.
    async fn illustrate(&self, prompt: &str) -> StoryloomResult<Vec<u8>>;

    /// Provider name (e.g., "gemini", "huggingface").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used for images.
    fn model_name(&self) -> &str;
}

/// Tabular input that yields themes in row order.
pub trait ThemeSource {
    /// Load all themes from the file at `path`, numbered from 1.
    fn load(&self, path: &Path) -> StoryloomResult<Vec<Theme>>;
}
