//! Mock services for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use storyloom_core::DraftRequest;
use storyloom_error::{ServiceError, ServiceErrorKind, StoryloomResult};
use storyloom_interface::{Illustrator, StoryDrafter};
use storyloom_pipeline::StoryloomConfig;

/// 2x2 RGB PNG.
pub const TEST_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x08, 0x02, 0x00, 0x00, 0x00, 0xfd,
    0xd4, 0x9a, 0x73, 0x00, 0x00, 0x00, 0x10, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0xf8,
    0xcf, 0xc0, 0x00, 0x44, 0x0c, 0x10, 0x0a, 0x00, 0x1f, 0xee, 0x03, 0xfd, 0x8b, 0x5f, 0x14,
    0xd4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

fn server_error() -> storyloom_error::StoryloomError {
    ServiceError::new(ServiceErrorKind::HttpStatus {
        status_code: 500,
        message: "mock failure".to_string(),
    })
    .into()
}

/// Drafter that writes a two-paragraph story per theme.
#[derive(Clone, Default)]
pub struct MockDrafter {
    failing_themes: Vec<String>,
    scene: Option<String>,
    requests: Arc<Mutex<Vec<DraftRequest>>>,
    scene_calls: Arc<Mutex<usize>>,
}

impl MockDrafter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drafting fails for `theme`.
    pub fn failing_on(mut self, theme: &str) -> Self {
        self.failing_themes.push(theme.to_string());
        self
    }

    /// Scene descriptions succeed with `scene`; without one they fail.
    pub fn with_scene(mut self, scene: &str) -> Self {
        self.scene = Some(scene.to_string());
        self
    }

    pub fn requests(&self) -> Vec<DraftRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn scene_calls(&self) -> usize {
        *self.scene_calls.lock().unwrap()
    }
}

#[async_trait]
impl StoryDrafter for MockDrafter {
    async fn draft(&self, request: &DraftRequest) -> StoryloomResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        if self.failing_themes.iter().any(|t| t == request.theme()) {
            return Err(server_error());
        }
        Ok(format!(
            "Once upon a time there was {}.\n\nThe moral: always be kind.",
            request.theme()
        ))
    }

    async fn describe_scene(&self, _excerpt: &str) -> StoryloomResult<String> {
        *self.scene_calls.lock().unwrap() += 1;
        self.scene.clone().ok_or_else(server_error)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-drafter"
    }
}

/// Illustrator returning fixed bytes and recording prompts.
#[derive(Clone)]
pub struct MockIllustrator {
    response: Option<Vec<u8>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockIllustrator {
    /// Always returns [`TEST_PNG`].
    pub fn png() -> Self {
        Self::returning(TEST_PNG.to_vec())
    }

    pub fn returning(bytes: Vec<u8>) -> Self {
        Self {
            response: Some(bytes),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Illustrator for MockIllustrator {
    async fn illustrate(&self, prompt: &str) -> StoryloomResult<Vec<u8>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone().ok_or_else(server_error)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-illustrator"
    }
}

/// Default configuration with every directory under `root`.
pub fn config_in(root: &Path) -> StoryloomConfig {
    let mut config = StoryloomConfig::default();
    config.paths.stories_dir = root.join("stories");
    config.paths.images_dir = root.join("images");
    config.paths.pdfs_dir = root.join("pdfs");
    config.paths.decks_dir = root.join("decks");
    config.paths.combined_deck = root.join("combined_stories.pptx");
    config
}

/// CSV theme file with a `Theme` header.
pub fn write_themes(root: &Path, themes: &[&str]) -> anyhow::Result<std::path::PathBuf> {
    let path = root.join("themes.csv");
    let mut body = String::from("Id,Theme\n");
    for (i, theme) in themes.iter().enumerate() {
        body.push_str(&format!("{},{}\n", i + 1, theme));
    }
    std::fs::write(&path, body)?;
    Ok(path)
}
