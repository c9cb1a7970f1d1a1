//! Pipeline configuration.
//!
//! Settings are layered, later sources overriding earlier ones:
//! 1. Bundled defaults (`storyloom.toml` shipped with this crate)
//! 2. `~/.config/storyloom/storyloom.toml`
//! 3. `./storyloom.toml`
//! 4. An explicit file (the CLI's `--config`)
//! 5. `STORYLOOM__<SECTION>__<KEY>` environment variables
//!
//! Every layer is optional except the bundled defaults.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use storyloom_core::{DraftRequest, LayoutConfig};
use storyloom_error::{ConfigError, StoryloomResult};
use storyloom_models::RetrySettings;
use tracing::{debug, instrument};

/// Bundled default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../storyloom.toml");

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "STORYLOOM";

/// Which service generates illustrations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageProvider {
    /// Gemini image generation
    #[default]
    #[display("gemini")]
    Gemini,
    /// HuggingFace text-to-image inference
    #[display("huggingface")]
    HuggingFace,
}

/// Directories the stages hand work through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Drafted story text files
    pub stories_dir: PathBuf,
    /// Generated illustrations
    pub images_dir: PathBuf,
    /// Assembled PDFs
    pub pdfs_dir: PathBuf,
    /// Assembled slide decks
    pub decks_dir: PathBuf,
    /// Default output of the deck combiner
    pub combined_deck: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            stories_dir: PathBuf::from("data/output/stories"),
            images_dir: PathBuf::from("data/output/images"),
            pdfs_dir: PathBuf::from("data/output/pdfs"),
            decks_dir: PathBuf::from("data/output/pptx"),
            combined_deck: PathBuf::from("data/output/combined_stories.pptx"),
        }
    }
}

/// Story drafting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftingConfig {
    /// Spreadsheet header naming the theme column
    pub theme_column: String,
    /// Target reader age range
    pub age_range: String,
    /// Approximate story length in words
    pub word_count: u32,
    /// Text model used for drafting and scene descriptions
    pub model: String,
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self {
            theme_column: storyloom_storage::DEFAULT_THEME_COLUMN.to_string(),
            age_range: "5-12".to_string(),
            word_count: 200,
            model: storyloom_models::DEFAULT_TEXT_MODEL.to_string(),
        }
    }
}

impl DraftingConfig {
    /// Drafting request for one theme.
    pub fn request(&self, theme: &str) -> DraftRequest {
        DraftRequest::new(theme, self.age_range.clone(), self.word_count)
    }
}

/// Illustration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllustrationConfig {
    /// Image service
    pub provider: ImageProvider,
    /// Images generated per story
    pub images_per_story: usize,
    /// Gemini image model
    pub gemini_model: String,
    /// HuggingFace model id
    pub huggingface_model: String,
    /// Story characters sent for a scene description
    pub scene_excerpt_chars: usize,
    /// Story characters quoted in the fallback prompt
    pub fallback_excerpt_chars: usize,
}

impl Default for IllustrationConfig {
    fn default() -> Self {
        Self {
            provider: ImageProvider::Gemini,
            images_per_story: 1,
            gemini_model: storyloom_models::DEFAULT_IMAGE_MODEL.to_string(),
            huggingface_model: storyloom_models::DEFAULT_HUGGINGFACE_MODEL.to_string(),
            scene_excerpt_chars: 500,
            fallback_excerpt_chars: 200,
        }
    }
}

/// HTTP client settings shared by every remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Retries after the first attempt for retryable failures
    pub max_retries: usize,
    /// Initial backoff between retries
    pub backoff_ms: u64,
    /// Disable retries entirely
    pub no_retry: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            max_retries: 3,
            backoff_ms: 1000,
            no_retry: false,
        }
    }
}

impl HttpConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry settings for the service clients.
    pub fn retry(&self) -> RetrySettings {
        if self.no_retry {
            RetrySettings::disabled()
        } else {
            RetrySettings::new(Some(self.max_retries), Some(self.backoff_ms))
        }
    }
}

/// Top-level Storyloom configuration.
///
/// # Example
///
/// ```no_run
/// use storyloom_pipeline::StoryloomConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryloomConfig::load(None)?;
/// println!("Stories go to {}", config.paths.stories_dir.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoryloomConfig {
    /// Working directories
    #[serde(default)]
    pub paths: PathsConfig,
    /// Story drafting
    #[serde(default)]
    pub drafting: DraftingConfig,
    /// Illustration
    #[serde(default)]
    pub illustration: IllustrationConfig,
    /// Document layout
    #[serde(default)]
    pub layout: LayoutConfig,
    /// HTTP clients
    #[serde(default)]
    pub http: HttpConfig,
}

impl StoryloomConfig {
    /// Loads the layered configuration, with `explicit` (if any) above the
    /// user files and below the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an explicit file is missing, any file fails
    /// to parse, or the merged values are invalid.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> StoryloomResult<Self> {
        debug!("Loading configuration: env > explicit > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyloom/storyloom.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyloom").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Loads the bundled defaults overridden by a single file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryloomResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(Self::defaults().add_source(File::from(path.as_ref())))
    }

    /// Parses the bundled defaults overridden by TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text is not valid configuration.
    pub fn from_toml_str(toml: &str) -> StoryloomResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid setting.
    pub fn validate(&self) -> StoryloomResult<()> {
        self.layout
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid layout: {}", e)))?;
        if self.drafting.word_count == 0 {
            return Err(ConfigError::new("drafting.word_count must be positive").into());
        }
        if self.drafting.theme_column.trim().is_empty() {
            return Err(ConfigError::new("drafting.theme_column must not be empty").into());
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::new("http.timeout_secs must be positive").into());
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> StoryloomResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
