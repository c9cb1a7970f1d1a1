//! Stage orchestration for Storyloom.
//!
//! Wires configuration, credentials and the service clients into the
//! sequential pipeline: themes are drafted into stories, stories are
//! illustrated, and both are assembled into PDFs or slide decks that can be
//! combined into a single deck.
//!
//! # Example
//!
//! ```no_run
//! use storyloom_core::DocumentFormat;
//! use storyloom_pipeline::{Credentials, Pipeline, StoryloomConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryloomConfig::load(None)?;
//! let credentials = Credentials::from_env(config.illustration.provider)?;
//! let pipeline = Pipeline::from_config(config, &credentials)?;
//!
//! let summary = pipeline
//!     .run("data/input/themes.xlsx".as_ref(), &[DocumentFormat::Pdf], false)
//!     .await?;
//! for report in summary.reports() {
//!     println!("{report}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credentials;
mod documents;
mod drafting;
mod illustration;
mod pipeline;
mod report;

pub use config::{
    DEFAULT_CONFIG, DraftingConfig, ENV_PREFIX, HttpConfig, IllustrationConfig, ImageProvider,
    PathsConfig, StoryloomConfig,
};
pub use credentials::{Credentials, GEMINI_API_KEY_VAR, GOOGLE_API_KEY_VAR, HF_TOKEN_VAR};
pub use documents::DocumentStage;
pub use drafting::draft_stories;
pub use illustration::{fallback_prompt, illustrate_stories, illustration_prompt};
pub use pipeline::{Pipeline, RunSummary};
pub use report::{Stage, StageFailure, StageReport};
