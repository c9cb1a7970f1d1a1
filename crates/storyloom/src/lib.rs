//! Storyloom - themed children's stories as illustrated documents.
//!
//! Storyloom reads story themes from a spreadsheet, drafts a short story for
//! each with a hosted language model, illustrates it with a hosted image
//! model, and assembles the results into PDFs or slide decks. Slide decks can
//! then be combined into one presentation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storyloom::{Credentials, DocumentFormat, Pipeline, StoryloomConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryloomConfig::load(None)?;
//!     let credentials = Credentials::from_env(config.illustration.provider)?;
//!     let pipeline = Pipeline::from_config(config, &credentials)?;
//!
//!     let summary = pipeline
//!         .run("themes.xlsx".as_ref(), &[DocumentFormat::Deck], true)
//!         .await?;
//!     println!("{:?}", summary.combined());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `storyloom_error` - Error types
//! - `storyloom_core` - Themes, story names, blocks, layout settings
//! - `storyloom_interface` - Drafter, illustrator and theme source traits
//! - `storyloom_models` - Gemini and HuggingFace clients
//! - `storyloom_storage` - Story, image and spreadsheet files
//! - `storyloom_documents` - PDF and deck assembly, deck combination
//! - `storyloom_pipeline` - Configuration and stage orchestration
//!
//! This crate re-exports everything for convenience.

pub use storyloom_core::*;
pub use storyloom_documents::*;
pub use storyloom_error::*;
pub use storyloom_interface::*;
pub use storyloom_models::*;
pub use storyloom_pipeline::*;
pub use storyloom_storage::*;
