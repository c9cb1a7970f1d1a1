//! Remote service clients for Storyloom.
//!
//! Two providers are supported:
//!
//! - **Gemini** (Google) drafts stories, writes scene descriptions and generates images
//!   through the REST `generateContent` endpoint.
//! - **HuggingFace** generates images through the text-to-image inference endpoint.
//!
//! Both clients retry transient failures (429, 5xx, dropped connections) with
//! exponential backoff and jitter, and reject image payloads that are not a
//! recognised image format.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use storyloom_core::DraftRequest;
//! use storyloom_interface::StoryDrafter;
//! use storyloom_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new("api-key", Duration::from_secs(120))?;
//! let request = DraftRequest::builder().theme("Brave Hanuman").build()?;
//! let story = client.draft(&request).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod huggingface;
mod retry;
mod transport;

pub use gemini::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GeminiClient,
    GenerationConfig, InlineData, Part, DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL,
    DEFAULT_TEXT_MODEL, scene_prompt, story_prompt,
};
pub use huggingface::{
    DEFAULT_HUGGINGFACE_BASE_URL, DEFAULT_HUGGINGFACE_MODEL, HuggingFaceImageClient,
    TextToImageRequest,
};
pub use retry::RetrySettings;
pub use transport::verify_image;
