//! HuggingFace text-to-image inference.

mod client;
mod dto;

pub use client::{DEFAULT_HUGGINGFACE_BASE_URL, DEFAULT_HUGGINGFACE_MODEL, HuggingFaceImageClient};
pub use dto::TextToImageRequest;
