//! HuggingFace text-to-image request body.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body of a text-to-image inference call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TextToImageRequest {
    /// The prompt
    inputs: String,
}

impl TextToImageRequest {
    /// Request for one image from `prompt`.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            inputs: prompt.into(),
        }
    }
}
