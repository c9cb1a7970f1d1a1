//! Wire types for the `generateContent` endpoint.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Base64 payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type, e.g. "image/png"
    mime_type: String,
    /// Base64-encoded bytes
    data: String,
}

/// One part of a content turn: text or inline data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Binary content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Inline data carrying an image, if this part is one.
    pub fn image(&self) -> Option<&InlineData> {
        self.inline_data
            .as_ref()
            .filter(|data| data.mime_type.starts_with("image/"))
    }

    /// Text of this part, if any.
    pub fn as_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// A conversation turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Content {
    /// "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Parts in order
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    /// A user turn holding one text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::from_text(text)],
        }
    }
}

/// Generation options.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_builder::Builder, Getters,
)]
#[serde(rename_all = "camelCase")]
#[builder(default, setter(into, strip_option))]
pub struct GenerationConfig {
    /// Output modalities, e.g. `["TEXT", "IMAGE"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl GenerationConfig {
    /// Creates a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns
    contents: Vec<Content>,
    /// Optional generation options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn text prompt.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(text)],
            generation_config: None,
        }
    }

    /// Attaches generation options.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// One candidate completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    content: Option<Content>,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate completions
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate.
    pub fn text(&self) -> String {
        self.first_parts()
            .iter()
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .concat()
    }

    /// Text of the first candidate's first text part.
    pub fn first_text(&self) -> Option<&str> {
        self.first_parts().iter().find_map(Part::as_text)
    }

    /// First inline image of the first candidate.
    pub fn first_image(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(Part::image)
    }
}
