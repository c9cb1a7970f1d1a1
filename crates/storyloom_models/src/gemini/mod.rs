//! Google Gemini REST client.

mod client;
mod dto;
mod prompts;

pub use client::{DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};
pub use prompts::{scene_prompt, story_prompt};
