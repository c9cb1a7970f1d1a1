//! Story naming conventions.
//!
//! Every downstream file name is a pure function of the story stem, which keeps
//! regeneration idempotent at the file level.

use crate::DocumentFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Stem of a story file, e.g. `story_1_brave_hanuman`.
///
/// # Examples
///
/// ```
/// use storyloom_core::{DocumentFormat, StoryName};
///
/// let name = StoryName::new("story_1_brave_hanuman");
/// assert_eq!(name.title(), "Story 1 Brave Hanuman");
/// assert_eq!(name.story_file_name(), "story_1_brave_hanuman.txt");
/// assert_eq!(name.image_file_name(1), "story_1_brave_hanuman_image_1.png");
/// assert_eq!(name.document_file_name(DocumentFormat::Deck), "story_1_brave_hanuman.pptx");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct StoryName(String);

impl StoryName {
    /// Wraps an existing stem.
    pub fn new(stem: impl Into<String>) -> Self {
        Self(stem.into())
    }

    /// Derives the stem from a file path (file name without extension).
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(Self::new)
    }

    /// The raw stem.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable title: underscores become spaces, then title-cased.
    ///
    /// A letter is upper-cased when it follows a non-letter and lower-cased otherwise,
    /// so `"story_1_the_1st_deer"` becomes `"Story 1 The 1St Deer"`.
    pub fn title(&self) -> String {
        let mut title = String::with_capacity(self.0.len());
        let mut previous_is_letter = false;
        for ch in self.0.chars() {
            let ch = if ch == '_' { ' ' } else { ch };
            if ch.is_alphabetic() {
                if previous_is_letter {
                    title.extend(ch.to_lowercase());
                } else {
                    title.extend(ch.to_uppercase());
                }
                previous_is_letter = true;
            } else {
                title.push(ch);
                previous_is_letter = false;
            }
        }
        title
    }

    /// `<stem>.txt`
    pub fn story_file_name(&self) -> String {
        format!("{}.txt", self.0)
    }

    /// `<stem>_image_<ordinal>.png`, ordinals start at 1.
    pub fn image_file_name(&self, ordinal: usize) -> String {
        format!("{}_image_{}.png", self.0, ordinal)
    }

    /// `<stem>.<ext>` for the given output format.
    pub fn document_file_name(&self, format: DocumentFormat) -> String {
        format!("{}.{}", self.0, format.extension())
    }
}
