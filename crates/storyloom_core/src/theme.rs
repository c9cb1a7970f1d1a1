//! Theme strings read from the input spreadsheet.

use crate::StoryName;
use serde::{Deserialize, Serialize};

/// A short text prompt driving one story.
///
/// Identity is the text plus its 1-based position in the input sequence.
///
/// # Examples
///
/// ```
/// use storyloom_core::Theme;
///
/// let theme = Theme::new(1, "Brave Hanuman");
/// assert_eq!(theme.slug(), "brave_hanuman");
/// assert_eq!(theme.story_name().as_str(), "story_1_brave_hanuman");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct Theme {
    /// 1-based position in the input sequence.
    index: usize,
    /// Theme text as read from the source.
    text: String,
}

impl Theme {
    /// Creates a theme at the given 1-based position.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Filename-safe form of the theme text.
    ///
    /// Lowercased, whitespace runs collapsed to `_`, and anything other than
    /// alphanumerics, `_` and `-` dropped.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.text.len());
        let mut pending_separator = false;
        for ch in self.text.trim().chars() {
            if ch.is_whitespace() {
                pending_separator = true;
                continue;
            }
            if !(ch.is_alphanumeric() || ch == '_' || ch == '-') {
                continue;
            }
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        }
        slug
    }

    /// Deterministic story name: `story_<index>_<slug>`.
    pub fn story_name(&self) -> StoryName {
        StoryName::new(format!("story_{}_{}", self.index, self.slug()))
    }
}
