//! Story drafting request.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Parameters for drafting one story.
///
/// # Examples
///
/// ```
/// use storyloom_core::DraftRequest;
///
/// let request = DraftRequest::builder()
///     .theme("Brave Hanuman")
///     .age_range("5-12")
///     .word_count(200u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.theme(), "Brave Hanuman");
/// assert_eq!(*request.word_count(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct DraftRequest {
    /// Theme text
    theme: String,
    /// Target reader age range, e.g. "5-12"
    #[builder(default = "\"5-12\".to_string()")]
    age_range: String,
    /// Approximate length in words
    #[builder(default = "200")]
    word_count: u32,
}

impl DraftRequest {
    /// Creates a new builder for `DraftRequest`.
    pub fn builder() -> DraftRequestBuilder {
        DraftRequestBuilder::default()
    }

    /// Creates a request with every field given.
    pub fn new(theme: impl Into<String>, age_range: impl Into<String>, word_count: u32) -> Self {
        Self {
            theme: theme.into(),
            age_range: age_range.into(),
            word_count,
        }
    }
}
