//! Splitting story text into layout units.

use regex::Regex;
use std::sync::LazyLock;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").expect("Valid blank line regex"));

/// Paragraphs separated by one or more blank lines, trimmed, in order.
///
/// Whitespace-only paragraphs are dropped.
///
/// # Examples
///
/// ```
/// use storyloom_documents::paragraphs;
///
/// let text = "Once upon a time.\n\nThe end.\n";
/// assert_eq!(paragraphs(text), vec!["Once upon a time.", "The end."]);
/// ```
pub fn paragraphs(text: &str) -> Vec<String> {
    BLANK_LINE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whitespace-separated words grouped into runs of at most `max_words`,
/// each run joined with single spaces.
///
/// A story of `W` words yields `ceil(W / max_words)` chunks.
///
/// # Examples
///
/// ```
/// use storyloom_documents::slide_chunks;
///
/// assert_eq!(slide_chunks("a b  c\nd e", 2), vec!["a b", "c d", "e"]);
/// assert!(slide_chunks("   ", 2).is_empty());
/// ```
pub fn slide_chunks(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(max_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// First `max_chars` characters of `text`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
