//! Prompt templates.

use storyloom_core::DraftRequest;

/// Prompt asking for a short children's story on a theme.
///
/// # Examples
///
/// ```
/// use storyloom_core::DraftRequest;
/// use storyloom_models::story_prompt;
///
/// let request = DraftRequest::builder().theme("Brave Hanuman").build().unwrap();
/// let prompt = story_prompt(&request);
/// assert!(prompt.contains("Theme: Brave Hanuman"));
/// assert!(prompt.contains("around 200 words"));
/// ```
pub fn story_prompt(request: &DraftRequest) -> String {
    format!(
        "Generate a short, engaging story for children aged {} based on the following theme:\n\
         Theme: {}\n\
         The story should be simple, easy to understand, and around {} words.\n\
         Include a moral or lesson at the end. Use Indian mythological elements from Ramayana or Mahabharata.",
        request.age_range(),
        request.theme(),
        request.word_count()
    )
}

/// Prompt asking for a one-paragraph visual description of a story excerpt.
pub fn scene_prompt(excerpt: &str) -> String {
    format!(
        "Based on this children's story excerpt, create a detailed and vivid visual description \
         for an image generation model. The description should be a single paragraph and include \
         details about the characters, their appearance, the setting, colors, mood, and a \
         child-friendly art style like 'storybook illustration' or 'cartoon'.\n\n\
         Story: \"{}...\"",
        excerpt
    )
}
