//! Illustration stage: scene prompts and image generation.

use crate::{IllustrationConfig, Stage, StageReport};
use std::path::PathBuf;
use storyloom_core::{ImageFormat, StoryName};
use storyloom_documents::excerpt;
use storyloom_interface::{Illustrator, StoryDrafter};
use storyloom_storage::{ImageStore, StoryStore};
use tracing::{debug, info, instrument, warn};

/// Prompt used when no scene description is available.
pub fn fallback_prompt(story: &str, chars: usize) -> String {
    format!(
        "A colorful and child-friendly illustration of a scene from the story: {}...",
        excerpt(story, chars)
    )
}

/// Asks the drafter for a visual description of the story's opening.
///
/// Falls back to [`fallback_prompt`] when the description fails or is blank.
#[instrument(skip_all, fields(len = story.len()))]
pub async fn illustration_prompt(
    drafter: &dyn StoryDrafter,
    story: &str,
    config: &IllustrationConfig,
) -> String {
    match drafter
        .describe_scene(&excerpt(story, config.scene_excerpt_chars))
        .await
    {
        Ok(description) if !description.trim().is_empty() => description.trim().to_string(),
        Ok(_) => {
            debug!("Empty scene description, using fallback prompt");
            fallback_prompt(story, config.fallback_excerpt_chars)
        }
        Err(e) => {
            warn!(error = %e, "Scene description failed, using fallback prompt");
            fallback_prompt(story, config.fallback_excerpt_chars)
        }
    }
}

/// Generates `images_per_story` images for each story, in story order.
///
/// Unreadable stories, failed generations and bytes that are not a known
/// image format are logged and recorded; processing continues.
#[instrument(skip_all, fields(stories = stories.len(), model = illustrator.model_name()))]
pub async fn illustrate_stories(
    drafter: &dyn StoryDrafter,
    illustrator: &dyn Illustrator,
    stories: &[PathBuf],
    images: &ImageStore,
    config: &IllustrationConfig,
) -> StageReport {
    let mut report = StageReport::new(Stage::Illustrate);

    for story_path in stories {
        let item = story_path.display().to_string();
        let Some(name) = StoryName::from_path(story_path) else {
            report.record_failure(item, "story path has no file stem");
            continue;
        };
        let text = match StoryStore::read_story(story_path) {
            Ok(text) => text,
            Err(e) => {
                warn!(story = %item, error = %e, "Could not read story");
                report.record_failure(item, e);
                continue;
            }
        };

        info!(story = %name, "Illustrating story");
        let prompt = illustration_prompt(drafter, &text, config).await;
        debug!(prompt = %excerpt(&prompt, 150), "Scene prompt");

        for ordinal in 1..=config.images_per_story {
            let label = name.image_file_name(ordinal);
            let bytes = match illustrator.illustrate(&prompt).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(image = %label, error = %e, "Image generation failed");
                    report.record_failure(label, e);
                    continue;
                }
            };
            if ImageFormat::sniff(&bytes).is_none() {
                warn!(image = %label, size = bytes.len(), "Not a recognised image, discarding");
                report.record_failure(label, "response is not a recognised image");
                continue;
            }
            match images.write_image(&name, ordinal, &bytes) {
                Ok(path) => report.record_success(path),
                Err(e) => {
                    warn!(image = %label, error = %e, "Could not save image");
                    report.record_failure(label, e);
                }
            }
        }
    }

    info!(%report, "Illustration finished");
    report
}
