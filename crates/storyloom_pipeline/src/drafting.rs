//! Story drafting stage.

use crate::{DraftingConfig, Stage, StageReport};
use storyloom_core::Theme;
use storyloom_interface::StoryDrafter;
use storyloom_storage::StoryStore;
use tracing::{info, instrument, warn};

/// Drafts one story per theme, in theme order.
///
/// A failed draft or write is logged and recorded; the remaining themes
/// are still processed.
#[instrument(skip_all, fields(themes = themes.len(), model = drafter.model_name()))]
pub async fn draft_stories(
    drafter: &dyn StoryDrafter,
    themes: &[Theme],
    store: &StoryStore,
    drafting: &DraftingConfig,
) -> StageReport {
    let mut report = StageReport::new(Stage::Draft);

    for theme in themes {
        info!(index = theme.index(), theme = %theme.text(), "Drafting story");
        let request = drafting.request(theme.text());

        let text = match drafter.draft(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(theme = %theme.text(), error = %e, "Draft failed, skipping theme");
                report.record_failure(theme.text().clone(), e);
                continue;
            }
        };

        match store.write_story(theme, &text) {
            Ok(path) => report.record_success(path),
            Err(e) => {
                warn!(theme = %theme.text(), error = %e, "Could not save story");
                report.record_failure(theme.text().clone(), e);
            }
        }
    }

    info!(%report, "Drafting finished");
    report
}
