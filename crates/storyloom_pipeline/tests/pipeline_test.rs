mod test_utils;

use std::sync::Arc;
use storyloom_core::DocumentFormat;
use storyloom_documents::read_deck;
use storyloom_pipeline::{Pipeline, Stage};
use test_utils::{MockDrafter, MockIllustrator, config_in, write_themes};

#[tokio::test]
async fn run_produces_every_artifact() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let themes = write_themes(root.path(), &["Brave Hanuman", "", "Kind Bhima"])?;
    let drafter = MockDrafter::new().with_scene("Hanuman leaping over a blue sea");
    let illustrator = MockIllustrator::png();
    let pipeline = Pipeline::new(
        config_in(root.path()),
        Arc::new(drafter.clone()),
        Arc::new(illustrator.clone()),
    );

    let summary = pipeline
        .run(&themes, &[DocumentFormat::Pdf, DocumentFormat::Deck], true)
        .await?;

    let stages: Vec<_> = summary.reports().iter().map(|r| *r.stage()).collect();
    assert_eq!(
        stages,
        vec![Stage::Draft, Stage::Illustrate, Stage::AssemblePdf, Stage::AssembleDeck]
    );
    assert!(summary.reports().iter().all(|r| r.is_clean()));
    assert!(summary.reports().iter().all(|r| r.succeeded().len() == 2));

    assert!(root.path().join("stories/story_1_brave_hanuman.txt").is_file());
    assert!(root.path().join("stories/story_2_kind_bhima.txt").is_file());
    assert!(root.path().join("images/story_1_brave_hanuman_image_1.png").is_file());
    assert!(root.path().join("pdfs/story_2_kind_bhima.pdf").is_file());
    assert!(root.path().join("decks/story_1_brave_hanuman.pptx").is_file());

    assert_eq!(drafter.call_count(), 2);
    assert_eq!(illustrator.prompts()[0], "Hanuman leaping over a blue sea");

    // two decks of title, one content slide and one picture slide each
    let combined = summary.combined().clone().expect("combined deck");
    let deck = read_deck(combined.path())?;
    assert_eq!(deck.slides().len(), 6);
    assert!(
        deck.slides()[0]
            .text()
            .unwrap_or_default()
            .starts_with("Story 1 Brave Hanuman")
    );
    Ok(())
}

#[tokio::test]
async fn failed_draft_skips_only_that_theme() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let themes = write_themes(root.path(), &["Golden Deer", "Clever Crow", "Wise Owl"])?;
    let drafter = MockDrafter::new().failing_on("Clever Crow");
    let pipeline = Pipeline::new(
        config_in(root.path()),
        Arc::new(drafter.clone()),
        Arc::new(MockIllustrator::png()),
    );

    let report = pipeline.draft(&themes).await?;

    assert_eq!(drafter.call_count(), 3);
    assert_eq!(report.succeeded().len(), 2);
    assert_eq!(report.failed().len(), 1);
    assert_eq!(report.failed()[0].item(), "Clever Crow");
    assert!(!root.path().join("stories/story_2_clever_crow.txt").exists());
    assert!(root.path().join("stories/story_3_wise_owl.txt").is_file());
    Ok(())
}

#[tokio::test]
async fn drafting_uses_configured_audience() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let themes = write_themes(root.path(), &["Patient Tortoise"])?;
    let mut config = config_in(root.path());
    config.drafting.age_range = "3-6".to_string();
    config.drafting.word_count = 120;
    let drafter = MockDrafter::new();
    let pipeline = Pipeline::new(
        config,
        Arc::new(drafter.clone()),
        Arc::new(MockIllustrator::png()),
    );

    pipeline.draft(&themes).await?;

    let requests = drafter.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].theme(), "Patient Tortoise");
    assert_eq!(requests[0].age_range(), "3-6");
    assert_eq!(*requests[0].word_count(), 120);
    Ok(())
}

#[tokio::test]
async fn failed_scene_description_falls_back_to_story_excerpt() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let themes = write_themes(root.path(), &["Brave Hanuman"])?;
    let drafter = MockDrafter::new();
    let illustrator = MockIllustrator::png();
    let pipeline = Pipeline::new(
        config_in(root.path()),
        Arc::new(drafter.clone()),
        Arc::new(illustrator.clone()),
    );

    pipeline.draft(&themes).await?;
    let report = pipeline.illustrate().await?;

    assert!(report.is_clean());
    assert_eq!(drafter.scene_calls(), 1);
    assert_eq!(
        illustrator.prompts()[0],
        "A colorful and child-friendly illustration of a scene from the story: \
         Once upon a time there was Brave Hanuman.\n\nThe moral: always be kind...."
    );
    Ok(())
}

#[tokio::test]
async fn non_image_bytes_are_discarded() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let themes = write_themes(root.path(), &["Brave Hanuman"])?;
    let pipeline = Pipeline::new(
        config_in(root.path()),
        Arc::new(MockDrafter::new()),
        Arc::new(MockIllustrator::returning(b"<html>quota exceeded</html>".to_vec())),
    );

    pipeline.draft(&themes).await?;
    let report = pipeline.illustrate().await?;

    assert_eq!(report.succeeded().len(), 0);
    assert_eq!(report.failed().len(), 1);
    assert!(!root.path().join("images/story_1_brave_hanuman_image_1.png").exists());
    Ok(())
}

#[tokio::test]
async fn illustration_failures_do_not_block_documents() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let themes = write_themes(root.path(), &["Brave Hanuman"])?;
    let pipeline = Pipeline::new(
        config_in(root.path()),
        Arc::new(MockDrafter::new()),
        Arc::new(MockIllustrator::failing()),
    );

    let summary = pipeline.run(&themes, &[DocumentFormat::Pdf], false).await?;

    assert_eq!(summary.reports()[1].failed().len(), 1);
    assert_eq!(summary.reports()[2].succeeded().len(), 1);
    assert!(summary.combined().is_none());
    Ok(())
}

#[tokio::test]
async fn images_per_story_controls_ordinals() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let themes = write_themes(root.path(), &["Brave Hanuman"])?;
    let mut config = config_in(root.path());
    config.illustration.images_per_story = 2;
    let illustrator = MockIllustrator::png();
    let pipeline = Pipeline::new(
        config,
        Arc::new(MockDrafter::new()),
        Arc::new(illustrator.clone()),
    );

    pipeline.draft(&themes).await?;
    pipeline.illustrate().await?;

    assert_eq!(illustrator.call_count(), 2);
    assert!(root.path().join("images/story_1_brave_hanuman_image_1.png").is_file());
    assert!(root.path().join("images/story_1_brave_hanuman_image_2.png").is_file());
    Ok(())
}

#[tokio::test]
async fn missing_theme_file_is_an_error() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let drafter = MockDrafter::new();
    let pipeline = Pipeline::new(
        config_in(root.path()),
        Arc::new(drafter.clone()),
        Arc::new(MockIllustrator::png()),
    );

    let result = pipeline.draft(&root.path().join("absent.xlsx")).await;

    assert!(result.is_err());
    assert_eq!(drafter.call_count(), 0);
    Ok(())
}
