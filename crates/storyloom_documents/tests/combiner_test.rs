mod test_utils;

use storyloom_core::LayoutConfig;
use storyloom_documents::{Deck, DeckCombiner, Shape, Slide, SlideLayout, read_deck, write_deck};
use test_utils::{TEST_PNG, Workspace, slide_font_sizes, words};

fn single_slide_deck(
    ws: &Workspace,
    name: &str,
    text: &str,
) -> anyhow::Result<std::path::PathBuf> {
    let mut deck = Deck::new();
    deck.push(Slide::new(SlideLayout::TitleAndContent).with(Shape::Body(text.to_string())));
    let path = ws.dir("decks").join(name);
    std::fs::write(&path, write_deck(&deck, 12.0)?)?;
    Ok(path)
}

#[test]
fn combines_two_single_slide_decks_in_order() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let d1 = single_slide_deck(&ws, "d1.pptx", "T1")?;
    let d2 = single_slide_deck(&ws, "d2.pptx", "T2")?;
    let output = ws.dir("combined").join("all.pptx");

    let handle = DeckCombiner::new(LayoutConfig::default()).combine(&[d1, d2], &output)?;

    let combined = read_deck(handle.path())?;
    let texts: Vec<_> = combined.slides().iter().map(|s| s.text()).collect();
    assert_eq!(texts, vec![Some("T1".to_string()), Some("T2".to_string())]);
    Ok(())
}

#[test]
fn three_short_story_decks_keep_title_and_content_slides() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let stories = [
        ("story_1_rama", words(200)),
        ("story_2_sita", words(190)),
        ("story_3_lakshmana", words(210)),
    ];
    let mut sources = Vec::new();
    for (stem, text) in &stories {
        sources.push(ws.deck_for(stem, text)?);
    }
    let output = ws.root.path().join("combined.pptx");

    DeckCombiner::new(LayoutConfig::default()).combine(&sources, &output)?;

    let combined = read_deck(&output)?;
    assert_eq!(combined.slides().len(), 6);
    for (i, (stem, text)) in stories.iter().enumerate() {
        let title = combined.slides()[2 * i].text().unwrap_or_default();
        let content = combined.slides()[2 * i + 1].text().unwrap_or_default();
        let expected_title = storyloom_core::StoryName::new(*stem).title();
        assert!(title.starts_with(&expected_title), "slide {i}: {title}");
        assert_eq!(&content, text);
    }
    Ok(())
}

#[test]
fn pictures_are_re_embedded_with_their_placement() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    ws.write_image("story_1_picture", 1)?;
    let source = ws.deck_for("story_1_picture", "A tale with a picture.")?;
    let output = ws.root.path().join("combined.pptx");
    let layout = LayoutConfig::default();

    DeckCombiner::new(layout.clone()).combine(&[source], &output)?;

    let combined = read_deck(&output)?;
    let pictures: Vec<_> = combined
        .slides()
        .iter()
        .flat_map(|s| s.pictures().iter())
        .collect();
    assert_eq!(pictures.len(), 1);
    assert_eq!(pictures[0].bytes(), &TEST_PNG.to_vec());
    assert_eq!(*pictures[0].geometry(), Some(*layout.deck_picture()));
    Ok(())
}

#[test]
fn every_run_is_twelve_point_in_assembled_and_combined_decks() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    ws.write_image("story_1_garden", 1)?;
    let first = ws.deck_for("story_1_garden", &words(500))?;
    let second = ws.deck_for("story_2_river", "A river sang.\n\nThe fish listened.")?;
    let output = ws.root.path().join("combined.pptx");

    DeckCombiner::new(LayoutConfig::default()).combine(&[first.clone(), second], &output)?;

    for deck in [&first, &output] {
        let sizes = slide_font_sizes(deck)?;
        assert!(!sizes.is_empty(), "{} has no sized runs", deck.display());
        assert!(
            sizes.iter().all(|size| size == "1200"),
            "{} has sizes {:?}",
            deck.display(),
            sizes
        );
    }
    Ok(())
}

#[test]
fn malformed_source_aborts_without_output() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let good = single_slide_deck(&ws, "a.pptx", "fine")?;
    let bad = ws.dir("decks").join("b.pptx");
    std::fs::write(&bad, b"not a zip archive")?;
    let output = ws.root.path().join("combined.pptx");

    let result = DeckCombiner::new(LayoutConfig::default()).combine(&[good, bad], &output);

    assert!(result.is_err());
    assert!(!output.exists());
    Ok(())
}

#[test]
fn empty_source_list_is_an_error() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let output = ws.root.path().join("combined.pptx");
    let combiner = DeckCombiner::new(LayoutConfig::default());

    assert!(combiner.combine(&[], &output).is_err());
    assert!(combiner.combine_dir(&ws.dir("decks"), &output).is_err());
    assert!(!output.exists());
    Ok(())
}

#[test]
fn combine_dir_sorts_by_name_and_skips_its_output() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    single_slide_deck(&ws, "b.pptx", "second")?;
    single_slide_deck(&ws, "a.pptx", "first")?;
    let output = ws.dir("decks").join("z_combined.pptx");
    let combiner = DeckCombiner::new(LayoutConfig::default());

    combiner.combine_dir(&ws.dir("decks"), &output)?;
    // second run must not fold the first combined deck back in
    combiner.combine_dir(&ws.dir("decks"), &output)?;

    let combined = read_deck(&output)?;
    let texts: Vec<_> = combined.slides().iter().filter_map(|s| s.text()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    Ok(())
}
