mod test_utils;

use storyloom_core::{Block, DocumentFormat, LayoutConfig};
use storyloom_documents::read_deck;
use test_utils::{Workspace, words};

#[test]
fn pdf_has_one_text_block_per_paragraph_in_order() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let story = ws.write_story(
        "story_1_brave_hanuman",
        "Hanuman was strong.\n\nHe leapt across the sea.\n\nThe moral: be brave.",
    )?;

    let plan = ws.assembler(LayoutConfig::default()).plan(&story, DocumentFormat::Pdf)?;

    let texts: Vec<_> = plan.blocks().iter().filter_map(Block::as_text).collect();
    assert_eq!(
        texts,
        vec![
            "Hanuman was strong.",
            "He leapt across the sea.",
            "The moral: be brave."
        ]
    );
    Ok(())
}

#[test]
fn deck_has_ceil_words_over_limit_content_slides() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let text = words(1000);
    let story = ws.write_story("story_2_long", &text)?;
    let layout = LayoutConfig::builder().max_words_per_slide(450).build();

    let plan = ws.assembler(layout).plan(&story, DocumentFormat::Deck)?;

    let chunks: Vec<_> = plan.blocks().iter().filter_map(Block::as_text).collect();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks.join(" "), text);
    Ok(())
}

#[test]
fn assembling_twice_yields_identical_blocks() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let story = ws.write_story("story_3_golden_deer", "The deer shone.\n\nRama followed it.")?;
    ws.write_image("story_3_golden_deer", 1)?;
    let assembler = ws.assembler(LayoutConfig::default());

    for format in [DocumentFormat::Pdf, DocumentFormat::Deck] {
        let first = assembler.plan(&story, format)?;
        assembler.assemble(&story, format)?;
        let second = assembler.plan(&story, format)?;
        assembler.assemble(&story, format)?;
        assert_eq!(first, second);
    }
    Ok(())
}

#[test]
fn missing_images_still_produce_title_and_body() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let story = ws.write_story("story_4_no_pictures", "Just words.\n\nMore words.")?;
    let assembler = ws.assembler(LayoutConfig::default());

    let pdf = assembler.assemble(&story, DocumentFormat::Pdf)?;
    let deck = assembler.assemble(&story, DocumentFormat::Deck)?;

    assert!(pdf.path().is_file());
    let pdf_doc = lopdf::Document::load(pdf.path())?;
    assert_eq!(pdf_doc.get_pages().len(), 1);

    let source = read_deck(deck.path())?;
    assert_eq!(source.slides().len(), 2);
    assert!(source.slides().iter().all(|s| s.pictures().is_empty()));
    Ok(())
}

#[test]
fn output_paths_follow_story_stem() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let story = ws.write_story("story_5_kind_bhima", "Bhima shared his food.")?;
    let assembler = ws.assembler(LayoutConfig::default());

    let pdf = assembler.assemble(&story, DocumentFormat::Pdf)?;
    let deck = assembler.assemble(&story, DocumentFormat::Deck)?;

    assert_eq!(pdf.path(), &ws.dir("pdfs").join("story_5_kind_bhima.pdf"));
    assert_eq!(deck.path(), &ws.dir("decks").join("story_5_kind_bhima.pptx"));
    assert_eq!(*deck.format(), DocumentFormat::Deck);
    Ok(())
}

#[test]
fn deck_title_slide_and_picture_slide() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let text = "Arjuna practised archery every day until he could hit any target.";
    let story = ws.write_story("story_6_arjuna", text)?;
    ws.write_image("story_6_arjuna", 1)?;
    ws.write_image("story_6_arjuna", 2)?;

    let deck = ws
        .assembler(LayoutConfig::default())
        .assemble(&story, DocumentFormat::Deck)?;
    let source = read_deck(deck.path())?;

    // title, one content slide, one image slide (decks use only the first image)
    assert_eq!(source.slides().len(), 3);
    assert_eq!(
        source.slides()[0].paragraphs(),
        &vec!["Story 6 Arjuna".to_string(), text.to_string()]
    );
    assert_eq!(source.slides()[1].text().as_deref(), Some(text));
    let pictures = source.slides()[2].pictures();
    assert_eq!(pictures.len(), 1);
    assert_eq!(pictures[0].bytes(), &test_utils::TEST_PNG.to_vec());
    Ok(())
}

#[test]
fn pdf_embeds_both_images() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let story = ws.write_story("story_7_pictures", "A short tale.")?;
    ws.write_image("story_7_pictures", 1)?;
    ws.write_image("story_7_pictures", 2)?;

    let pdf = ws
        .assembler(LayoutConfig::default())
        .assemble(&story, DocumentFormat::Pdf)?;

    let doc = lopdf::Document::load(pdf.path())?;
    let images = doc
        .objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|subtype| subtype.as_name())
                .is_ok_and(|name| name == b"Image")
        })
        .count();
    assert_eq!(images, 2);
    Ok(())
}

#[test]
fn unreadable_story_writes_nothing() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    let missing = ws.dir("stories").join("story_8_absent.txt");
    let assembler = ws.assembler(LayoutConfig::default());

    assert!(assembler.assemble(&missing, DocumentFormat::Pdf).is_err());
    assert!(!ws.dir("pdfs").join("story_8_absent.pdf").exists());
    Ok(())
}
