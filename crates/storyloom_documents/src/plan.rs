//! Block plans: the ordered layout units of a document.
//!
//! Planning is a pure function of the story text, its name and the image files
//! that exist, so assembling the same inputs twice yields the same blocks.

use crate::text::{excerpt, paragraphs, slide_chunks};
use std::path::PathBuf;
use storyloom_core::{
    Block, DocumentFormat, EMU_PER_POINT, Geometry, ImageBlock, LayoutConfig, StoryName,
    TitleBlock,
};

/// Everything needed to render one document.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct DocumentPlan {
    /// Story the document is built from
    name: StoryName,
    /// Output format
    format: DocumentFormat,
    /// Blocks in rendering order
    blocks: Vec<Block>,
}

impl DocumentPlan {
    /// Plans a document of `format` for the story `name` with body `text`.
    ///
    /// `images` are the image files found for the story, in ordinal order.
    pub fn new(
        name: StoryName,
        format: DocumentFormat,
        text: &str,
        images: &[PathBuf],
        layout: &LayoutConfig,
    ) -> Self {
        let blocks = match format {
            DocumentFormat::Pdf => pdf_blocks(&name, text, images, layout),
            DocumentFormat::Deck => deck_blocks(&name, text, images, layout),
        };
        Self {
            name,
            format,
            blocks,
        }
    }

    /// Number of body text blocks.
    pub fn text_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.as_text().is_some()).count()
    }

    /// Consumes the plan, returning its blocks.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

/// Title, then one text block per paragraph, then the images.
fn pdf_blocks(
    name: &StoryName,
    text: &str,
    images: &[PathBuf],
    layout: &LayoutConfig,
) -> Vec<Block> {
    let image_size = Geometry::new(
        0,
        0,
        points_to_emu(*layout.pdf_image_width_pt()),
        points_to_emu(*layout.pdf_image_height_pt()),
    );

    let mut blocks = vec![Block::Title(TitleBlock::new(name.title(), None))];
    blocks.extend(paragraphs(text).into_iter().map(Block::Text));
    blocks.extend(
        images
            .iter()
            .take(*layout.pdf_images_per_story())
            .map(|path| Block::Image(ImageBlock::new(path.clone(), image_size))),
    );
    blocks
}

/// Title slide with an excerpt subtitle, word-bounded content slides, then image slides.
fn deck_blocks(
    name: &StoryName,
    text: &str,
    images: &[PathBuf],
    layout: &LayoutConfig,
) -> Vec<Block> {
    let subtitle = excerpt(text, *layout.subtitle_chars());
    let mut blocks = vec![Block::Title(TitleBlock::new(name.title(), Some(subtitle)))];
    blocks.extend(
        slide_chunks(text, *layout.max_words_per_slide())
            .into_iter()
            .map(Block::Text),
    );
    blocks.extend(
        images
            .iter()
            .take(*layout.deck_images_per_story())
            .map(|path| Block::Image(ImageBlock::new(path.clone(), *layout.deck_picture()))),
    );
    blocks
}

fn points_to_emu(points: f32) -> i64 {
    (f64::from(points) * EMU_PER_POINT as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> StoryName {
        StoryName::new("story_1_brave_hanuman")
    }

    #[test]
    fn pdf_plan_has_one_text_block_per_paragraph() {
        let text = "One.\n\nTwo.\n\nThree.";
        let plan = DocumentPlan::new(
            name(),
            DocumentFormat::Pdf,
            text,
            &[],
            &LayoutConfig::default(),
        );

        let texts: Vec<_> = plan.blocks().iter().filter_map(Block::as_text).collect();
        assert_eq!(texts, vec!["One.", "Two.", "Three."]);
        assert!(
            matches!(&plan.blocks()[0], Block::Title(t) if t.title() == "Story 1 Brave Hanuman")
        );
    }

    #[test]
    fn deck_title_carries_first_hundred_characters() {
        let text = "x".repeat(250);
        let plan = DocumentPlan::new(
            name(),
            DocumentFormat::Deck,
            &text,
            &[],
            &LayoutConfig::default(),
        );

        let Block::Title(title) = &plan.blocks()[0] else {
            panic!("first block should be the title");
        };
        assert_eq!(title.subtitle().as_deref().map(str::len), Some(100));
    }

    #[test]
    fn pdf_images_are_sized_in_points() {
        let images = vec![PathBuf::from("a_image_1.png")];
        let plan = DocumentPlan::new(
            name(),
            DocumentFormat::Pdf,
            "Body.",
            &images,
            &LayoutConfig::default(),
        );

        let Some(Block::Image(image)) = plan.blocks().last() else {
            panic!("last block should be the image");
        };
        assert_eq!(image.geometry().width, 400 * EMU_PER_POINT);
        assert_eq!(image.geometry().height, 300 * EMU_PER_POINT);
    }

    #[test]
    fn deck_uses_only_configured_number_of_images() {
        let images = vec![PathBuf::from("a_image_1.png"), PathBuf::from("a_image_2.png")];
        let plan = DocumentPlan::new(
            name(),
            DocumentFormat::Deck,
            "Body.",
            &images,
            &LayoutConfig::default(),
        );

        let image_blocks = plan
            .blocks()
            .iter()
            .filter(|b| matches!(b, Block::Image(_)))
            .count();
        assert_eq!(image_blocks, 1);
    }
}
