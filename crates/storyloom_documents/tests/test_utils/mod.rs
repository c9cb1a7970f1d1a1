//! Fixtures shared by the document tests.

#![allow(dead_code)]

use std::io::Read;
use std::path::{Path, PathBuf};
use storyloom_core::{DocumentFormat, LayoutConfig};
use storyloom_documents::DocumentAssembler;

/// 2x2 RGB PNG.
pub const TEST_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x08, 0x02, 0x00, 0x00, 0x00, 0xfd,
    0xd4, 0x9a, 0x73, 0x00, 0x00, 0x00, 0x10, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0xf8,
    0xcf, 0xc0, 0x00, 0x44, 0x0c, 0x10, 0x0a, 0x00, 0x1f, 0xee, 0x03, 0xfd, 0x8b, 0x5f, 0x14,
    0xd4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// Workspace layout under a temp dir.
pub struct Workspace {
    pub root: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> anyhow::Result<Self> {
        let root = tempfile::tempdir()?;
        for dir in ["stories", "images", "pdfs", "decks"] {
            std::fs::create_dir_all(root.path().join(dir))?;
        }
        Ok(Self { root })
    }

    pub fn dir(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    pub fn write_story(&self, stem: &str, text: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir("stories").join(format!("{stem}.txt"));
        std::fs::write(&path, text)?;
        Ok(path)
    }

    pub fn write_image(&self, stem: &str, ordinal: usize) -> anyhow::Result<PathBuf> {
        let path = self.dir("images").join(format!("{stem}_image_{ordinal}.png"));
        std::fs::write(&path, TEST_PNG)?;
        Ok(path)
    }

    pub fn assembler(&self, layout: LayoutConfig) -> DocumentAssembler {
        DocumentAssembler::new(self.dir("images"), self.dir("pdfs"), self.dir("decks"), layout)
    }

    /// Builds a deck for a story and returns its path.
    pub fn deck_for(&self, stem: &str, text: &str) -> anyhow::Result<PathBuf> {
        let story = self.write_story(stem, text)?;
        let handle = self
            .assembler(LayoutConfig::default())
            .assemble(&story, DocumentFormat::Deck)?;
        Ok(handle.path().clone())
    }
}

/// Every `sz` attribute on the slides of a deck, in slide part order.
pub fn slide_font_sizes(path: &Path) -> anyhow::Result<Vec<String>> {
    let size = regex::Regex::new(r#"\bsz="(\d+)""#)?;
    let mut archive = zip::ZipArchive::new(std::fs::File::open(path)?)?;
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    names.sort();

    let mut sizes = Vec::new();
    for name in names {
        let mut xml = String::new();
        archive.by_name(&name)?.read_to_string(&mut xml)?;
        sizes.extend(size.captures_iter(&xml).map(|c| c[1].to_string()));
    }
    Ok(sizes)
}

/// `count` distinct words.
pub fn words(count: usize) -> String {
    (0..count).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
}
