//! Story text files.

use crate::filesystem::{ensure_dir, list_files, write_atomic};
use std::path::{Path, PathBuf};
use storyloom_core::Theme;
use storyloom_error::{StoryloomResult, StorageError, StorageErrorKind};

/// Directory of drafted story text files named `story_<index>_<slug>.txt`.
#[derive(Debug, Clone)]
pub struct StoryStore {
    dir: PathBuf,
}

impl StoryStore {
    /// Opens the store, creating the directory if needed.
    #[tracing::instrument(skip(dir))]
    pub fn new(dir: impl Into<PathBuf>) -> StoryloomResult<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a story for `theme` is stored at.
    pub fn path_for(&self, theme: &Theme) -> PathBuf {
        self.dir.join(theme.story_name().story_file_name())
    }

    /// Writes (or overwrites) the story for `theme`.
    #[tracing::instrument(skip(self, text), fields(theme = %theme.text(), len = text.len()))]
    pub fn write_story(&self, theme: &Theme, text: &str) -> StoryloomResult<PathBuf> {
        let path = self.path_for(theme);
        write_atomic(&path, text.as_bytes())?;
        tracing::info!(path = %path.display(), "Story saved");
        Ok(path)
    }

    /// Reads a story file as UTF-8.
    pub fn read_story(path: &Path) -> StoryloomResult<String> {
        std::fs::read_to_string(path).map_err(|e| {
            let kind = if e.kind() == std::io::ErrorKind::NotFound {
                StorageErrorKind::NotFound(path.display().to_string())
            } else {
                StorageErrorKind::FileRead(format!("{}: {}", path.display(), e))
            };
            StorageError::new(kind).into()
        })
    }

    /// All story files, sorted by file name.
    pub fn list(&self) -> StoryloomResult<Vec<PathBuf>> {
        list_files(&self.dir, "txt")
    }
}
