//! Illustration image files.

use crate::filesystem::{ensure_dir, write_atomic};
use std::path::{Path, PathBuf};
use storyloom_core::StoryName;
use storyloom_error::StoryloomResult;

/// Directory of illustrations named `<stem>_image_<n>.png`.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Opens the store, creating the directory if needed.
    #[tracing::instrument(skip(dir))]
    pub fn new(dir: impl Into<PathBuf>) -> StoryloomResult<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    /// Opens the store without touching the filesystem.
    ///
    /// Lookups against a missing directory simply find nothing.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the `ordinal`-th image for `story`.
    pub fn path_for(&self, story: &StoryName, ordinal: usize) -> PathBuf {
        self.dir.join(story.image_file_name(ordinal))
    }

    /// Writes (or overwrites) an image.
    #[tracing::instrument(skip(self, data), fields(story = %story, size = data.len()))]
    pub fn write_image(
        &self,
        story: &StoryName,
        ordinal: usize,
        data: &[u8],
    ) -> StoryloomResult<PathBuf> {
        let path = self.path_for(story, ordinal);
        write_atomic(&path, data)?;
        tracing::info!(path = %path.display(), "Image saved");
        Ok(path)
    }

    /// Existing images among ordinals `1..=limit`, in ordinal order.
    ///
    /// Missing candidates are skipped; illustrations are optional.
    pub fn find_images(&self, story: &StoryName, limit: usize) -> Vec<PathBuf> {
        (1..=limit)
            .map(|ordinal| self.path_for(story, ordinal))
            .filter(|path| {
                let exists = path.is_file();
                if !exists {
                    tracing::debug!(path = %path.display(), "Image not found, skipping");
                }
                exists
            })
            .collect()
    }
}
