//! Directory and file helpers shared by the stores.

use std::path::{Path, PathBuf};
use storyloom_error::{StoryloomResult, StorageError, StorageErrorKind};

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> StoryloomResult<()> {
    std::fs::create_dir_all(path).map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    Ok(())
}

/// Writes `data` to `path` through a sibling temp file and a rename.
///
/// Readers never observe a half-written file, and a failure part way through
/// leaves any previous version of `path` untouched.
#[tracing::instrument(skip(data), fields(path = %path.display(), size = data.len()))]
pub fn write_atomic(path: &Path, data: &[u8]) -> StoryloomResult<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        ensure_dir(parent)?;
    }

    let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        StorageError::new(StorageErrorKind::InvalidPath(path.display().to_string()))
    })?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    std::fs::write(&temp_path, data).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
        .into());
    }

    tracing::debug!("Wrote file atomically");
    Ok(())
}

/// Lists regular files in `dir` with the given extension, sorted by file name.
///
/// Directory listing order is not stable across platforms, so every stage
/// processes files in this sorted order instead. A missing directory yields an
/// empty list.
pub fn list_files(dir: &Path, extension: &str) -> StoryloomResult<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "Directory does not exist, nothing to list");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                dir.display(),
                e
            )))
            .into());
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if matches && !hidden && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
