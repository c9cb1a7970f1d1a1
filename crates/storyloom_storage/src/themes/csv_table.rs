//! CSV theme files.

use std::path::Path;
use storyloom_error::{StoryloomResult, ThemeSourceError, ThemeSourceErrorKind};

/// Values of the column headed `column`, in row order.
pub(super) fn read_column(path: &Path, column: &str) -> StoryloomResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            ThemeSourceError::new(ThemeSourceErrorKind::Read(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

    let headers = reader
        .headers()
        .map_err(|e| ThemeSourceError::new(ThemeSourceErrorKind::Parse(e.to_string())))?
        .clone();
    let index = headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| {
            ThemeSourceError::new(ThemeSourceErrorKind::MissingColumn(column.to_string()))
        })?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ThemeSourceError::new(ThemeSourceErrorKind::Parse(e.to_string())))?;
        values.push(record.get(index).unwrap_or_default().to_string());
    }
    Ok(values)
}
