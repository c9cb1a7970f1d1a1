//! Spreadsheet workbooks (`.xlsx`, `.xlsm`, `.xls`, `.ods`).

use calamine::{Reader, open_workbook_auto};
use std::path::Path;
use storyloom_error::{StoryloomResult, ThemeSourceError, ThemeSourceErrorKind};

/// Values of the column headed `column` on the first worksheet, in row order.
pub(super) fn read_column(path: &Path, column: &str) -> StoryloomResult<Vec<String>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        ThemeSourceError::new(ThemeSourceErrorKind::Read(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            ThemeSourceError::new(ThemeSourceErrorKind::Parse(format!(
                "{} has no worksheets",
                path.display()
            )))
        })?
        .map_err(|e| ThemeSourceError::new(ThemeSourceErrorKind::Parse(e.to_string())))?;

    let mut rows = range.rows();
    let index = rows
        .next()
        .and_then(|header| {
            header
                .iter()
                .position(|cell| cell.to_string().trim() == column)
        })
        .ok_or_else(|| {
            ThemeSourceError::new(ThemeSourceErrorKind::MissingColumn(column.to_string()))
        })?;

    Ok(rows
        .map(|row| row.get(index).map(ToString::to_string).unwrap_or_default())
        .collect())
}
