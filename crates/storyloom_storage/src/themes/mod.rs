//! Theme spreadsheets.

mod csv_table;
mod workbook;

use std::path::Path;
use storyloom_core::Theme;
use storyloom_error::{StoryloomResult, ThemeSourceError, ThemeSourceErrorKind};
use storyloom_interface::ThemeSource;

/// Header of the column themes are read from unless configured otherwise.
pub const DEFAULT_THEME_COLUMN: &str = "Theme";

/// Reads themes from one header-identified column of a spreadsheet or `.csv` file.
///
/// Rows are read in order; blank cells are skipped and the remaining themes are
/// numbered from 1.
#[derive(Debug, Clone)]
pub struct SpreadsheetThemeSource {
    column: String,
}

impl Default for SpreadsheetThemeSource {
    fn default() -> Self {
        Self::new(DEFAULT_THEME_COLUMN)
    }
}

impl SpreadsheetThemeSource {
    /// Reads the column with the given header.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Header this source looks for.
    pub fn column(&self) -> &str {
        &self.column
    }
}

impl ThemeSource for SpreadsheetThemeSource {
    #[tracing::instrument(skip(self), fields(path = %path.display(), column = %self.column))]
    fn load(&self, path: &Path) -> StoryloomResult<Vec<Theme>> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let cells = match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => workbook::read_column(path, &self.column)?,
            "csv" => csv_table::read_column(path, &self.column)?,
            other => {
                return Err(ThemeSourceError::new(ThemeSourceErrorKind::UnsupportedFormat(
                    if other.is_empty() {
                        path.display().to_string()
                    } else {
                        other.to_string()
                    },
                ))
                .into());
            }
        };

        let themes: Vec<Theme> = cells
            .into_iter()
            .map(|cell| cell.trim().to_string())
            .filter(|cell| !cell.is_empty())
            .enumerate()
            .map(|(i, text)| Theme::new(i + 1, text))
            .collect();

        tracing::info!(count = themes.len(), "Found themes");
        Ok(themes)
    }
}
