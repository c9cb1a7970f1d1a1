//! Theme source (spreadsheet) error types.

/// Specific error conditions while loading themes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ThemeSourceErrorKind {
    /// File extension is not a supported tabular format
    #[display("Unsupported theme file format: {}", _0)]
    UnsupportedFormat(String),
    /// File could not be opened or read
    #[display("Failed to read theme file: {}", _0)]
    Read(String),
    /// File contents could not be parsed
    #[display("Failed to parse theme file: {}", _0)]
    Parse(String),
    /// Header row does not contain the requested column
    #[display("Column '{}' not found in header row", _0)]
    MissingColumn(String),
}

/// Theme source error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Theme Source Error: {} at line {} in {}", kind, line, file)]
pub struct ThemeSourceError {
    /// The kind of error that occurred
    pub kind: ThemeSourceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ThemeSourceError {
    /// Create a new theme source error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ThemeSourceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
