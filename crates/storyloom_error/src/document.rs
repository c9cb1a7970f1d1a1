//! Document assembly and combination error types.

/// Specific error conditions while building or reading documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DocumentErrorKind {
    /// PDF object model or serialization failure
    #[display("PDF error: {}", _0)]
    Pdf(String),
    /// Zip container could not be read or written
    #[display("Package error: {}", _0)]
    Package(String),
    /// XML part could not be parsed
    #[display("XML error in {}: {}", part, message)]
    Xml {
        /// Package part name
        part: String,
        /// Parser message
        message: String,
    },
    /// A part referenced by the package is missing
    #[display("Missing package part: {}", _0)]
    MissingPart(String),
    /// An image could not be embedded
    #[display("Image error: {}", _0)]
    Image(String),
    /// Combine was asked to merge nothing
    #[display("No source decks found in {}", _0)]
    EmptySources(String),
}

/// Document error with location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{DocumentError, DocumentErrorKind};
///
/// let err = DocumentError::new(DocumentErrorKind::MissingPart("ppt/presentation.xml".to_string()));
/// assert!(format!("{}", err).contains("ppt/presentation.xml"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Document Error: {} at line {} in {}", kind, line, file)]
pub struct DocumentError {
    /// The kind of error that occurred
    pub kind: DocumentErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DocumentError {
    /// Create a new document error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DocumentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
