//! Top-level error wrapper types.

use crate::{ConfigError, DocumentError, ServiceError, StorageError, ThemeSourceError};

/// All error areas of the workspace.
///
/// # Examples
///
/// ```
/// use storyloom_error::{DocumentError, DocumentErrorKind, StoryloomError, StoryloomErrorKind};
///
/// let doc_err = DocumentError::new(DocumentErrorKind::EmptySources("no decks".to_string()));
/// let err: StoryloomError = doc_err.into();
/// assert!(matches!(err.kind(), StoryloomErrorKind::Document(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryloomErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Filesystem storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Drafting or illustration service error
    #[from(ServiceError)]
    Service(ServiceError),
    /// Document build, read or combine error
    #[from(DocumentError)]
    Document(DocumentError),
    /// Theme spreadsheet error
    #[from(ThemeSourceError)]
    ThemeSource(ThemeSourceError),
}

/// Storyloom error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StoryloomResult, ConfigError};
///
/// fn might_fail() -> StoryloomResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyloom Error: {}", _0)]
pub struct StoryloomError(Box<StoryloomErrorKind>);

impl StoryloomError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryloomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryloomErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StoryloomErrorKind
impl<T> From<T> for StoryloomError
where
    T: Into<StoryloomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyloom operations.
pub type StoryloomResult<T> = std::result::Result<T, StoryloomError>;
