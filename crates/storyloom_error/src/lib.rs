//! Error types for Storyloom.
//!
//! This crate provides the foundation error types used throughout the Storyloom workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyloom_error::{StoryloomResult, StorageError, StorageErrorKind};
//!
//! fn read_story() -> StoryloomResult<String> {
//!     Err(StorageError::new(StorageErrorKind::NotFound("story_1.txt".to_string())))?
//! }
//!
//! match read_story() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod document;
mod error;
mod service;
mod storage;
mod theme_source;

pub use config::ConfigError;
pub use document::{DocumentError, DocumentErrorKind};
pub use error::{StoryloomError, StoryloomErrorKind, StoryloomResult};
pub use service::{RetryableError, ServiceError, ServiceErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use theme_source::{ThemeSourceError, ThemeSourceErrorKind};
