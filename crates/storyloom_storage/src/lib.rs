//! Filesystem storage for Storyloom.
//!
//! Stages hand work to each other through files: themes are read from a
//! spreadsheet, stories are written as UTF-8 text, illustrations as image files.
//! Everything here uses deterministic names derived from the story stem, so
//! re-running a stage overwrites rather than duplicates.
//!
//! # Example
//!
//! ```rust
//! use storyloom_core::Theme;
//! use storyloom_storage::StoryStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoryStore::new("/tmp/storyloom/stories")?;
//! let path = store.write_story(&Theme::new(1, "Brave Hanuman"), "Once upon a time...")?;
//! assert!(path.ends_with("story_1_brave_hanuman.txt"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod images;
mod stories;
mod themes;

pub use filesystem::{ensure_dir, list_files, write_atomic};
pub use images::ImageStore;
pub use stories::StoryStore;
pub use themes::{SpreadsheetThemeSource, DEFAULT_THEME_COLUMN};
