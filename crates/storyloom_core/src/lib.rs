//! Core data types for Storyloom.
//!
//! This crate provides the foundation data types shared by every stage of the
//! pipeline: themes, story names, document blocks and layout settings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block;
mod format;
mod layout;
mod media;
mod request;
mod story;
mod theme;

pub use block::{Block, Geometry, ImageBlock, TitleBlock};
pub use format::{DocumentFormat, DocumentHandle};
pub use layout::{LayoutConfig, LayoutConfigBuilder, EMU_PER_INCH, EMU_PER_POINT};
pub use media::ImageFormat;
pub use request::{DraftRequest, DraftRequestBuilder};
pub use story::StoryName;
pub use theme::Theme;
