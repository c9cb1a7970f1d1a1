//! Trait definitions for Storyloom.
//!
//! The pipeline talks to three external collaborators through these traits:
//! a theme source, a story drafting service and an illustration service.

mod traits;

pub use traits::{Illustrator, StoryDrafter, ThemeSource};
