//! Slide decks in the Office Open XML (`.pptx`) package format.

mod model;
mod parts;
mod reader;
mod writer;

pub use model::{Deck, Picture, Shape, Slide, SlideLayout};
pub use reader::{SourceDeck, SourcePicture, SourceSlide, read_deck, read_deck_from};
pub use writer::write_deck;
