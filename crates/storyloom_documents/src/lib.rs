//! Document assembly for Storyloom.
//!
//! Turns a story text file plus whatever illustrations exist for it into a
//! paginated PDF or a slide deck, and merges slide decks into one.
//!
//! - [`DocumentPlan`] is the ordered block sequence for a document. It depends
//!   only on the story text, its name and the image files found.
//! - [`DocumentAssembler`] reads a story, plans it, renders it with [`PdfWriter`]
//!   or [`write_deck`] and writes the result atomically.
//! - [`DeckCombiner`] reads decks back with [`read_deck`] and concatenates
//!   their slides.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod combiner;
mod deck;
mod pdf;
mod plan;
mod text;

pub use assembler::DocumentAssembler;
pub use combiner::DeckCombiner;
pub use deck::{
    Deck, Picture, Shape, Slide, SlideLayout, SourceDeck, SourcePicture, SourceSlide, read_deck,
    read_deck_from, write_deck,
};
pub use pdf::PdfWriter;
pub use plan::DocumentPlan;
pub use text::{excerpt, paragraphs, slide_chunks};
