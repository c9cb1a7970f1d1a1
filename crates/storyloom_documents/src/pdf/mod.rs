//! PDF rendering with genpdf.

mod writer;

pub use writer::PdfWriter;
