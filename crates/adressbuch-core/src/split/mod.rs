//! Splitting raw OCR lines into structured address-book entries.

mod cleanup;
mod merge;
pub(crate) mod patterns;
mod splitter;

pub use cleanup::cleanup_text;
pub use merge::merge_lines;
pub use splitter::Splitter;
