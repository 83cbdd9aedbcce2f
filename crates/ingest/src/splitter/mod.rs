//! Recursive separator-based text splitting.
//!
//! Splits page text into overlapping chunks bounded by a character count,
//! preferring paragraph breaks, then line breaks, then spaces, then single
//! characters.

mod helpers;
mod recursive;
mod stream;
mod types;

pub use recursive::{split_pdf, TextSplitter};
pub use stream::ChunkStream;
pub use types::{SplitError, SplitterConfig, DEFAULT_SEPARATORS};

#[cfg(test)]
mod tests;
