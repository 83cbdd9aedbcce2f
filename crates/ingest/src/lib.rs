//! PDF loading, chunk splitting and instruction dataset reformatting.

pub mod document;
pub mod instruct;
pub mod splitter;

pub use document::{load_pdf, ExtractionError};
pub use instruct::{reformat_file, ReformatError, ReformatSummary};
pub use splitter::{split_pdf, ChunkStream, SplitError, SplitterConfig, TextSplitter};
