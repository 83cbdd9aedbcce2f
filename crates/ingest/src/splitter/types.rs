//! Splitter configuration and errors.

use docprep_core::config::{validate_sizes, ChunkingConfig, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use docprep_core::DocprepError;
use thiserror::Error;

use crate::document::ExtractionError;

/// Paragraph break, line break, space, then any character.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    InvalidConfig(#[from] DocprepError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

// ── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterConfig {
    /// Maximum characters per chunk (default: 512).
    pub chunk_size: usize,
    /// Characters repeated from the end of the previous chunk (default: 64).
    pub chunk_overlap: usize,
    /// Separators in priority order, coarsest first. An empty string splits
    /// between characters.
    pub separators: Vec<String>,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&ChunkingConfig> for SplitterConfig {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            ..Self::default()
        }
    }
}

impl SplitterConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_chunk_overlap(mut self, chunk_overlap: usize) -> Self {
        self.chunk_overlap = chunk_overlap;
        self
    }

    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), DocprepError> {
        validate_sizes(self.chunk_size, self.chunk_overlap)?;
        if self.separators.is_empty() {
            return Err(DocprepError::Config(
                "at least one separator is required".to_string(),
            ));
        }
        Ok(())
    }
}
