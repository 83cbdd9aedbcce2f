//! The recursive character splitter.

use std::ops::Range;
use std::path::Path;

use docprep_core::{Chunk, Document};

use super::helpers::{char_len, exceeds_chunk_size, merge_spans, select_separator, split_keeping_separator, Span};
use super::stream::ChunkStream;
use super::types::{SplitError, SplitterConfig};
use crate::document::load_pdf;

/// Splits text into bounded, overlapping chunks.
///
/// Construction validates the configuration, so a `TextSplitter` can always
/// make progress.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    pub fn new(config: SplitterConfig) -> Result<Self, SplitError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Byte ranges of the chunks of `text`, in order.
    pub fn split_spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        if !text.is_empty() {
            self.split_recursive(text, 0..text.len(), &self.config.separators, &mut out);
        }
        out
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_spans(text)
            .into_iter()
            .map(|span| text[span].to_string())
            .collect()
    }

    /// Split one page, copying its metadata onto every chunk.
    pub fn split_document(&self, doc: &Document) -> Vec<Chunk> {
        self.split_spans(&doc.text)
            .into_iter()
            .map(|span| Chunk {
                content: doc.text[span.clone()].to_string(),
                source: doc.source.clone(),
                page_number: doc.page_number,
                start_index: span.start,
            })
            .collect()
    }

    /// Lazily split a sequence of pages, one page at a time.
    pub fn split_documents(&self, docs: Vec<Document>) -> ChunkStream {
        ChunkStream::new(self.clone(), docs)
    }

    fn split_recursive(&self, text: &str, span: Span, separators: &[String], out: &mut Vec<Span>) {
        let (separator, next) = select_separator(text, &span, separators);
        let finer = &separators[next..];
        let chunk_size = self.config.chunk_size;

        let mut good: Vec<Span> = Vec::new();
        for piece in split_keeping_separator(text, &span, separator) {
            if char_len(text, &piece) < chunk_size {
                good.push(piece);
                continue;
            }

            if !good.is_empty() {
                merge_spans(text, &good, chunk_size, self.config.chunk_overlap, out);
                good.clear();
            }

            if finer.is_empty() {
                if exceeds_chunk_size(text, &piece, chunk_size) {
                    tracing::warn!(
                        len = char_len(text, &piece),
                        chunk_size,
                        "keeping unsplittable piece longer than chunk size"
                    );
                }
                out.push(piece);
            } else {
                self.split_recursive(text, piece, finer, out);
            }
        }

        if !good.is_empty() {
            merge_spans(text, &good, chunk_size, self.config.chunk_overlap, out);
        }
    }
}

/// Load a PDF and lazily split its pages into chunks.
pub fn split_pdf(path: &Path, config: &SplitterConfig) -> Result<ChunkStream, SplitError> {
    let splitter = TextSplitter::new(config.clone())?;
    let docs = load_pdf(path)?;
    Ok(splitter.split_documents(docs))
}
