use std::collections::VecDeque;

use docprep_core::{Chunk, Document};

use super::recursive::TextSplitter;

/// Consuming iterator over the chunks of a sequence of pages.
///
/// A page is only split once the chunks of the previous page have been
/// handed out. The stream owns its pages and cannot be restarted.
#[derive(Debug)]
pub struct ChunkStream {
    splitter: TextSplitter,
    pages: std::vec::IntoIter<Document>,
    pending: VecDeque<Chunk>,
    emitted: usize,
}

impl ChunkStream {
    pub(crate) fn new(splitter: TextSplitter, pages: Vec<Document>) -> Self {
        Self {
            splitter,
            pages: pages.into_iter(),
            pending: VecDeque::new(),
            emitted: 0,
        }
    }

    /// Number of chunks yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl Iterator for ChunkStream {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        loop {
            if let Some(chunk) = self.pending.pop_front() {
                self.emitted += 1;
                return Some(chunk);
            }
            let page = self.pages.next()?;
            let chunks = self.splitter.split_document(&page);
            tracing::debug!(page = page.page_number, chunks = chunks.len(), "split page");
            self.pending.extend(chunks);
        }
    }
}
