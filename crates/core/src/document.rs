use serde::{Deserialize, Serialize};

/// Prefix placed in front of the chunk context in every instruction question.
pub const CONTEXT_PREFIX: &str = "Context: ";

/// One page of source text, as produced by the PDF loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Path of the file the page was read from.
    pub source: String,
    /// 1-based physical page number.
    pub page_number: usize,
    pub text: String,
}

impl Document {
    pub fn new(source: impl Into<String>, page_number: usize, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            page_number,
            text: text.into(),
        }
    }
}

/// A bounded slice of a page's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub source: String,
    pub page_number: usize,
    /// Byte offset of `content` within the page text.
    pub start_index: usize,
}

impl Chunk {
    /// Byte offset one past the end of `content` within the page text.
    pub fn end_index(&self) -> usize {
        self.start_index + self.content.len()
    }

    /// Length in characters, the unit chunk sizes are measured in.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// A generated question/answer pair attached to a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// A flattened, training-ready example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    pub question: String,
    pub answer: String,
}

impl InstructionRecord {
    /// Build a record whose question carries the chunk context in front of it.
    pub fn from_pair(context: &str, pair: &QaPair) -> Self {
        Self {
            question: format!("{CONTEXT_PREFIX}{context} {}", pair.question),
            answer: pair.answer.clone(),
        }
    }
}
