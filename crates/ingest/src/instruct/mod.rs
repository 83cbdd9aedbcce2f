//! Flattening of generated question/answer pairs into an instruction dataset.
//!
//! Input is a JSON object keyed by chunk id:
//!
//! ```json
//! { "c1": { "context": "…", "generated": [ { "question": "…", "answer": "…" } ] } }
//! ```
//!
//! Output is a JSON array of `{ "question", "answer" }` records whose questions
//! carry the chunk context in front of them.

use std::path::Path;

use docprep_core::json::{read_json, write_json_atomic};
use docprep_core::{DocprepError, InstructionRecord, QaPair};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReformatError {
    #[error("Cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing field `{field}` in {location}")]
    MissingField { location: String, field: &'static str },
    #[error("Field `{field}` in {location} must be {expected}")]
    InvalidField {
        location: String,
        field: &'static str,
        expected: &'static str,
    },
    #[error("Output error: {0}")]
    Output(#[from] DocprepError),
}

/// One entry of the source mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceChunk {
    pub context: String,
    pub generated: Vec<QaPair>,
}

/// The parsed source mapping, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InstructionSource {
    chunks: IndexMap<String, SourceChunk>,
}

impl InstructionSource {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceChunk)> {
        self.chunks.iter().map(|(id, chunk)| (id.as_str(), chunk))
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total number of generated pairs across all chunks.
    pub fn pair_count(&self) -> usize {
        self.chunks.values().map(|c| c.generated.len()).sum()
    }
}

/// Summary of a completed `reformat_file` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReformatSummary {
    pub chunks: usize,
    pub records: usize,
}

// ── Parsing ─────────────────────────────────────────────────────────

/// Parse and validate the source JSON.
pub fn parse_source(json: &str) -> Result<InstructionSource, ReformatError> {
    let raw: IndexMap<String, Value> = serde_json::from_str(json)?;
    let mut chunks = IndexMap::with_capacity(raw.len());

    for (id, value) in raw {
        let obj = value.as_object().ok_or_else(|| ReformatError::InvalidField {
            location: format!("chunk '{id}'"),
            field: "chunk",
            expected: "an object",
        })?;
        let chunk = parse_chunk(&id, obj)?;
        chunks.insert(id, chunk);
    }

    Ok(InstructionSource { chunks })
}

fn parse_chunk(id: &str, obj: &Map<String, Value>) -> Result<SourceChunk, ReformatError> {
    let location = format!("chunk '{id}'");
    let context = string_field(obj, "context", &location)?;

    let generated = match obj.get("generated") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ReformatError::InvalidField {
                location,
                field: "generated",
                expected: "an array",
            })
        }
        None => return Err(ReformatError::MissingField { location, field: "generated" }),
    };

    let generated = generated
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let location = format!("chunk '{id}' generated[{i}]");
            let pair = item.as_object().ok_or_else(|| ReformatError::InvalidField {
                location: location.clone(),
                field: "generated",
                expected: "an array of objects",
            })?;
            Ok(QaPair {
                question: string_field(pair, "question", &location)?,
                answer: string_field(pair, "answer", &location)?,
            })
        })
        .collect::<Result<Vec<_>, ReformatError>>()?;

    Ok(SourceChunk { context, generated })
}

fn string_field(
    obj: &Map<String, Value>,
    field: &'static str,
    location: &str,
) -> Result<String, ReformatError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ReformatError::InvalidField {
            location: location.to_string(),
            field,
            expected: "a string",
        }),
        None => Err(ReformatError::MissingField {
            location: location.to_string(),
            field,
        }),
    }
}

// ── Transform ───────────────────────────────────────────────────────

/// Flatten every pair, in source order, into an instruction record.
pub fn build_records(source: &InstructionSource) -> Vec<InstructionRecord> {
    let mut records = Vec::with_capacity(source.pair_count());
    for (_, chunk) in source.iter() {
        records.extend(
            chunk
                .generated
                .iter()
                .map(|pair| InstructionRecord::from_pair(&chunk.context, pair)),
        );
    }
    records
}

// ── File I/O ────────────────────────────────────────────────────────

pub fn load_source(path: &Path) -> Result<InstructionSource, ReformatError> {
    let json = std::fs::read_to_string(path).map_err(|e| ReformatError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_source(&json)
}

/// Replace `path` with `records`. The file is never left half-written.
pub fn write_records(path: &Path, records: &[InstructionRecord]) -> Result<(), ReformatError> {
    write_json_atomic(path, records)?;
    tracing::info!(path = %path.display(), records = records.len(), "wrote instruction records");
    Ok(())
}

pub fn read_records(path: &Path) -> Result<Vec<InstructionRecord>, ReformatError> {
    Ok(read_json(path)?)
}

/// Load `input`, flatten it and overwrite `output`.
///
/// Validation happens before `output` is touched, so a malformed source
/// leaves any existing output in place.
pub fn reformat_file(input: &Path, output: &Path) -> Result<ReformatSummary, ReformatError> {
    let source = load_source(input)?;
    let records = build_records(&source);
    write_records(output, &records)?;
    Ok(ReformatSummary {
        chunks: source.len(),
        records: records.len(),
    })
}
