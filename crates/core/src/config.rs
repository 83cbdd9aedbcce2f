use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::DocprepError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    match profiled_env_opt(profile, key) {
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, default, "ignoring non-numeric env value");
            default
        }),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub chunking: ChunkingConfig,
    pub instruct: InstructConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: String::new(),
            chunking: ChunkingConfig::default(),
            instruct: InstructConfig::default(),
        }
    }
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `DOCPREP_PROFILE`. When set (e.g. `STAGING`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_opt("DOCPREP_PROFILE").unwrap_or_default();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        Self {
            chunking: ChunkingConfig::from_env_profiled(&p),
            instruct: InstructConfig::from_env_profiled(&p),
            profile: p,
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  chunking:  pdf={}, size={}, overlap={}",
            self.chunking.pdf_path.display(),
            self.chunking.chunk_size,
            self.chunking.chunk_overlap
        );
        tracing::info!(
            "  instruct:  input={}, output={}",
            self.instruct.input_path.display(),
            self.instruct.output_path.display()
        );
    }
}

// ── Chunking ──────────────────────────────────────────────────

pub const DEFAULT_PDF_PATH: &str = "palantir_foundry_tech_doc.pdf";
pub const DEFAULT_CHUNK_SIZE: usize = 512;
pub const DEFAULT_CHUNK_OVERLAP: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub pdf_path: PathBuf,
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters carried over from the end of one chunk into the next.
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            pdf_path: PathBuf::from(DEFAULT_PDF_PATH),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            pdf_path: PathBuf::from(profiled_env_or(p, "DOCPREP_PDF_PATH", DEFAULT_PDF_PATH)),
            chunk_size: profiled_env_usize(p, "DOCPREP_CHUNK_SIZE", DEFAULT_CHUNK_SIZE),
            chunk_overlap: profiled_env_usize(p, "DOCPREP_CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP),
        }
    }

    /// Reject sizes the splitter cannot make progress with.
    pub fn validate(&self) -> Result<(), DocprepError> {
        validate_sizes(self.chunk_size, self.chunk_overlap)
    }
}

/// Check a chunk size / overlap pair.
pub fn validate_sizes(chunk_size: usize, chunk_overlap: usize) -> Result<(), DocprepError> {
    if chunk_size == 0 {
        return Err(DocprepError::Config("chunk size must be greater than 0".to_string()));
    }
    if chunk_overlap >= chunk_size {
        return Err(DocprepError::Config(format!(
            "chunk overlap ({chunk_overlap}) must be smaller than chunk size ({chunk_size})"
        )));
    }
    Ok(())
}

// ── Instruction reformatting ──────────────────────────────────

pub const DEFAULT_QA_INPUT: &str = "pftech1data.json";
pub const DEFAULT_INSTRUCTION_OUTPUT: &str = "data/instruction.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructConfig {
    /// Generated question/answer pairs keyed by chunk id.
    pub input_path: PathBuf,
    /// Flattened instruction dataset destination.
    pub output_path: PathBuf,
}

impl Default for InstructConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_QA_INPUT),
            output_path: PathBuf::from(DEFAULT_INSTRUCTION_OUTPUT),
        }
    }
}

impl InstructConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            input_path: PathBuf::from(profiled_env_or(p, "DOCPREP_QA_INPUT", DEFAULT_QA_INPUT)),
            output_path: PathBuf::from(profiled_env_or(
                p,
                "DOCPREP_INSTRUCTION_OUTPUT",
                DEFAULT_INSTRUCTION_OUTPUT,
            )),
        }
    }
}
