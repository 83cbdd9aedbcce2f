use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docprep_core::config::{ChunkingConfig, InstructConfig};

/// Prepare instruction-tuning data from a PDF.
///
/// Every flag is optional: unset values come from `DOCPREP_*` environment
/// variables (or `.env`), then from built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "docprep", version, about = "Prepare instruction-tuning data from a PDF")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a PDF into overlapping text chunks
    Split(SplitArgs),
    /// Flatten generated question/answer pairs into an instruction dataset
    Reformat(ReformatArgs),
}

#[derive(Args, Debug, Default)]
pub struct SplitArgs {
    /// PDF to split (default: palantir_foundry_tech_doc.pdf)
    #[arg(long)]
    pub pdf: Option<PathBuf>,

    /// Maximum characters per chunk (default: 512)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters repeated between adjacent chunks (default: 64)
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// Write the chunks to this file as a JSON array
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Skip the coloured split summary
    #[arg(long, short)]
    pub quiet: bool,
}

impl SplitArgs {
    /// Apply flag overrides on top of the environment config.
    pub fn resolve(&self, base: &ChunkingConfig) -> ChunkingConfig {
        ChunkingConfig {
            pdf_path: self.pdf.clone().unwrap_or_else(|| base.pdf_path.clone()),
            chunk_size: self.chunk_size.unwrap_or(base.chunk_size),
            chunk_overlap: self.chunk_overlap.unwrap_or(base.chunk_overlap),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ReformatArgs {
    /// Generated pairs keyed by chunk id (default: pftech1data.json)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Destination file, overwritten (default: data/instruction.json)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Skip the coloured chunk and record previews
    #[arg(long, short)]
    pub quiet: bool,
}

impl ReformatArgs {
    pub fn resolve(&self, base: &InstructConfig) -> InstructConfig {
        InstructConfig {
            input_path: self.input.clone().unwrap_or_else(|| base.input_path.clone()),
            output_path: self.output.clone().unwrap_or_else(|| base.output_path.clone()),
        }
    }
}
