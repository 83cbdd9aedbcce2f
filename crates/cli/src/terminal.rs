use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use docprep_core::InstructionRecord;
use docprep_ingest::instruct::SourceChunk;

/// How many written records are echoed back after a reformat.
pub const RECORD_PREVIEW_LIMIT: usize = 10;

const CHUNK_DIVIDER: &str = "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const CHUNK: Color = Color::Yellow;
    const RECORDS: Color = Color::Magenta;
    const SUMMARY: Color = Color::Green;
    const DIM: Color = Color::DarkGrey;
}

/// Coloured diagnostic output. Does nothing when quiet.
pub struct Terminal<W: Write = io::Stdout> {
    out: W,
    quiet: bool,
}

impl Terminal {
    pub fn new(quiet: bool) -> Self {
        Self::with_writer(io::stdout(), quiet)
    }
}

impl<W: Write> Terminal<W> {
    pub fn with_writer(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    /// Print one processed source chunk followed by a divider.
    pub fn print_source_chunk(&mut self, id: &str, chunk: &SourceChunk) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        let body = serde_json::to_string(chunk)?;
        execute!(
            self.out,
            SetForegroundColor(Colors::CHUNK),
            Print(format!("{id}: {body}\n")),
            ResetColor,
            Print(format!("\n{CHUNK_DIVIDER}\n")),
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Print the first `RECORD_PREVIEW_LIMIT` records.
    pub fn print_record_preview(&mut self, records: &[InstructionRecord]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        let shown = &records[..records.len().min(RECORD_PREVIEW_LIMIT)];
        let body = serde_json::to_string(shown)?;
        execute!(
            self.out,
            SetForegroundColor(Colors::RECORDS),
            Print(format!("{body}\n")),
            ResetColor,
        )?;
        if records.len() > shown.len() {
            execute!(
                self.out,
                SetForegroundColor(Colors::DIM),
                Print(format!("... {} more\n", records.len() - shown.len())),
                ResetColor,
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Print the result of a split run.
    pub fn print_split_summary(&mut self, chunks: usize, pages: usize, longest: usize) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        execute!(
            self.out,
            SetForegroundColor(Colors::SUMMARY),
            Print(format!("{chunks} chunks from {pages} pages")),
            ResetColor,
            SetForegroundColor(Colors::DIM),
            Print(format!(" (longest {longest} chars)\n")),
            ResetColor,
        )?;
        self.out.flush()?;
        Ok(())
    }
}
