mod cli;
mod terminal;

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use docprep_core::config::load_dotenv;
use docprep_core::json::write_json_atomic;
use docprep_core::Config;
use docprep_ingest::instruct::{build_records, load_source, read_records, write_records};
use docprep_ingest::{split_pdf, SplitterConfig};

use crate::cli::{CliArgs, Command, ReformatArgs, SplitArgs};
use crate::terminal::Terminal;

fn main() -> Result<()> {
    // .env first so RUST_LOG set there applies.
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env();
    config.log_summary();

    match args.command {
        Command::Split(split) => run_split(&config, &split),
        Command::Reformat(reformat) => run_reformat(&config, &reformat),
    }
}

fn run_split(config: &Config, args: &SplitArgs) -> Result<()> {
    let chunking = args.resolve(&config.chunking);
    chunking.validate().context("invalid chunking settings")?;
    let splitter_config = SplitterConfig::from(&chunking);

    let mut stream = split_pdf(&chunking.pdf_path, &splitter_config)
        .with_context(|| format!("failed to split '{}'", chunking.pdf_path.display()))?;

    let mut pages = BTreeSet::new();
    let mut longest = 0usize;
    let mut kept = Vec::new();
    for chunk in stream.by_ref() {
        pages.insert(chunk.page_number);
        longest = longest.max(chunk.char_len());
        if args.output.is_some() {
            kept.push(chunk);
        }
    }
    let total = stream.emitted();
    info!(chunks = total, pages = pages.len(), longest, "split complete");

    if let Some(ref output) = args.output {
        write_json_atomic(output, &kept)
            .with_context(|| format!("failed to write chunks to '{}'", output.display()))?;
        info!(path = %output.display(), chunks = kept.len(), "wrote chunks");
    }

    Terminal::new(args.quiet).print_split_summary(total, pages.len(), longest)?;
    Ok(())
}

fn run_reformat(config: &Config, args: &ReformatArgs) -> Result<()> {
    let paths = args.resolve(&config.instruct);
    let mut terminal = Terminal::new(args.quiet);

    let source = load_source(&paths.input_path)
        .with_context(|| format!("failed to load '{}'", paths.input_path.display()))?;
    for (id, chunk) in source.iter() {
        terminal.print_source_chunk(id, chunk)?;
    }

    let records = build_records(&source);
    write_records(&paths.output_path, &records)
        .with_context(|| format!("failed to write '{}'", paths.output_path.display()))?;
    info!(chunks = source.len(), records = records.len(), "reformat complete");

    if !args.quiet {
        // Preview from the file as written.
        let written = read_records(&paths.output_path)
            .with_context(|| format!("failed to read back '{}'", paths.output_path.display()))?;
        terminal.print_record_preview(&written)?;
    }
    Ok(())
}
