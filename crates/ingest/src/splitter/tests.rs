//! Tests for the recursive splitter.

use std::path::Path;

use docprep_core::Document;

use super::helpers::{
    char_len, exceeds_chunk_size, merge_spans, select_separator, split_keeping_separator,
};
use super::{split_pdf, SplitError, SplitterConfig, TextSplitter};
use crate::document::ExtractionError;

fn splitter(chunk_size: usize, chunk_overlap: usize) -> TextSplitter {
    TextSplitter::new(
        SplitterConfig::default()
            .with_chunk_size(chunk_size)
            .with_chunk_overlap(chunk_overlap),
    )
    .unwrap()
}

/// Rebuild the source text from chunk spans, skipping the overlapping prefix
/// of each chunk.
fn reconstruct(text: &str, spans: &[std::ops::Range<usize>]) -> String {
    let mut out = String::new();
    let mut end = 0usize;
    for span in spans {
        assert!(span.start <= end, "gap before chunk at {}", span.start);
        assert!(span.end > end, "chunk at {} adds nothing", span.start);
        out.push_str(&text[end..span.end]);
        end = span.end;
    }
    out
}

/// Check every chunk invariant for one text/config pair.
fn assert_invariants(text: &str, s: &TextSplitter) {
    let config = s.config();
    let spans = s.split_spans(text);
    for span in &spans {
        assert!(
            char_len(text, span) <= config.chunk_size,
            "chunk {:?} longer than {}",
            &text[span.clone()],
            config.chunk_size
        );
    }
    for pair in spans.windows(2) {
        let overlap = if pair[1].start < pair[0].end {
            char_len(text, &(pair[1].start..pair[0].end))
        } else {
            0
        };
        assert!(overlap <= config.chunk_overlap, "overlap {overlap} too large");
    }
    assert_eq!(reconstruct(text, &spans), text);
}

/// Deterministic pseudo-random prose with paragraph and line breaks.
fn sample_text(seed: u64, words: usize) -> String {
    const VOCAB: &[&str] = &[
        "foundry", "pipeline", "ontology", "a", "dataset", "is", "transforms", "the",
        "über", "naïve", "object", "x", "incrementally", "builds", "on", "schedules",
    ];
    let mut state = seed;
    let mut out = String::new();
    for i in 0..words {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let word = VOCAB[(state >> 33) as usize % VOCAB.len()];
        if i > 0 {
            out.push_str(match (state >> 20) % 23 {
                0 => "\n\n",
                1 | 2 => "\n",
                _ => " ",
            });
        }
        out.push_str(word);
    }
    out
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn default_config_matches_one_shot_settings() {
    let config = SplitterConfig::default();
    assert_eq!(config.chunk_size, 512);
    assert_eq!(config.chunk_overlap, 64);
    assert_eq!(config.separators, vec!["\n\n", "\n", " ", ""]);
}

#[test]
fn overlap_not_smaller_than_size_is_rejected() {
    let err = TextSplitter::new(SplitterConfig::default().with_chunk_size(10).with_chunk_overlap(10))
        .unwrap_err();
    assert!(matches!(err, SplitError::InvalidConfig(_)));
}

#[test]
fn empty_separator_list_is_rejected() {
    let config = SplitterConfig::default().with_separators(Vec::<String>::new());
    assert!(TextSplitter::new(config).is_err());
}

// ── Helpers ─────────────────────────────────────────────────────────

#[test]
fn separator_selection_prefers_coarsest_present() {
    let seps: Vec<String> = vec!["\n\n".into(), "\n".into(), " ".into(), "".into()];
    let text = "one two\nthree";
    assert_eq!(select_separator(text, &(0..text.len()), &seps), ("\n", 2));
    let text = "nospaces";
    assert_eq!(select_separator(text, &(0..text.len()), &seps), ("", 4));
}

#[test]
fn separator_selection_falls_back_to_last() {
    let seps: Vec<String> = vec!["\n\n".into(), " ".into()];
    let text = "nospaces";
    assert_eq!(select_separator(text, &(0..text.len()), &seps), (" ", 2));
}

#[test]
fn separator_stays_with_following_piece() {
    let text = "a b  c";
    let pieces: Vec<&str> = split_keeping_separator(text, &(0..text.len()), " ")
        .into_iter()
        .map(|s| &text[s])
        .collect();
    assert_eq!(pieces, vec!["a", " b", " ", " c"]);
}

#[test]
fn empty_separator_splits_on_char_boundaries() {
    let text = "aé漢";
    let pieces: Vec<&str> = split_keeping_separator(text, &(0..text.len()), "")
        .into_iter()
        .map(|s| &text[s])
        .collect();
    assert_eq!(pieces, vec!["a", "é", "漢"]);
}

#[test]
fn merge_keeps_overlap_from_previous_window() {
    let text = "aaa bbb ccc";
    let splits = split_keeping_separator(text, &(0..text.len()), " ");
    let mut out = Vec::new();
    merge_spans(text, &splits, 8, 4, &mut out);
    let chunks: Vec<&str> = out.into_iter().map(|s| &text[s]).collect();
    assert_eq!(chunks, vec!["aaa bbb", " bbb ccc"]);
}

// ── Splitting ───────────────────────────────────────────────────────

#[test]
fn paragraphs_merge_up_to_chunk_size() {
    let s = splitter(50, 10);
    let text = "This is a paragraph.\n\nThis is another paragraph.\n\nAnd a third one.";
    let chunks = s.split_text(text);
    assert_eq!(
        chunks,
        vec![
            "This is a paragraph.\n\nThis is another paragraph.",
            "\n\nAnd a third one.",
        ]
    );
}

#[test]
fn words_slide_with_overlap() {
    let s = splitter(10, 4);
    let chunks = s.split_text("aaa bbb ccc ddd eee");
    assert_eq!(chunks, vec!["aaa bbb", " bbb ccc", " ccc ddd", " ddd eee"]);
}

#[test]
fn characters_used_when_no_separator_present() {
    let s = splitter(4, 1);
    let chunks = s.split_text("abcdefghij");
    assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);
}

#[test]
fn oversized_paragraph_descends_to_finer_separators() {
    let s = splitter(10, 0);
    let text = "short\n\nthis paragraph is long";
    let chunks = s.split_text(text);
    assert_eq!(chunks, vec!["short", "\n", "\nthis", " paragraph", " is long"]);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn unsplittable_unit_is_kept_whole() {
    let s = TextSplitter::new(
        SplitterConfig::default()
            .with_chunk_size(5)
            .with_chunk_overlap(1)
            .with_separators(["\n\n", "\n", " "]),
    )
    .unwrap();
    let chunks = s.split_text("ab abcdefgh cd");
    assert_eq!(chunks, vec!["ab", " abcdefgh", " cd"]);
}

#[test]
fn piece_of_exactly_chunk_size_is_not_oversized() {
    let text = "abcde fg";
    assert!(!exceeds_chunk_size(text, &(0..5), 5));
    assert!(exceeds_chunk_size(text, &(0..6), 5));

    let s = TextSplitter::new(
        SplitterConfig::default()
            .with_chunk_size(5)
            .with_chunk_overlap(0)
            .with_separators([" "]),
    )
    .unwrap();
    assert_eq!(s.split_text(text), vec!["abcde", " fg"]);
}

#[test]
fn single_character_chunks() {
    let s = splitter(1, 0);
    assert_eq!(s.split_text("abc"), vec!["a", "b", "c"]);
    let text = "abc";
    assert!(s.split_spans(text).iter().all(|span| !exceeds_chunk_size(text, span, 1)));
}

#[test]
fn text_shorter_than_chunk_is_one_chunk() {
    let s = splitter(100, 20);
    assert_eq!(s.split_text("just a few words"), vec!["just a few words"]);
}

#[test]
fn empty_text_has_no_chunks() {
    assert!(splitter(100, 20).split_text("").is_empty());
}

#[test]
fn length_counts_characters_not_bytes() {
    let s = splitter(5, 0);
    let chunks = s.split_text("ééééé");
    assert_eq!(chunks, vec!["ééééé"]);
}

// ── Invariants ──────────────────────────────────────────────────────

#[test]
fn invariants_hold_on_generated_text() {
    for (seed, size, overlap) in [(1, 512, 64), (2, 40, 8), (3, 17, 5), (4, 9, 0), (5, 3, 2), (6, 64, 63)] {
        let text = sample_text(seed, 600);
        assert_invariants(&text, &splitter(size, overlap));
    }
}

#[test]
fn invariants_hold_with_blank_runs() {
    let text = "\n\n\n\nalpha\n\n\n\n\n beta  gamma \n\n\n";
    for (size, overlap) in [(1, 0), (2, 1), (5, 2), (100, 10)] {
        assert_invariants(text, &splitter(size, overlap));
    }
}

#[test]
fn default_settings_keep_chunks_bounded() {
    let text = sample_text(42, 3000);
    let s = TextSplitter::new(SplitterConfig::default()).unwrap();
    let chunks = s.split_text(&text);
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.chars().count() <= 512));
    assert_invariants(&text, &s);
}

// ── Documents and streams ───────────────────────────────────────────

#[test]
fn chunks_carry_page_metadata_and_offsets() {
    let s = splitter(10, 4);
    let doc = Document::new("manual.pdf", 7, "aaa bbb ccc ddd eee");
    let chunks = s.split_document(&doc);
    assert_eq!(chunks.len(), 4);
    for chunk in &chunks {
        assert_eq!(chunk.source, "manual.pdf");
        assert_eq!(chunk.page_number, 7);
        assert_eq!(&doc.text[chunk.start_index..chunk.end_index()], chunk.content);
    }
    assert_eq!(chunks[1].start_index, 3);
}

#[test]
fn stream_yields_pages_in_order_without_cross_page_overlap() {
    let s = splitter(10, 4);
    let docs = vec![
        Document::new("doc.pdf", 1, "alpha bravo charlie"),
        Document::new("doc.pdf", 2, "delta echo"),
    ];
    let chunks: Vec<_> = s.split_documents(docs).collect();
    let pages: Vec<usize> = chunks.iter().map(|c| c.page_number).collect();
    assert_eq!(pages, vec![1, 1, 1, 2]);
    assert_eq!(chunks[2].content, " charlie");
    assert_eq!(chunks[3].content, "delta echo");
    assert_eq!(chunks[3].start_index, 0);
}

#[test]
fn stream_splits_lazily() {
    let s = splitter(10, 0);
    let docs = vec![
        Document::new("doc.pdf", 1, "one"),
        Document::new("doc.pdf", 2, "two"),
        Document::new("doc.pdf", 3, "three"),
    ];
    let mut stream = s.split_documents(docs);
    assert_eq!(stream.emitted(), 0);
    assert_eq!(stream.next().map(|c| c.page_number), Some(1));
    assert_eq!(stream.emitted(), 1);
    assert_eq!(stream.by_ref().count(), 2);
    assert!(stream.next().is_none());
}

#[test]
fn split_pdf_reports_missing_file() {
    let err = split_pdf(Path::new("definitely/missing.pdf"), &SplitterConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        SplitError::Extraction(ExtractionError::FileAccess { .. })
    ));
}

#[test]
fn split_pdf_checks_config_before_reading() {
    let config = SplitterConfig::default().with_chunk_size(0);
    let err = split_pdf(Path::new("definitely/missing.pdf"), &config).unwrap_err();
    assert!(matches!(err, SplitError::InvalidConfig(_)));
}
