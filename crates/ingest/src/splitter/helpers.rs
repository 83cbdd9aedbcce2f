//! Span-level splitting and merging used by the recursive splitter.
//!
//! All functions work on byte ranges into one source string so that every
//! produced chunk is an exact substring of the input.

use std::collections::VecDeque;
use std::ops::Range;

pub(crate) type Span = Range<usize>;

/// Length of a span in characters.
pub(crate) fn char_len(text: &str, span: &Span) -> usize {
    text[span.clone()].chars().count()
}

/// A piece of exactly `chunk_size` still fits.
pub(crate) fn exceeds_chunk_size(text: &str, span: &Span, chunk_size: usize) -> bool {
    char_len(text, span) > chunk_size
}

/// Pick the first separator that occurs in `text[span]`.
///
/// Returns the separator and the index of the separator after it, so the
/// caller can recurse with the finer remainder. The empty separator always
/// matches. When nothing matches, the last separator is returned with no
/// finer separators left.
pub(crate) fn select_separator<'a>(
    text: &str,
    span: &Span,
    separators: &'a [String],
) -> (&'a str, usize) {
    let haystack = &text[span.clone()];
    for (i, sep) in separators.iter().enumerate() {
        if sep.is_empty() || haystack.contains(sep.as_str()) {
            return (sep.as_str(), i + 1);
        }
    }
    let last = separators.last().map(String::as_str).unwrap_or("");
    (last, separators.len())
}

/// Split `text[span]` on `separator`, keeping each separator attached to the
/// start of the piece that follows it. Empty pieces are dropped, so the
/// returned spans are contiguous and cover the input span exactly.
pub(crate) fn split_keeping_separator(text: &str, span: &Span, separator: &str) -> Vec<Span> {
    let base = span.start;
    let haystack = &text[span.clone()];

    if separator.is_empty() {
        return haystack
            .char_indices()
            .map(|(i, c)| base + i..base + i + c.len_utf8())
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = base;
    for (i, _) in haystack.match_indices(separator) {
        let at = base + i;
        if at > start {
            pieces.push(start..at);
        }
        start = at;
    }
    if span.end > start {
        pieces.push(start..span.end);
    }
    pieces
}

/// Greedily merge consecutive small spans into windows of at most
/// `chunk_size` characters, carrying up to `chunk_overlap` trailing
/// characters into the next window.
///
/// Every input span must be shorter than `chunk_size`.
pub(crate) fn merge_spans(
    text: &str,
    splits: &[Span],
    chunk_size: usize,
    chunk_overlap: usize,
    out: &mut Vec<Span>,
) {
    let mut window: VecDeque<(Span, usize)> = VecDeque::new();
    let mut total = 0usize;

    for split in splits {
        let len = char_len(text, split);

        if total + len > chunk_size && !window.is_empty() {
            push_window(&window, out);
            // Drop from the front until only the overlap remains and the
            // next split fits.
            while total > chunk_overlap || (total + len > chunk_size && total > 0) {
                match window.pop_front() {
                    Some((_, dropped)) => total -= dropped,
                    None => break,
                }
            }
        }

        window.push_back((split.clone(), len));
        total += len;
    }

    if !window.is_empty() {
        push_window(&window, out);
    }
}

fn push_window(window: &VecDeque<(Span, usize)>, out: &mut Vec<Span>) {
    if let (Some((first, _)), Some((last, _))) = (window.front(), window.back()) {
        out.push(first.start..last.end);
    }
}
