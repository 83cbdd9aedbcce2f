use docprep_core::Document;

use super::ExtractionError;

/// The `%PDF-` header may be preceded by junk, but only within the first 1 KiB.
const HEADER_SEARCH_WINDOW: usize = 1024;

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

pub fn extract_pdf(bytes: &[u8], source: &str) -> Result<Vec<Document>, ExtractionError> {
    if !has_pdf_header(bytes) {
        return Err(ExtractionError::NotPdf(source.to_string()));
    }

    let texts = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
        ExtractionError::PdfError {
            path: source.to_string(),
            message: e.to_string(),
        }
    })?;

    let pages = pages_from_texts(source, texts);
    if pages.is_empty() {
        // Scanned or image-only PDFs extract to nothing.
        tracing::warn!(path = %source, "PDF contains no extractable text");
    }
    Ok(pages)
}

/// Turn per-page extracted text into documents.
///
/// Blank pages are dropped but the remaining pages keep their physical
/// 1-based page number.
pub fn pages_from_texts<I>(source: &str, texts: I) -> Vec<Document>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    texts
        .into_iter()
        .enumerate()
        .filter_map(|(i, page_text)| {
            let trimmed = page_text.as_ref().trim();
            (!trimmed.is_empty()).then(|| Document::new(source, i + 1, trimmed))
        })
        .collect()
}
