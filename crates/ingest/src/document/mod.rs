mod pdf;

use std::path::Path;

use docprep_core::Document;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Cannot access '{path}': {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{0}' is not a PDF file")]
    NotPdf(String),
    #[error("PDF extraction failed for '{path}': {message}")]
    PdfError { path: String, message: String },
}

/// Load a PDF from disk as one `Document` per non-blank page.
pub fn load_pdf(path: &Path) -> Result<Vec<Document>, ExtractionError> {
    let source = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| ExtractionError::FileAccess {
        path: source.clone(),
        source: e,
    })?;

    let pages = pdf::extract_pdf(&bytes, &source)?;
    tracing::info!(path = %source, pages = pages.len(), "loaded pdf");
    Ok(pages)
}

pub use pdf::pages_from_texts;
