//! PDF text extraction.
//!
//! Wraps `lopdf` so callers only ever see [`ExtractionError`], never the
//! parser's own error type.

use super::file_names::{extension_of, SUPPORTED_EXTENSION};
use lopdf::Document;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Currently only PDF text extraction is supported.")]
    UnsupportedFormat,
    #[error("Could not process the document. It may be corrupt or encrypted.")]
    Unreadable,
}

/// Extract the text of every page, in page order, with no separator added
/// between pages.
///
/// An empty or whitespace-only result is not an error here; callers decide
/// what to do with a document that has no text layer.
pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if extension_of(&file_name).as_deref() != Some(SUPPORTED_EXTENSION) {
        tracing::warn!(file = %file_name, "Attempted text extraction from non-PDF file");
        return Err(ExtractionError::UnsupportedFormat);
    }

    let document = Document::load(path).map_err(|e| {
        tracing::error!(file = %file_name, error = %e, "Failed to open PDF");
        ExtractionError::Unreadable
    })?;

    if document.is_encrypted() {
        tracing::error!(file = %file_name, "PDF is encrypted");
        return Err(ExtractionError::Unreadable);
    }

    let pages = document.get_pages();
    tracing::info!(file = %file_name, total_pages = pages.len(), "Extracting text from PDF");

    let mut full_text = String::new();
    for page_number in pages.keys() {
        let page_text = document.extract_text(&[*page_number]).map_err(|e| {
            tracing::error!(
                file = %file_name,
                page = page_number,
                error = %e,
                "Failed to extract page text"
            );
            ExtractionError::Unreadable
        })?;
        full_text.push_str(&page_text);
    }

    tracing::info!(
        file = %file_name,
        text_length = full_text.chars().count(),
        "Text extracted"
    );
    if full_text.trim().is_empty() {
        tracing::warn!(file = %file_name, "PDF contained no extractable text");
    }

    Ok(full_text)
}
