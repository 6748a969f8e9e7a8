//! PDF backend for the extractor. Kept small: per-page text via `pdf-extract`.

use std::panic;

use tracing::debug;

use super::ExtractionError;

/// Returns the visible text of every page, in page order.
///
/// `pdf-extract` can panic on some malformed documents; the panic is contained
/// here and reported as an ordinary extraction error.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let result = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes));

    match result {
        Ok(Ok(pages)) => {
            debug!("Extracted {} PDF pages", pages.len());
            Ok(pages)
        }
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf(
            "the document could not be parsed".to_string(),
        )),
    }
}

/// True when the payload starts with the PDF magic prefix.
pub fn is_pdf(head: &[u8]) -> bool {
    head.starts_with(b"%PDF-")
}
