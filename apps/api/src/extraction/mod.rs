//! Text Extractor: turns an uploaded resume (PDF or plain text) into one string.
//!
//! PDF: page texts joined in page order, each non-empty page followed by `\n`.
//! Plain text: UTF-8 with invalid byte sequences dropped.
//! No OCR, no layout reconstruction.

pub mod pdf;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("Could not extract text from the resume.")]
    NoText,
}

/// The two document kinds the upload surface admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Resolves the kind from the declared content type, then the file
    /// extension, then the `%PDF-` magic prefix. Returns `None` for anything
    /// that is neither PDF nor plain text.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>, head: &[u8]) -> Option<Self> {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match essence.as_deref() {
            Some("application/pdf") => return Some(DocumentKind::Pdf),
            Some("text/plain") => return Some(DocumentKind::PlainText),
            _ => {}
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Some(DocumentKind::Pdf),
            Some("txt") => Some(DocumentKind::PlainText),
            _ if pdf::is_pdf(head) => Some(DocumentKind::Pdf),
            _ => None,
        }
    }
}

/// Raw upload, consumed once by extraction.
#[derive(Debug)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub kind: DocumentKind,
    pub file_name: Option<String>,
}

/// Extracts the resume text. Fails with `NoText` when the result is empty or
/// whitespace-only, since nothing downstream can use it.
pub fn extract_text(document: &UploadedDocument) -> Result<String, ExtractionError> {
    let text = match document.kind {
        DocumentKind::Pdf => join_pages(pdf::extract_pages(&document.bytes)?),
        DocumentKind::PlainText => decode_utf8_dropping_invalid(&document.bytes),
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }
    Ok(text)
}

/// Concatenates page texts in order with a line break after each non-empty
/// page. Pages with no text at all contribute nothing.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        let page = page.as_ref();
        if page.is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text
}

/// Decodes UTF-8, silently dropping malformed sequences (no U+FFFD).
pub fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    if let Ok(valid) = std::str::from_utf8(bytes) {
        return valid.to_string();
    }
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
