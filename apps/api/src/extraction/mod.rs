//! Extractor — turns an uploaded PDF into plain text.
//!
//! `pdf-extract` does the work. It is synchronous and may panic on malformed
//! input, so every call runs on the blocking pool; a panic surfaces as a
//! `JoinError` and is reported like any other unparseable document.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// The PDF header must start within this many leading bytes.
const PDF_HEADER_WINDOW: usize = 1024;
const PDF_MAGIC: &[u8] = b"%PDF-";

/// One uploaded file. Lives only as long as the request that carried it.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("'{0}' is not a PDF document")]
    NotPdf(String),

    #[error("failed to parse '{filename}': {message}")]
    Parse { filename: String, message: String },

    #[error("PDF parser aborted on '{0}'")]
    Panicked(String),

    #[error("'{0}' contains no extractable text")]
    NoText(String),
}

/// Text extraction seam. `AppState` carries an `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError>;
}

/// Default extractor backed by `pdf-extract`.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let filename = document.filename.clone();
        if !has_pdf_header(&document.bytes) {
            return Err(ExtractionError::NotPdf(filename));
        }

        let bytes = document.bytes.clone();
        let parsed = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|_| ExtractionError::Panicked(filename.clone()))?;

        let text = parsed.map_err(|e| ExtractionError::Parse {
            filename: filename.clone(),
            message: e.to_string(),
        })?;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText(filename));
        }

        debug!(filename = %filename, chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(PDF_HEADER_WINDOW)];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_at_start() {
        assert!(has_pdf_header(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n"));
    }

    #[test]
    fn test_header_after_leading_junk() {
        let mut bytes = vec![b' '; 200];
        bytes.extend_from_slice(b"%PDF-1.4");
        assert!(has_pdf_header(&bytes));
    }

    #[test]
    fn test_header_beyond_window_is_rejected() {
        let mut bytes = vec![0u8; PDF_HEADER_WINDOW];
        bytes.extend_from_slice(b"%PDF-1.4");
        assert!(!has_pdf_header(&bytes));
    }

    #[test]
    fn test_short_input_is_rejected() {
        assert!(!has_pdf_header(b"%PD"));
        assert!(!has_pdf_header(b""));
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_fail_before_parsing() {
        let doc = UploadedDocument::new("notes.pdf", "just some text".as_bytes().to_vec());
        let err = PdfTextExtractor.extract(&doc).await.unwrap_err();
        assert!(matches!(err, ExtractionError::NotPdf(name) if name == "notes.pdf"));
    }

    #[tokio::test]
    async fn test_truncated_pdf_is_reported_not_propagated_as_panic() {
        let doc = UploadedDocument::new("broken.pdf", b"%PDF-1.4\n1 0 obj\n<<".to_vec());
        let err = PdfTextExtractor.extract(&doc).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Parse { .. } | ExtractionError::Panicked(_)
        ));
    }
}
