//! PDF text extraction
//!
//! Wraps the `pdf-extract` crate. Parsing is CPU-bound and runs on the
//! blocking pool; the parser is known to panic on some malformed files, and
//! such a panic is reported as an ordinary extraction failure.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while extracting text
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The parser rejected the document
    #[error("{0}")]
    Parse(String),

    /// The parser panicked on malformed input
    #[error("PDF parser crashed on malformed input")]
    Panicked,

    /// The blocking task was cancelled before finishing
    #[error("extraction task was cancelled")]
    Cancelled,
}

/// Turns document bytes into plain text
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract all text from `bytes`
    ///
    /// Blank output is not an error here; callers decide what blank means.
    async fn extract_text(&self, bytes: Vec<u8>) -> Result<String, ExtractionError>;
}

/// [`TextExtractor`] for PDF files
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        let size = bytes.len();
        let result = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| ExtractionError::Parse(e.to_string()))
        })
        .await;

        match result {
            Ok(extracted) => {
                if let Ok(text) = &extracted {
                    tracing::debug!(size, text_len = text.len(), "Extracted PDF text");
                }
                extracted
            }
            Err(e) if e.is_panic() => {
                tracing::warn!(size, "PDF parser panicked");
                Err(ExtractionError::Panicked)
            }
            Err(_) => Err(ExtractionError::Cancelled),
        }
    }
}
