//! PDF upload endpoint
//!
//! Accepts a multipart form with a single `file` field, validates it, and
//! attaches its text to the chat session.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::GroundingSource;
use crate::document::char_len;
use crate::error::AppError;
use crate::state::AppState;

/// Multipart field carrying the document
pub const FILE_FIELD: &str = "file";

const BYTES_PER_MB: usize = 1024 * 1024;

/// A file pulled out of the upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename
    pub filename: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

/// Successful upload report
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always `"success"`
    pub status: &'static str,
    /// Human-readable confirmation
    pub message: String,
    /// Start of the extracted text, marked if truncated
    pub content_preview: String,
    /// Length (in characters) of the text now used for grounding
    pub text_length: usize,
}

/// Check name, emptiness and size of an upload before touching its contents
///
/// # Errors
/// * `AppError::MissingFile` if the filename is blank
/// * `AppError::NotAPdf` unless the name ends in `.pdf` (any case)
/// * `AppError::EmptyFile` for zero bytes
/// * `AppError::FileTooLarge` above `max_bytes`
pub fn validate_upload(filename: &str, size: usize, max_bytes: usize) -> Result<(), AppError> {
    if filename.trim().is_empty() {
        return Err(AppError::MissingFile);
    }
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::NotAPdf);
    }
    if size == 0 {
        return Err(AppError::EmptyFile);
    }
    if size > max_bytes {
        return Err(AppError::FileTooLarge(max_bytes / BYTES_PER_MB));
    }
    Ok(())
}

/// Validate `file` and attach it to the session
///
/// This is shared between the multipart endpoint and tests.
pub async fn upload_document(
    state: &AppState,
    file: UploadedFile,
) -> Result<UploadResponse, AppError> {
    validate_upload(&file.filename, file.bytes.len(), state.max_upload_bytes)?;

    info!(
        filename = %file.filename,
        size = file.bytes.len(),
        "PDF upload received"
    );

    let mut session = state.session.write().await;
    let upload = session.attach_document(file.bytes).await.map_err(|e| {
        warn!(filename = %file.filename, error = %e, "PDF text extraction failed");
        AppError::from(e)
    })?;

    // Observed behavior: later answers are grounded in the preview only.
    if state.grounding == GroundingSource::Preview {
        session.ground_on_preview(&upload.preview);
    }

    let text_length = session.document_text().map(char_len).unwrap_or(0);
    info!(
        filename = %file.filename,
        extracted_chars = upload.extracted_chars,
        text_length,
        "PDF attached to session"
    );

    Ok(UploadResponse {
        status: "success",
        message: "PDF uploaded successfully.".to_string(),
        content_preview: upload.preview,
        text_length,
    })
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> AppError {
    warn!(error = %err, "Failed to read multipart upload");
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge(max_bytes / BYTES_PER_MB)
    } else {
        AppError::MissingFile
    }
}

/// POST /upload-pdf/ - Upload a PDF to ground later answers in
pub async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let max_bytes = state.max_upload_bytes;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or(AppError::MissingFile)?;
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_bytes))?;

        file = Some(UploadedFile {
            filename,
            bytes: data.to_vec(),
        });
        break;
    }

    let file = file.ok_or(AppError::MissingFile)?;
    upload_document(&state, file).await.map(Json)
}
