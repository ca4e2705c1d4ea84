//! Error types and error handling for the application
//!
//! This module defines the errors handlers return. All of them implement
//! `IntoResponse`, rendering `{"status": "error", "message": ...}` with the
//! matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::chat::DocumentError;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Chat message was missing or blank
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// Request body was not the expected JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Upload form had no usable `file` field
    #[error("No file provided or file invalid")]
    MissingFile,

    /// Uploaded filename does not end in `.pdf`
    #[error("File must be a PDF")]
    NotAPdf,

    /// Uploaded file has no bytes
    #[error("Uploaded file is empty")]
    EmptyFile,

    /// Uploaded file is over the limit (in MB)
    #[error("File size exceeds {0}MB")]
    FileTooLarge(usize),

    /// Text could not be extracted from the uploaded document
    ///
    /// Answered with 400 rather than a 200 `status: error` envelope, so a
    /// failed upload is never reported as an HTTP success.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Unexpected error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyMessage
            | AppError::InvalidBody(_)
            | AppError::MissingFile
            | AppError::NotAPdf
            | AppError::EmptyFile
            | AppError::FileTooLarge(_)
            | AppError::Document(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
