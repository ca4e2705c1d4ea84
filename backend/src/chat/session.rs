//! Chat session
//!
//! Mediates between HTTP input and the model, optionally grounding answers in
//! the text of one attached document.
//!
//! State is two fields: the conversation history (replayed on every call) and
//! the optional document text. Attaching a document, clearing history and
//! detaching are the only transitions; the latter two currently reset both
//! fields.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::chat::models::{ChatTurn, TurnRole};
use crate::chat::prompts::{grounded_prompt, plain_prompt};
use crate::config::DocumentConfig;
use crate::document::{
    char_len, truncate_chars, truncate_with_marker, TextExtractor, TRUNCATION_MARKER,
};
use crate::llm::{ChatClient, LlmError};

/// Message sent by the health check
pub const HEALTH_CHECK_MESSAGE: &str = "Test message";

/// Errors from attaching a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Extraction succeeded but produced only whitespace
    #[error("No text could be extracted from the PDF. It might be scanned or image-based.")]
    NoText,

    /// The extractor failed
    #[error("Failed to process PDF: {0}")]
    Extraction(String),
}

/// Result of a successful attach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    /// First characters of the extracted text, marked if truncated
    pub preview: String,
    /// Characters extracted before the storage cap was applied
    pub extracted_chars: usize,
}

/// A conversation with the model plus an optional attached document
pub struct ChatSession {
    model_name: String,
    client: Arc<dyn ChatClient>,
    extractor: Arc<dyn TextExtractor>,
    limits: DocumentConfig,
    history: Vec<ChatTurn>,
    document_text: Option<String>,
}

impl ChatSession {
    /// Create an empty session bound to `model_name`
    pub fn new(
        model_name: impl Into<String>,
        client: Arc<dyn ChatClient>,
        extractor: Arc<dyn TextExtractor>,
        limits: DocumentConfig,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            client,
            extractor,
            limits,
            history: Vec::new(),
            document_text: None,
        }
    }

    /// Model every call goes to
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Whether a document is attached
    pub fn has_document(&self) -> bool {
        self.document_text.is_some()
    }

    /// Text currently used for grounding
    pub fn document_text(&self) -> Option<&str> {
        self.document_text.as_deref()
    }

    /// Conversation so far, oldest first
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    fn build_prompt(&self, message: &str) -> String {
        match &self.document_text {
            Some(text) => {
                let excerpt = truncate_with_marker(text, self.limits.context_chars);
                grounded_prompt(&excerpt, message)
            }
            None => plain_prompt(message),
        }
    }

    /// Send `message` and record the exchange in history on success
    ///
    /// # Errors
    /// * Any `LlmError` from the client; history is left untouched
    pub async fn try_respond(&mut self, message: &str) -> Result<String, LlmError> {
        let prompt = self.build_prompt(message);
        let reply = self
            .client
            .send_message(&self.model_name, &self.history, &prompt)
            .await?;

        self.history.push(ChatTurn::new(TurnRole::User, prompt));
        self.history.push(ChatTurn::new(TurnRole::Model, reply.clone()));
        debug!(
            history_len = self.history.len(),
            grounded = self.has_document(),
            "Recorded chat exchange"
        );
        Ok(reply)
    }

    /// Send `message` and always return text
    ///
    /// Upstream failures come back as `"Error: <detail>"`.
    pub async fn respond(&mut self, message: &str) -> String {
        match self.try_respond(message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, model = %self.model_name, "Chat call failed");
                format!("Error: {}", e)
            }
        }
    }

    /// Live test call for health checks; the exchange is not recorded
    ///
    /// # Errors
    /// * Any `LlmError` from the client
    pub async fn check_model(&self) -> Result<(), LlmError> {
        let prompt = self.build_prompt(HEALTH_CHECK_MESSAGE);
        self.client
            .send_message(&self.model_name, &self.history, &prompt)
            .await
            .map(|_| ())
    }

    /// Extract text from `bytes` and make it the attached document
    ///
    /// On success the capped text replaces any previous document and history
    /// is reset. On failure the previous document is kept as is.
    ///
    /// # Errors
    /// * `DocumentError::Extraction` if the extractor fails
    /// * `DocumentError::NoText` if only whitespace was extracted
    pub async fn attach_document(
        &mut self,
        bytes: Vec<u8>,
    ) -> Result<DocumentUpload, DocumentError> {
        let text = self
            .extractor
            .extract_text(bytes)
            .await
            .map_err(|e| DocumentError::Extraction(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(DocumentError::NoText);
        }

        let (stored, capped) = truncate_chars(&text, self.limits.max_document_chars);
        self.document_text = Some(stored.to_string());
        self.history.clear();

        let extracted_chars = char_len(&text);
        info!(extracted_chars, capped, "Document attached");

        Ok(DocumentUpload {
            preview: truncate_with_marker(&text, self.limits.preview_chars),
            extracted_chars,
        })
    }

    /// Reset history and ground later answers in `preview` only
    ///
    /// Every truncation marker is stripped from the preview first. Nothing
    /// left means nothing is attached.
    pub fn ground_on_preview(&mut self, preview: &str) {
        self.history.clear();
        let text = preview.replace(TRUNCATION_MARKER, "");
        self.document_text = if text.is_empty() { None } else { Some(text) };
    }

    /// Reset the conversation; also drops the attached document
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.document_text = None;
    }

    /// Drop the attached document; also resets the conversation
    pub fn detach_document(&mut self) {
        self.clear_history();
    }
}
