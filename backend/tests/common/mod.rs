//! Shared fakes for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use pdf_chat_backend::chat::{ChatSession, ChatTurn};
use pdf_chat_backend::config::{DocumentConfig, GroundingSource};
use pdf_chat_backend::document::{ExtractionError, TextExtractor};
use pdf_chat_backend::llm::{ChatClient, LlmError};
use pdf_chat_backend::state::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const MODEL: &str = "gemini-test";

/// Replies with the prompt it was sent, so tests can see what was grounded
pub struct EchoClient;

#[async_trait]
impl ChatClient for EchoClient {
    async fn send_message(
        &self,
        _model: &str,
        _history: &[ChatTurn],
        prompt: &str,
    ) -> Result<String, LlmError> {
        Ok(format!("echo: {}", prompt))
    }
}

/// Always fails like an exhausted quota
pub struct QuotaExceededClient;

#[async_trait]
impl ChatClient for QuotaExceededClient {
    async fn send_message(
        &self,
        _model: &str,
        _history: &[ChatTurn],
        _prompt: &str,
    ) -> Result<String, LlmError> {
        Err(LlmError::RateLimited("quota exhausted".to_string()))
    }
}

/// Returns fixed text and counts how often it was called
pub struct FakeExtractor {
    result: Result<String, String>,
    pub calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(detail.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for FakeExtractor {
    async fn extract_text(&self, _bytes: Vec<u8>) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(ExtractionError::Parse)
    }
}

pub fn state_with(
    client: Arc<dyn ChatClient>,
    extractor: Arc<dyn TextExtractor>,
    grounding: GroundingSource,
) -> AppState {
    let document = DocumentConfig {
        grounding,
        ..DocumentConfig::default()
    };
    let session = ChatSession::new(MODEL, client, extractor, document.clone());
    AppState::new(session, &document)
}

/// Minimal bytes that pass upload validation; the fake extractor ignores them
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4 fake".to_vec()
}
