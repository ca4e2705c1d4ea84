//! Shared application state
//!
//! One chat session per process, behind an async lock. A write lock is held
//! for the whole of a chat or upload call, so concurrent requests are
//! serialized instead of racing on history and document text.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::chat::ChatSession;
use crate::config::{DocumentConfig, GroundingSource};

/// Session handle shared by all handlers
pub type SharedSession = Arc<RwLock<ChatSession>>;

/// State passed to every axum handler
#[derive(Clone)]
pub struct AppState {
    /// The single chat session
    pub session: SharedSession,
    /// Largest accepted upload (in bytes)
    pub max_upload_bytes: usize,
    /// Text kept for grounding after an upload
    pub grounding: GroundingSource,
}

impl AppState {
    /// Wrap `session` with the upload settings from `document`
    pub fn new(session: ChatSession, document: &DocumentConfig) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            max_upload_bytes: document.max_upload_bytes,
            grounding: document.grounding,
        }
    }
}
