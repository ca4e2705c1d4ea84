//! Chat API endpoints
//!
//! Sending messages and resetting the session.

use axum::{body::Bytes, extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Message text; missing or null counts as empty
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply to a chat message
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Always `"success"`; model failures are reported inside `response`
    pub status: &'static str,
    /// Model reply, or `"Error: ..."` if the model call failed
    pub response: String,
    /// Whether a document is attached after this exchange
    pub has_pdf_context: bool,
}

/// Bare status acknowledgement
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// What was reset, e.g. `"chat history cleared"`
    pub status: &'static str,
}

/// POST /chat/ - Send a message to the model
///
/// The body is parsed by hand so malformed JSON gets the same error envelope
/// as every other rejection.
pub async fn chat_endpoint(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let request: ChatRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    let message = request.message.as_deref().unwrap_or("").trim();
    if message.is_empty() {
        return Err(AppError::EmptyMessage);
    }

    info!(message_len = message.len(), "Chat request received");

    let mut session = state.session.write().await;
    let response = session.respond(message).await;

    Ok(Json(ChatResponse {
        status: "success",
        response,
        has_pdf_context: session.has_document(),
    }))
}

/// POST /clear/ - Reset chat history (also drops the document)
pub async fn clear_chat(State(state): State<AppState>) -> Json<StatusResponse> {
    state.session.write().await.clear_history();
    info!("Chat history cleared");
    Json(StatusResponse {
        status: "chat history cleared",
    })
}

/// POST /detach-pdf/ - Drop the attached document (also resets history)
pub async fn detach_pdf(State(state): State<AppState>) -> Json<StatusResponse> {
    state.session.write().await.detach_document();
    info!("PDF detached");
    Json(StatusResponse {
        status: "PDF detached successfully",
    })
}
