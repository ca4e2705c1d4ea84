//! LLM-specific error types
//!
//! Errors that can occur while calling the Gemini API (transport, quota,
//! malformed or empty responses).

use thiserror::Error;

/// Errors returned by a [`ChatClient`](super::ChatClient)
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key was configured at startup
    #[error("API key is not configured; set GOOGLE_API_KEY")]
    MissingApiKey,

    /// The HTTP request could not be sent or the body could not be read
    #[error("Failed to reach Gemini API: {0}")]
    Transport(reqwest::Error),

    /// Quota or rate limit hit (HTTP 429)
    #[error("Gemini API rate limit exceeded (HTTP 429): {0}")]
    RateLimited(String),

    /// Any other non-success HTTP status
    #[error("Gemini API returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body was not the expected JSON shape
    #[error("Failed to parse JSON response from Gemini API: {0}")]
    InvalidResponse(String),

    /// The prompt was rejected by the safety filters
    #[error("Gemini API blocked the prompt: {0}")]
    Blocked(String),

    /// Response parsed but carried no usable text
    #[error("Gemini API response contains no text: {0}")]
    EmptyResponse(&'static str),
}

impl LlmError {
    /// Wrap a reqwest error with its URL stripped
    pub fn transport(err: reqwest::Error) -> Self {
        LlmError::Transport(err.without_url())
    }
}
