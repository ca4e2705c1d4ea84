//! Gemini API client
//!
//! Direct HTTP client for the Gemini `generateContent` endpoint. The chat
//! history is replayed on every call; the API itself is stateless.

use async_trait::async_trait;
use std::time::Duration;

use crate::chat::models::ChatTurn;
use crate::config::GeminiConfig;
use crate::llm::error::LlmError;
use crate::llm::gemini_types::{GeminiApiRequest, GeminiApiResponse, RequestContent};

/// Header carrying the API key; keeps it out of request URLs
const API_KEY_HEADER: &str = "x-goog-api-key";

/// A remote chat model
///
/// Equivalent to starting a chat with `history` and sending `prompt` to it.
/// Implementations must not mutate any history themselves; the caller owns it.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `prompt` after `history` to `model` and return the reply text
    async fn send_message(
        &self,
        model: &str,
        history: &[ChatTurn],
        prompt: &str,
    ) -> Result<String, LlmError>;
}

/// [`ChatClient`] backed by the Gemini REST API
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    /// * Returns `LlmError::Transport` if the HTTP client cannot be built
    pub fn from_config(config: &GeminiConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(LlmError::transport)?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client against an explicit base URL (used by tests)
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_request(history: &[ChatTurn], prompt: &str) -> GeminiApiRequest {
        let mut contents: Vec<RequestContent> = history
            .iter()
            .map(|turn| RequestContent::text(turn.role.as_str(), &turn.text))
            .collect();
        contents.push(RequestContent::text("user", prompt));
        GeminiApiRequest { contents }
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn send_message(
        &self,
        model: &str,
        history: &[ChatTurn],
        prompt: &str,
    ) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let request_body = Self::build_request(history, prompt);

        tracing::debug!(
            model = %model,
            history_len = history.len(),
            prompt_len = prompt.len(),
            "Calling Gemini API"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(LlmError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "Gemini API returned error status"
            );

            if status_code == 429 {
                return Err(LlmError::RateLimited(error_body));
            }
            return Err(LlmError::Status {
                status: status_code,
                body: error_body,
            });
        }

        let response_body = response.text().await.map_err(LlmError::transport)?;
        let parsed: GeminiApiResponse = serde_json::from_str(&response_body)
            .map_err(|e| LlmError::InvalidResponse(format!("{} - body: {}", e, response_body)))?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
        {
            return Err(LlmError::Blocked(reason.clone()));
        }

        if parsed.candidates.is_empty() {
            return Err(LlmError::EmptyResponse("no candidates"));
        }

        let text = parsed
            .first_text()
            .ok_or(LlmError::EmptyResponse("candidate contains no text parts"))?;
        if text.is_empty() {
            return Err(LlmError::EmptyResponse("response text is empty"));
        }

        tracing::debug!(
            response_len = text.len(),
            "Successfully received response from Gemini API"
        );

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::models::TurnRole;
    use mockito::{Matcher, Server};

    const MODEL: &str = "gemini-2.0-flash";
    const PATH: &str = "/models/gemini-2.0-flash:generateContent";

    fn ok_body(text: &str) -> String {
        serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": text}], "role": "model"}
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = GeminiClient::with_base_url(None, "http://127.0.0.1:9");
        let result = client.send_message(MODEL, &[], "hello").await;
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_expose_api_key() {
        let client =
            GeminiClient::with_base_url(Some("SUPER-SECRET-KEY".into()), "http://127.0.0.1:9");
        let err = client.send_message(MODEL, &[], "hello").await.unwrap_err();

        assert!(matches!(err, LlmError::Transport(_)));
        let rendered = format!("{} {:?}", err, err);
        assert!(
            !rendered.contains("SUPER-SECRET-KEY"),
            "API key leaked into error: {}",
            rendered
        );
    }

    #[tokio::test]
    async fn test_api_key_sent_in_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(ok_body("hi"))
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(Some("test-key".into()), server.url());
        let result = client.send_message(MODEL, &[], "hello").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_success_replays_history() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "first question"}]},
                    {"role": "model", "parts": [{"text": "first answer"}]},
                    {"role": "user", "parts": [{"text": "second question"}]}
                ]
            })))
            .with_status(200)
            .with_body(ok_body("second answer"))
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(Some("test-key".into()), server.url());
        let history = vec![
            ChatTurn::new(TurnRole::User, "first question"),
            ChatTurn::new(TurnRole::Model, "first answer"),
        ];
        let result = client
            .send_message(MODEL, &history, "second question")
            .await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), "second answer");
    }

    #[tokio::test]
    async fn test_rate_limit() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(r#"{"error": "Resource has been exhausted"}"#)
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(Some("test-key".into()), server.url());
        let result = client.send_message(MODEL, &[], "hello").await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("API key not valid")
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(Some("bad-key".into()), server.url());
        let err = client.send_message(MODEL, &[], "hello").await.unwrap_err();

        mock.assert_async().await;
        match err {
            LlmError::Status { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("Expected Status error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blocked_prompt() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(Some("test-key".into()), server.url());
        let err = client.send_message(MODEL, &[], "hello").await.unwrap_err();

        mock.assert_async().await;
        assert!(err.to_string().contains("blocked the prompt: SAFETY"));
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(Some("test-key".into()), server.url());
        let err = client.send_message(MODEL, &[], "hello").await.unwrap_err();

        mock.assert_async().await;
        assert!(err.to_string().contains("no candidates"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(Some("test-key".into()), server.url());
        let err = client.send_message(MODEL, &[], "hello").await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, LlmError::InvalidResponse(_)));
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
