//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Gemini API configuration
    pub gemini: GeminiConfig,
    /// Document handling configuration
    pub document: DocumentConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Gemini API configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; absent keys are tolerated at startup and fail per call
    pub api_key: Option<String>,
    /// Model name used for every chat call
    pub model: String,
    /// Base URL of the REST API
    pub api_base_url: String,
    /// Per-request timeout (in seconds)
    pub timeout_secs: u64,
}

// Hand-written so the key never ends up in logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Which text the session grounds answers in after an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundingSource {
    /// Re-assign the stored text to the upload preview (observed behavior)
    #[default]
    Preview,
    /// Keep the full (capped) extracted text
    FullText,
}

impl FromStr for GroundingSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preview" => Ok(GroundingSource::Preview),
            "full" | "full_text" => Ok(GroundingSource::FullText),
            other => Err(format!("unknown grounding source: {}", other)),
        }
    }
}

/// Document handling configuration
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Largest accepted upload (in bytes)
    pub max_upload_bytes: usize,
    /// Characters of document text included in a grounding prompt
    pub context_chars: usize,
    /// Characters returned as an upload preview
    pub preview_chars: usize,
    /// Maximum characters of extracted text kept in memory
    pub max_document_chars: usize,
    /// Text kept for grounding after a successful upload
    pub grounding: GroundingSource,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024, // 10MB
            context_chars: 4000,
            preview_chars: 1000,
            max_document_chars: 1_000_000,
            grounding: GroundingSource::Preview,
        }
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = DocumentConfig::default();
        Self {
            server: ServerConfig {
                port: parse_env("PORT").unwrap_or(8000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            gemini: GeminiConfig {
                api_key: env::var("GOOGLE_API_KEY")
                    .ok()
                    .filter(|k| !k.trim().is_empty()),
                model: env::var("GEMINI_MODEL")
                    .ok()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base_url: env::var("GEMINI_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE_URL.to_string()),
                timeout_secs: parse_env("GEMINI_TIMEOUT_SECS").unwrap_or(60),
            },
            document: DocumentConfig {
                max_upload_bytes: parse_env("MAX_UPLOAD_BYTES")
                    .unwrap_or(defaults.max_upload_bytes),
                context_chars: parse_env("CONTEXT_CHARS").unwrap_or(defaults.context_chars),
                preview_chars: parse_env("PREVIEW_CHARS").unwrap_or(defaults.preview_chars),
                max_document_chars: parse_env("MAX_DOCUMENT_CHARS")
                    .unwrap_or(defaults.max_document_chars),
                grounding: parse_env("PDF_GROUNDING").unwrap_or(defaults.grounding),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
