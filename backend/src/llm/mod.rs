//! LLM module
//!
//! Talks to the hosted Gemini API. Everything outside this module sees only
//! the [`ChatClient`] trait, so handlers and the session can be driven by a
//! fake client in tests.

pub mod client;
pub mod error;
pub mod gemini_types;

pub use client::{ChatClient, GeminiClient};
pub use error::LlmError;
