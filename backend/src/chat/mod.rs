//! Chat module
//!
//! Holds the single chat session: conversation history plus the text of at
//! most one attached document.

pub mod models;
pub mod prompts;
pub mod session;

pub use models::{ChatTurn, TurnRole};
pub use session::{ChatSession, DocumentError, DocumentUpload};
