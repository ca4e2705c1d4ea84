//! Document module
//!
//! Text extraction for uploaded PDFs and the character-based truncation used
//! for grounding excerpts and upload previews.

pub mod excerpt;
pub mod extractor;

pub use excerpt::{char_len, truncate_chars, truncate_with_marker, TRUNCATION_MARKER};
pub use extractor::{ExtractionError, PdfTextExtractor, TextExtractor};
