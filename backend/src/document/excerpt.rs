//! Character-based truncation
//!
//! Lengths here count Unicode scalar values, not bytes, so a cut never lands
//! inside a multi-byte character.

/// Appended to text that was cut short
pub const TRUNCATION_MARKER: &str = "...";

/// Number of characters in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// First `max_chars` characters of `text`
///
/// Returns the prefix and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

/// First `max_chars` characters of `text`, with [`TRUNCATION_MARKER`]
/// appended iff the text was longer.
pub fn truncate_with_marker(text: &str, max_chars: usize) -> String {
    let (prefix, cut) = truncate_chars(text, max_chars);
    if cut {
        format!("{}{}", prefix, TRUNCATION_MARKER)
    } else {
        prefix.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_with_marker("hello", 10), "hello");
        assert_eq!(truncate_with_marker("hello", 5), "hello");
    }

    #[test]
    fn test_long_text_marked() {
        assert_eq!(truncate_with_marker("hello world", 5), "hello...");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "héllo wörld";
        let (prefix, cut) = truncate_chars(text, 4);
        assert_eq!(prefix, "héll");
        assert!(cut);
        assert_eq!(char_len(text), 11);
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(truncate_chars("abc", 0), ("", true));
        assert_eq!(truncate_chars("", 0), ("", false));
    }
}
