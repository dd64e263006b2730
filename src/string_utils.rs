//! UTF-8 Safe Index Utilities
//!
//! Selections arrive from the editing surface as character positions, while
//! Rust strings are sliced by byte offset. Characters like `ø`, `中` or `🎉`
//! are multi-byte in UTF-8, so a character position cannot be used to slice
//! directly. These helpers translate between the two without ever producing
//! an index that falls inside a character.
//!
//! # Example
//! ```ignore
//! use crate::string_utils::char_span_to_byte_range;
//!
//! let text = "Hei på deg";
//! let range = char_span_to_byte_range(text, 4, 6); // "på"
//! assert_eq!(&text[range], "på");
//! ```

use std::ops::Range;

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion Utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a character index to a byte index.
///
/// Returns the string length if `char_index` is beyond the string.
pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Convert a byte index to a character index.
///
/// If the byte index is in the middle of a character, it counts
/// up to (but not including) that character.
pub fn byte_index_to_char_index(s: &str, byte_index: usize) -> usize {
    let mut byte_index = byte_index.min(s.len());
    while !s.is_char_boundary(byte_index) {
        byte_index -= 1;
    }
    s[..byte_index].chars().count()
}

/// Number of characters in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Convert a character span `[start, end)` into a byte range that is safe
/// to slice with.
///
/// Reversed spans are normalized and both ends are clamped to the string.
pub fn char_span_to_byte_range(s: &str, start: usize, end: usize) -> Range<usize> {
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    char_index_to_byte_index(s, start)..char_index_to_byte_index(s, end)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
