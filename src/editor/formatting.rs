//! Selection insertion: highlight and bold
//!
//! Wraps a selected span of the raw document with the marker for the current
//! mode: `===`/`**` delimiters in Markdown mode, inline-styled `<mark>` and
//! `<strong>` tags in literal mode. Selections are character indices.
//!
//! # Usage
//! ```ignore
//! use crate::editor::formatting::{wrap_selection, InsertCommand, MarkupMode};
//!
//! let result = wrap_selection("hello world", 6, 11, InsertCommand::Highlight, &mode);
//! assert_eq!(result.text, "hello ===world===");
//! ```

use crate::string_utils::{byte_index_to_char_index, char_len, char_span_to_byte_range};

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Markup that can be wrapped around a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertCommand {
    /// Highlighted span (`===text===` or `<mark>`)
    Highlight,
    /// Bold span (`**text**` or `<strong>`)
    Bold,
}

/// Which syntax the document is written in, plus what literal tags need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupMode<'a> {
    Markdown,
    /// Literal HTML; highlights carry the color inline
    Literal { highlight_color: &'a str },
}

impl MarkupMode<'_> {
    /// Opening and closing marker for a command in this mode.
    pub fn markers(&self, command: InsertCommand) -> (String, String) {
        match (self, command) {
            (MarkupMode::Markdown, InsertCommand::Highlight) => {
                ("===".to_string(), "===".to_string())
            }
            (MarkupMode::Markdown, InsertCommand::Bold) => ("**".to_string(), "**".to_string()),
            (MarkupMode::Literal { highlight_color }, InsertCommand::Highlight) => (
                format!(
                    "<mark style=\"background-color: {}; padding: 0 4px;\">",
                    highlight_color
                ),
                "</mark>".to_string(),
            ),
            (MarkupMode::Literal { .. }, InsertCommand::Bold) => {
                ("<strong>".to_string(), "</strong>".to_string())
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Insert Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of wrapping a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    /// The new text after insertion
    pub text: String,
    /// Cursor position after the closing marker (character index)
    pub cursor: usize,
    /// Whether anything was inserted
    pub applied: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Insertion
// ─────────────────────────────────────────────────────────────────────────────

/// Wrap the character span `[start, end)` of `text` with the mode's marker.
///
/// Reversed spans are normalized and out-of-range ends are clamped. An empty
/// span leaves the text unchanged with the cursor at `start`.
pub fn wrap_selection(
    text: &str,
    start: usize,
    end: usize,
    command: InsertCommand,
    mode: &MarkupMode<'_>,
) -> InsertResult {
    let range = char_span_to_byte_range(text, start, end);

    if range.is_empty() {
        return InsertResult {
            text: text.to_string(),
            cursor: byte_index_to_char_index(text, range.start),
            applied: false,
        };
    }

    let (open, close) = mode.markers(command);
    let selected = &text[range.clone()];

    let mut new_text = String::with_capacity(text.len() + open.len() + close.len());
    new_text.push_str(&text[..range.start]);
    new_text.push_str(&open);
    new_text.push_str(selected);
    new_text.push_str(&close);
    let cursor = char_len(&new_text);
    new_text.push_str(&text[range.end..]);

    InsertResult {
        text: new_text,
        cursor,
        applied: true,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
