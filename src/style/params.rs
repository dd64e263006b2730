//! Style parameters for a single render
//!
//! `StyleParams` is the read-only input to the transformation pipeline and
//! the card wrapper. Values loaded from disk or typed by the user go through
//! [`StyleParams::sanitize`] before they are used.

use super::fonts::FontFamily;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Default background color of the card.
pub const DEFAULT_BG_COLOR: &str = "#ffffff";
/// Default text color of the card.
pub const DEFAULT_TEXT_COLOR: &str = "#1c1917";
/// Default highlight color.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#fef08a";

/// Typographic and color parameters for rendering a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParams {
    /// Font for body text
    pub font_family: FontFamily,
    /// Font for headings and bold text
    pub header_font_family: FontFamily,
    /// Font size in pixels
    pub font_size: u32,
    /// Unitless CSS line height
    pub line_height: f32,
    /// Card width in pixels
    pub width: u32,
    /// Card padding in pixels
    pub padding: u32,
    pub bg_color: String,
    pub text_color: String,
    pub highlight_color: String,
    /// Treat the document as Markdown (`true`) or literal HTML (`false`)
    pub markdown: bool,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Inter,
            header_font_family: FontFamily::Inter,
            font_size: 16,
            line_height: 1.5,
            width: 672,
            padding: 32,
            bg_color: DEFAULT_BG_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            markdown: true,
        }
    }
}

impl StyleParams {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: u32 = 12;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: u32 = 32;
    /// Minimum allowed line height.
    pub const MIN_LINE_HEIGHT: f32 = 1.0;
    /// Maximum allowed line height.
    pub const MAX_LINE_HEIGHT: f32 = 2.0;
    /// Minimum card width.
    pub const MIN_WIDTH: u32 = 300;
    /// Maximum card width.
    pub const MAX_WIDTH: u32 = 1200;
    /// Minimum card padding.
    pub const MIN_PADDING: u32 = 16;
    /// Maximum card padding.
    pub const MAX_PADDING: u32 = 80;

    /// Clamp numeric values to their ranges and reset unusable colors.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.line_height = if self.line_height.is_finite() {
            self.line_height
                .clamp(Self::MIN_LINE_HEIGHT, Self::MAX_LINE_HEIGHT)
        } else {
            1.5
        };

        self.width = self.width.clamp(Self::MIN_WIDTH, Self::MAX_WIDTH);
        self.padding = self.padding.clamp(Self::MIN_PADDING, Self::MAX_PADDING);

        sanitize_color(&mut self.bg_color, DEFAULT_BG_COLOR);
        sanitize_color(&mut self.text_color, DEFAULT_TEXT_COLOR);
        sanitize_color(&mut self.highlight_color, DEFAULT_HIGHLIGHT_COLOR);
    }

    /// Return a sanitized copy.
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }
}

fn sanitize_color(color: &mut String, default: &str) {
    let trimmed = color.trim();
    if is_css_color(trimmed) {
        if trimmed.len() != color.len() {
            *color = trimmed.to_string();
        }
    } else {
        log::warn!("Ignoring invalid color '{}', using {}", color, default);
        *color = default.to_string();
    }
}

/// Whether `value` is a CSS color literal that is safe to inline.
///
/// Accepts hex colors, bare named colors and `rgb()/rgba()/hsl()/hsla()`.
pub fn is_css_color(value: &str) -> bool {
    static COLOR_RE: OnceLock<Option<Regex>> = OnceLock::new();
    COLOR_RE
        .get_or_init(|| {
            Regex::new(
                r"^(?:#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|[a-zA-Z]+|(?:rgba?|hsla?)\([0-9.,%\s/]+\))$",
            )
            .ok()
        })
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StyleParams::default();
        assert_eq!(style.font_size, 16);
        assert_eq!(style.width, 672);
        assert_eq!(style.highlight_color, "#fef08a");
        assert!(style.markdown);
    }

    #[test]
    fn test_sanitize_clamps_ranges() {
        let mut style = StyleParams {
            font_size: 4,
            line_height: 9.0,
            width: 5000,
            padding: 0,
            ..Default::default()
        };
        style.sanitize();
        assert_eq!(style.font_size, StyleParams::MIN_FONT_SIZE);
        assert_eq!(style.line_height, StyleParams::MAX_LINE_HEIGHT);
        assert_eq!(style.width, StyleParams::MAX_WIDTH);
        assert_eq!(style.padding, StyleParams::MIN_PADDING);
    }

    #[test]
    fn test_sanitize_nan_line_height() {
        let style = StyleParams {
            line_height: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(style.line_height, 1.5);
    }

    #[test]
    fn test_sanitize_rejects_attribute_breakout() {
        let style = StyleParams {
            highlight_color: "red;\" onload=\"x".to_string(),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(style.highlight_color, DEFAULT_HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_css_color_forms() {
        assert!(is_css_color("#fff"));
        assert!(is_css_color("#fef08a"));
        assert!(is_css_color("#fef08a80"));
        assert!(is_css_color("papayawhip"));
        assert!(is_css_color("rgba(0, 0, 0, 0.5)"));
        assert!(is_css_color("hsl(210 40% 50%)"));
        assert!(!is_css_color("#ggg"));
        assert!(!is_css_color("url(x)"));
        assert!(!is_css_color(""));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let style: StyleParams = serde_json::from_str(r#"{"font_size": 20}"#).unwrap();
        assert_eq!(style.font_size, 20);
        assert_eq!(style.width, 672);
    }
}
