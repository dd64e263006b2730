//! User settings and preferences for highlight-card
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use crate::editor::{DEFAULT_DEBOUNCE, DEFAULT_HISTORY_LIMIT};
use crate::export::ExportOptions;
use crate::style::{Preset, StyleParams};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Style used for new sessions
    pub style: StyleParams,

    /// Preset applied on top of `style` at session start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    /// Maximum number of undo snapshots
    pub history_limit: usize,

    /// Quiet period before typed edits become an undo step (milliseconds)
    pub debounce_ms: u64,

    /// Image export options
    pub export: ExportOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: StyleParams::default(),
            preset: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            export: ExportOptions::default(),
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum history length.
    pub const MIN_HISTORY_LIMIT: usize = 1;
    /// Maximum history length.
    pub const MAX_HISTORY_LIMIT: usize = 1000;
    /// Maximum debounce delay in milliseconds.
    pub const MAX_DEBOUNCE_MS: u64 = 10_000;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.style.sanitize();

        self.history_limit = self
            .history_limit
            .clamp(Self::MIN_HISTORY_LIMIT, Self::MAX_HISTORY_LIMIT);

        self.debounce_ms = self.debounce_ms.min(Self::MAX_DEBOUNCE_MS);

        self.export.sanitize();
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontFamily;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.history_limit, 50);
        assert_eq!(settings.debounce_ms, 500);
        assert!(settings.preset.is_none());
        assert_eq!(settings.style, StyleParams::default());
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let settings = Settings {
            preset: Some(Preset::Minimal),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, deserialized);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let json = r#"{"style": {"header_font_family": "Montserrat"}, "preset": "Blog Header"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.style.header_font_family, FontFamily::Montserrat);
        assert_eq!(settings.style.font_family, FontFamily::Inter);
        assert_eq!(settings.preset, Some(Preset::BlogHeader));
        assert_eq!(settings.history_limit, 50);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sanitize_history_limit() {
        let mut settings = Settings {
            history_limit: 0,
            ..Default::default()
        };
        settings.sanitize();
        assert_eq!(settings.history_limit, Settings::MIN_HISTORY_LIMIT);

        settings.history_limit = 1_000_000;
        settings.sanitize();
        assert_eq!(settings.history_limit, Settings::MAX_HISTORY_LIMIT);
    }

    #[test]
    fn test_from_json_sanitized() {
        let json = r#"{"style": {"font_size": 99, "bg_color": "not a color!"}, "debounce_ms": 999999}"#;
        let settings = Settings::from_json_sanitized(json).unwrap();
        assert_eq!(settings.style.font_size, StyleParams::MAX_FONT_SIZE);
        assert_eq!(settings.style.bg_color, "#ffffff");
        assert_eq!(settings.debounce_ms, Settings::MAX_DEBOUNCE_MS);
    }
}
