//! Named style presets
//!
//! A preset assigns layout, typography and colors in one step. It does not
//! touch the markdown-mode flag.

use super::fonts::FontFamily;
use super::params::StyleParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in presets sized for common destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    #[serde(rename = "Twitter Post")]
    TwitterPost,
    #[serde(rename = "Instagram Story")]
    InstagramStory,
    #[serde(rename = "LinkedIn Post")]
    LinkedInPost,
    #[serde(rename = "Blog Header")]
    BlogHeader,
    #[serde(rename = "Minimal")]
    Minimal,
}

/// The values a preset assigns.
struct PresetValues {
    width: u32,
    padding: u32,
    font_size: u32,
    line_height: f32,
    bg_color: &'static str,
    text_color: &'static str,
    highlight_color: &'static str,
    font_family: FontFamily,
    header_font_family: FontFamily,
}

impl Preset {
    /// Get the display label for the preset.
    pub fn label(&self) -> &'static str {
        match self {
            Preset::TwitterPost => "Twitter Post",
            Preset::InstagramStory => "Instagram Story",
            Preset::LinkedInPost => "LinkedIn Post",
            Preset::BlogHeader => "Blog Header",
            Preset::Minimal => "Minimal",
        }
    }

    /// Get all presets.
    pub fn all() -> &'static [Preset] {
        &[
            Preset::TwitterPost,
            Preset::InstagramStory,
            Preset::LinkedInPost,
            Preset::BlogHeader,
            Preset::Minimal,
        ]
    }

    fn values(&self) -> PresetValues {
        match self {
            Preset::TwitterPost => PresetValues {
                width: 600,
                padding: 32,
                font_size: 18,
                line_height: 1.4,
                bg_color: "#ffffff",
                text_color: "#1c1917",
                highlight_color: "#fef08a",
                font_family: FontFamily::Inter,
                header_font_family: FontFamily::Inter,
            },
            Preset::InstagramStory => PresetValues {
                width: 400,
                padding: 40,
                font_size: 20,
                line_height: 1.3,
                bg_color: "#f8fafc",
                text_color: "#0f172a",
                highlight_color: "#fbbf24",
                font_family: FontFamily::Poppins,
                header_font_family: FontFamily::Montserrat,
            },
            Preset::LinkedInPost => PresetValues {
                width: 672,
                padding: 48,
                font_size: 16,
                line_height: 1.6,
                bg_color: "#ffffff",
                text_color: "#374151",
                highlight_color: "#ddd6fe",
                font_family: FontFamily::SfProDisplay,
                header_font_family: FontFamily::SfProDisplay,
            },
            Preset::BlogHeader => PresetValues {
                width: 800,
                padding: 64,
                font_size: 24,
                line_height: 1.5,
                bg_color: "#fafafa",
                text_color: "#111827",
                highlight_color: "#fed7aa",
                font_family: FontFamily::EudoxusSans,
                header_font_family: FontFamily::EudoxusSans,
            },
            Preset::Minimal => PresetValues {
                width: 500,
                padding: 24,
                font_size: 14,
                line_height: 1.5,
                bg_color: "#ffffff",
                text_color: "#525252",
                highlight_color: "#fde68a",
                font_family: FontFamily::HelveticaNeue,
                header_font_family: FontFamily::HelveticaNeue,
            },
        }
    }

    /// Assign every preset-controlled field of `style` at once.
    pub fn apply_to(&self, style: &mut StyleParams) {
        let v = self.values();
        style.width = v.width;
        style.padding = v.padding;
        style.font_size = v.font_size;
        style.line_height = v.line_height;
        style.bg_color = v.bg_color.to_string();
        style.text_color = v.text_color.to_string();
        style.highlight_color = v.highlight_color.to_string();
        style.font_family = v.font_family;
        style.header_font_family = v.header_font_family;
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Preset {
    type Err = String;

    /// Accepts the label in any case, with spaces, dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalize = |value: &str| -> String {
            value
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let wanted = normalize(s);
        Preset::all()
            .iter()
            .copied()
            .find(|preset| normalize(preset.label()) == wanted)
            .ok_or_else(|| format!("unknown preset '{}'", s.trim()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
