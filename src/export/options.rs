//! Export Options
//!
//! Configuration for PNG export: pixel density, quality, where files go and
//! which external program turns the card into an image.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default file name for saved images.
pub const DEFAULT_FILE_NAME: &str = "highlighted-text.png";

// ─────────────────────────────────────────────────────────────────────────────
// Export Target
// ─────────────────────────────────────────────────────────────────────────────

/// Where an exported image should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportTarget {
    /// Place the image on the system clipboard, saving a file if that fails
    #[default]
    Clipboard,
    /// Save the image as a PNG file
    File,
}

impl ExportTarget {
    /// Get the display label for this target.
    pub fn label(&self) -> &'static str {
        match self {
            ExportTarget::Clipboard => "Copy to Clipboard",
            ExportTarget::File => "Download PNG",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rasterizer Command
// ─────────────────────────────────────────────────────────────────────────────

/// External HTML-to-PNG program.
///
/// The card document is written to the program's stdin and PNG bytes are
/// read from its stdout. Arguments may contain `{width}`, `{scaled_width}`,
/// `{scale}` and `{quality}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterizerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for RasterizerCommand {
    fn default() -> Self {
        Self {
            program: "wkhtmltoimage".to_string(),
            args: [
                "--quiet",
                "--format",
                "png",
                "--width",
                "{scaled_width}",
                "--zoom",
                "{scale}",
                "--quality",
                "{quality}",
                "-",
                "-",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Export Options
// ─────────────────────────────────────────────────────────────────────────────

/// Options for image export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Pixel density multiplier
    pub scale: f32,

    /// Target quality passed to the rasterizer (1-100)
    pub quality: u8,

    /// File name used when saving
    pub file_name: String,

    /// Directory for saved images (defaults to the user's downloads folder)
    pub output_directory: Option<PathBuf>,

    /// Target used when none is given explicitly
    pub default_target: ExportTarget,

    /// Program that renders the card
    pub rasterizer: RasterizerCommand,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            quality: 100,
            file_name: DEFAULT_FILE_NAME.to_string(),
            output_directory: None,
            default_target: ExportTarget::default(),
            rasterizer: RasterizerCommand::default(),
        }
    }
}

impl ExportOptions {
    /// Minimum pixel density.
    pub const MIN_SCALE: f32 = 1.0;
    /// Maximum pixel density.
    pub const MAX_SCALE: f32 = 4.0;

    /// Set the output directory.
    pub fn with_directory(mut self, dir: PathBuf) -> Self {
        self.output_directory = Some(dir);
        self
    }

    /// Clamp values and repair an unusable file name.
    pub fn sanitize(&mut self) {
        self.scale = if self.scale.is_finite() {
            self.scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE)
        } else {
            2.0
        };
        self.quality = self.quality.clamp(1, 100);

        let name = self.file_name.trim();
        let usable = !name.is_empty()
            && !name.contains(|c: char| c == '/' || c == '\\')
            && name != "."
            && name != "..";
        if !usable {
            self.file_name = DEFAULT_FILE_NAME.to_string();
        } else if !name.to_ascii_lowercase().ends_with(".png") {
            self.file_name = format!("{}.png", name);
        } else if name.len() != self.file_name.len() {
            self.file_name = name.to_string();
        }

        if self.rasterizer.program.trim().is_empty() {
            self.rasterizer = RasterizerCommand::default();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_default() {
        let options = ExportOptions::default();
        assert_eq!(options.scale, 2.0);
        assert_eq!(options.quality, 100);
        assert_eq!(options.file_name, "highlighted-text.png");
        assert_eq!(options.default_target, ExportTarget::Clipboard);
        assert_eq!(options.rasterizer.program, "wkhtmltoimage");
    }

    #[test]
    fn test_export_target_label() {
        assert_eq!(ExportTarget::Clipboard.label(), "Copy to Clipboard");
        assert_eq!(ExportTarget::File.label(), "Download PNG");
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut options = ExportOptions {
            scale: 10.0,
            quality: 0,
            ..Default::default()
        };
        options.sanitize();
        assert_eq!(options.scale, ExportOptions::MAX_SCALE);
        assert_eq!(options.quality, 1);
    }

    #[test]
    fn test_sanitize_file_name() {
        let mut options = ExportOptions {
            file_name: "card".to_string(),
            ..Default::default()
        };
        options.sanitize();
        assert_eq!(options.file_name, "card.png");

        options.file_name = "../escape.png".to_string();
        options.sanitize();
        assert_eq!(options.file_name, DEFAULT_FILE_NAME);

        options.file_name = "  ".to_string();
        options.sanitize();
        assert_eq!(options.file_name, DEFAULT_FILE_NAME);
    }

    #[test]
    fn test_export_options_serialization() {
        let options = ExportOptions::default().with_directory(PathBuf::from("/tmp/cards"));
        let json = serde_json::to_string(&options).unwrap();
        let deserialized: ExportOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, deserialized);
    }

    #[test]
    fn test_target_serialization() {
        assert_eq!(serde_json::to_string(&ExportTarget::File).unwrap(), "\"file\"");
    }
}
