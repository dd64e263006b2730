//! Clipboard Operations for Export
//!
//! This module places exported images (and rendered HTML) on the system
//! clipboard using the arboard crate.

// - enum_variant_names: Error variants follow standard naming convention
#![allow(clippy::enum_variant_names)]

use super::raster::RasterImage;
use crate::error::Error;
use arboard::{Clipboard, ImageData};
use std::borrow::Cow;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
    /// The image could not be decoded for the clipboard
    ImageError(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
            ClipboardError::ImageError(msg) => write!(f, "Clipboard image error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::WriteError(err.to_string())
    }
}

impl From<ClipboardError> for Error {
    fn from(err: ClipboardError) -> Self {
        Error::Clipboard(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Image Clipboard
// ─────────────────────────────────────────────────────────────────────────────

/// Destination for exported images.
pub trait ImageClipboard {
    fn set_image(&mut self, image: &RasterImage) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ImageClipboard for SystemClipboard {
    fn set_image(&mut self, image: &RasterImage) -> Result<(), ClipboardError> {
        let rgba = image
            .to_rgba()
            .map_err(|e| ClipboardError::ImageError(e.to_string()))?;

        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

        clipboard.set_image(ImageData {
            width: image.width() as usize,
            height: image.height() as usize,
            bytes: Cow::Owned(rgba),
        })?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Copy HTML with plain text fallback to clipboard.
///
/// Apps that understand HTML paste the styled markup; everything else gets
/// the raw document.
pub fn copy_html_with_fallback(html: &str, plain_text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

    clipboard
        .set_html(html, Some(plain_text))
        .map_err(|e| ClipboardError::WriteError(e.to_string()))?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_error_display() {
        let err = ClipboardError::AccessError("test".to_string());
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn test_clipboard_error_write() {
        let err = ClipboardError::WriteError("write failed".to_string());
        assert!(err.to_string().contains("write failed"));
    }

    #[test]
    fn test_clipboard_error_into_crate_error() {
        let err: Error = ClipboardError::ImageError("bad png".to_string()).into();
        assert!(matches!(err, Error::Clipboard(msg) if msg.contains("bad png")));
    }

    // Note: Actual clipboard tests require a display/clipboard context
    // which isn't typically available in CI environments.
}
