//! Image Export Module for highlight-card
//!
//! This module turns a rendered card into a PNG and delivers it to the
//! clipboard or to a file.
//!
//! # Flow
//!
//! 1. The session captures an [`ExportSnapshot`] (styled markup + style).
//! 2. A [`Rasterizer`] renders the snapshot to PNG bytes.
//! 3. Clipboard exports fall back to saving a file when the clipboard is
//!    unavailable; only if both fail is an error returned.
//!
//! # Architecture
//!
//! - `options.rs` - Export configuration and targets
//! - `raster.rs` - Rasterizer seam and the external-command rasterizer
//! - `clipboard.rs` - Platform clipboard operations
//! - `file.rs` - Saving PNG files without overwriting

pub mod clipboard;
pub mod file;
pub mod options;
pub mod raster;

pub use clipboard::{copy_html_with_fallback, ClipboardError, ImageClipboard, SystemClipboard};
pub use file::{export_directory, save_png};
pub use options::{ExportOptions, ExportTarget, RasterizerCommand};
pub use raster::{CommandRasterizer, RasterImage, Rasterizer};

use crate::error::{Error, Result};
use crate::style::StyleParams;
use log::{error, info, warn};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Owned copy of what to export, taken when export is invoked.
///
/// Later edits to the session do not affect a snapshot already handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSnapshot {
    markup: String,
    style: StyleParams,
}

impl ExportSnapshot {
    pub fn new(markup: String, style: StyleParams) -> Self {
        Self { markup, style }
    }

    /// Styled markup produced by the pipeline (without the card wrapper).
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn style(&self) -> &StyleParams {
        &self.style
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exporter
// ─────────────────────────────────────────────────────────────────────────────

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The image is on the clipboard
    Clipboard,
    /// The image was saved as requested
    File(PathBuf),
    /// The clipboard failed and the image was saved instead
    FileAfterClipboardFailure { path: PathBuf, reason: String },
}

/// Rasterizes snapshots and delivers them.
///
/// Each call is independent; overlapping exports are neither merged nor queued.
pub struct Exporter<R, C> {
    rasterizer: R,
    clipboard: C,
    options: ExportOptions,
}

impl Exporter<CommandRasterizer, SystemClipboard> {
    /// Exporter using the configured external rasterizer and the system clipboard.
    pub fn system(options: ExportOptions) -> Self {
        Self::new(CommandRasterizer, SystemClipboard, options)
    }
}

impl<R: Rasterizer, C: ImageClipboard> Exporter<R, C> {
    pub fn new(rasterizer: R, clipboard: C, mut options: ExportOptions) -> Self {
        options.sanitize();
        Self {
            rasterizer,
            clipboard,
            options,
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export a snapshot to the given target.
    pub fn export(&mut self, snapshot: &ExportSnapshot, target: ExportTarget) -> Result<ExportOutcome> {
        let image = self.rasterizer.rasterize(snapshot, &self.options)?;

        match target {
            ExportTarget::File => save_png(&image, &self.options).map(ExportOutcome::File),
            ExportTarget::Clipboard => self.copy_or_save(&image),
        }
    }

    fn copy_or_save(&mut self, image: &RasterImage) -> Result<ExportOutcome> {
        let clipboard_err = match self.clipboard.set_image(image) {
            Ok(()) => {
                info!("Copied {}x{} image to clipboard", image.width(), image.height());
                return Ok(ExportOutcome::Clipboard);
            }
            Err(e) => e,
        };

        warn!("{}; saving image to a file instead", clipboard_err);

        match save_png(image, &self.options) {
            Ok(path) => Ok(ExportOutcome::FileAfterClipboardFailure {
                path,
                reason: clipboard_err.to_string(),
            }),
            Err(file_err) => {
                error!(
                    "Export failed: clipboard ({}) and file ({})",
                    clipboard_err, file_err
                );
                Err(Error::ExportFailed {
                    clipboard: clipboard_err.to_string(),
                    file: file_err.to_string(),
                })
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
