//! Rasterization of a card into a PNG image
//!
//! Turning HTML into pixels is delegated to an external collaborator behind
//! the [`Rasterizer`] trait. The default [`CommandRasterizer`] pipes the card
//! document through an HTML-to-image program.

use super::options::ExportOptions;
use super::ExportSnapshot;
use crate::error::{Error, Result};
use crate::render::card_document;
use image::{GenericImageView, ImageFormat};
use log::{debug, info};
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

// ─────────────────────────────────────────────────────────────────────────────
// Raster Image
// ─────────────────────────────────────────────────────────────────────────────

/// An encoded PNG together with its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterImage {
    /// Wrap PNG bytes, validating them and reading the dimensions.
    pub fn from_png(png: Vec<u8>) -> Result<Self> {
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)?;
        let (width, height) = decoded.dimensions();
        Ok(Self { png, width, height })
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Decode into tightly packed RGBA8 pixels.
    pub fn to_rgba(&self) -> Result<Vec<u8>> {
        let decoded = image::load_from_memory_with_format(&self.png, ImageFormat::Png)?;
        Ok(decoded.to_rgba8().into_raw())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rasterizer Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Produces a PNG image from an export snapshot.
pub trait Rasterizer {
    fn rasterize(&self, snapshot: &ExportSnapshot, options: &ExportOptions) -> Result<RasterImage>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Command Rasterizer
// ─────────────────────────────────────────────────────────────────────────────

/// Runs the configured external program (see `RasterizerCommand`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRasterizer;

impl Rasterizer for CommandRasterizer {
    fn rasterize(&self, snapshot: &ExportSnapshot, options: &ExportOptions) -> Result<RasterImage> {
        let program = &options.rasterizer.program;
        let args = expand_args(&options.rasterizer.args, snapshot, options);
        let document = card_document(snapshot.markup(), snapshot.style(), None);

        debug!("Running rasterizer: {} {}", program, args.join(" "));

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Rasterize(format!("failed to start '{}': {}", program, e)))?;

        // Feed stdin from another thread so a chatty child cannot deadlock us
        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || stdin.write_all(document.as_bytes()))
        });

        let output = child.wait_with_output()?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => debug!("Rasterizer closed stdin early: {}", e),
                Err(_) => return Err(Error::Rasterize("stdin writer panicked".to_string())),
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Rasterize(format!(
                "'{}' exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        let image = RasterImage::from_png(output.stdout)?;
        info!("Rasterized card to {}x{} PNG", image.width(), image.height());
        Ok(image)
    }
}

/// Substitute size and quality placeholders in rasterizer arguments.
pub fn expand_args(args: &[String], snapshot: &ExportSnapshot, options: &ExportOptions) -> Vec<String> {
    let width = snapshot.style().width;
    let scaled_width = (width as f32 * options.scale).round() as u32;
    args.iter()
        .map(|arg| {
            arg.replace("{width}", &width.to_string())
                .replace("{scaled_width}", &scaled_width.to_string())
                .replace("{scale}", &options.scale.to_string())
                .replace("{quality}", &options.quality.to_string())
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::export::RasterizerCommand;
    use crate::style::StyleParams;
    use image::{DynamicImage, RgbaImage};
    use std::io::Cursor;

    /// Encode a solid image as PNG bytes.
    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([255, 240, 138, 255]),
        ));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn snapshot() -> ExportSnapshot {
        ExportSnapshot::new("<p>hi</p>".to_string(), StyleParams::default())
    }

    #[test]
    fn test_raster_image_dimensions() {
        let image = RasterImage::from_png(png_bytes(4, 3)).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert_eq!(image.to_rgba().unwrap().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_raster_image_rejects_garbage() {
        let err = RasterImage::from_png(b"<html>".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Rasterize(_)));
    }

    #[test]
    fn test_expand_args() {
        let options = ExportOptions::default();
        let args = expand_args(&options.rasterizer.args, &snapshot(), &options);
        assert!(args.contains(&"1344".to_string()));
        assert!(args.contains(&"2".to_string()));
        assert!(args.contains(&"100".to_string()));
        assert!(!args.iter().any(|a| a.contains('{')));
    }

    #[test]
    fn test_missing_program_is_error() {
        let options = ExportOptions {
            rasterizer: RasterizerCommand {
                program: "highlight-card-no-such-rasterizer".to_string(),
                args: vec![],
            },
            ..Default::default()
        };
        let err = CommandRasterizer.rasterize(&snapshot(), &options).unwrap_err();
        assert!(matches!(err, Error::Rasterize(msg) if msg.contains("failed to start")));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_rasterizer_reads_png_from_stdout() {
        let dir = tempfile::TempDir::new().unwrap();
        let png_path = dir.path().join("out.png");
        std::fs::write(&png_path, png_bytes(5, 2)).unwrap();

        let options = ExportOptions {
            rasterizer: RasterizerCommand {
                program: "sh".to_string(),
                args: vec![
                    "-c".to_string(),
                    format!("cat > /dev/null; cat '{}'", png_path.display()),
                ],
            },
            ..Default::default()
        };
        let image = CommandRasterizer.rasterize(&snapshot(), &options).unwrap();
        assert_eq!((image.width(), image.height()), (5, 2));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_rasterizer_nonzero_exit() {
        let options = ExportOptions {
            rasterizer: RasterizerCommand {
                program: "sh".to_string(),
                args: vec!["-c".to_string(), "cat > /dev/null; echo nope >&2; exit 3".to_string()],
            },
            ..Default::default()
        };
        let err = CommandRasterizer.rasterize(&snapshot(), &options).unwrap_err();
        assert!(matches!(err, Error::Rasterize(msg) if msg.contains("nope")));
    }
}
