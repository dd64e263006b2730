//! Saving exported images to disk
//!
//! The native counterpart of a browser download: the PNG lands in the
//! configured directory, else the user's downloads folder, else the working
//! directory. Existing files are never overwritten.

use super::options::ExportOptions;
use super::raster::RasterImage;
use crate::error::{Error, Result};
use log::{info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Upper bound on `name (N).png` attempts.
const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Directory where exported images are saved.
pub fn export_directory(options: &ExportOptions) -> PathBuf {
    options
        .output_directory
        .clone()
        .or_else(dirs::download_dir)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Candidate file name for the `n`-th attempt: `name.png`, `name (1).png`, ...
fn numbered_name(file_name: &str, n: u32) -> String {
    if n == 0 {
        return file_name.to_string();
    }
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{} ({}).{}", stem, n, ext),
        None => format!("{} ({})", stem, n),
    }
}

/// Write the PNG into `dir` under the first free variant of `file_name`.
pub fn save_png_in(image: &RasterImage, dir: &Path, file_name: &str) -> Result<PathBuf> {
    create_unique(dir, file_name, |file| {
        file.write_all(image.png_bytes())?;
        file.flush()
    })
}

/// Create the first free variant of `file_name` in `dir` and fill it with `write`.
///
/// A file whose write fails is removed again so the name stays free.
fn create_unique<F>(dir: &Path, file_name: &str, write: F) -> Result<PathBuf>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    fs::create_dir_all(dir).map_err(|e| Error::FileWrite {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for n in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(numbered_name(file_name, n));
        let file = OpenOptions::new().write(true).create_new(true).open(&path);
        match file {
            Ok(mut file) => {
                if let Err(e) = write(&mut file) {
                    drop(file);
                    if let Err(remove_err) = fs::remove_file(&path) {
                        warn!("Could not remove partial {}: {}", path.display(), remove_err);
                    }
                    return Err(Error::FileWrite { path, source: e });
                }
                info!("Saved image to {}", path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(Error::FileWrite { path, source: e }),
        }
    }

    Err(Error::Application(format!(
        "no free file name for '{}' in {}",
        file_name,
        dir.display()
    )))
}

/// Save the PNG where the export options say.
pub fn save_png(image: &RasterImage, options: &ExportOptions) -> Result<PathBuf> {
    save_png_in(image, &export_directory(options), &options.file_name)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::raster::tests::png_bytes;
    use tempfile::TempDir;

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name("card.png", 0), "card.png");
        assert_eq!(numbered_name("card.png", 2), "card (2).png");
        assert_eq!(numbered_name("card", 1), "card (1)");
    }

    #[test]
    fn test_save_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let image = RasterImage::from_png(png_bytes(2, 2)).unwrap();

        let first = save_png_in(&image, dir.path(), "highlighted-text.png").unwrap();
        let second = save_png_in(&image, dir.path(), "highlighted-text.png").unwrap();

        assert_eq!(first, dir.path().join("highlighted-text.png"));
        assert_eq!(second, dir.path().join("highlighted-text (1).png"));
        assert_eq!(fs::read(&second).unwrap(), image.png_bytes());
    }

    #[test]
    fn test_failed_write_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();

        let err = create_unique(dir.path(), "highlighted-text.png", |file| {
            file.write_all(b"\x89PNG")?;
            Err(std::io::Error::new(ErrorKind::Other, "disk full"))
        })
        .unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        // The name is still free for the next export
        let image = RasterImage::from_png(png_bytes(1, 1)).unwrap();
        let path = save_png_in(&image, dir.path(), "highlighted-text.png").unwrap();
        assert_eq!(path, dir.path().join("highlighted-text.png"));
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("exports").join("cards");
        let image = RasterImage::from_png(png_bytes(1, 1)).unwrap();
        let options = ExportOptions::default().with_directory(nested.clone());

        let path = save_png(&image, &options).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn test_export_directory_prefers_configured() {
        let options = ExportOptions::default().with_directory(PathBuf::from("/tmp/cards"));
        assert_eq!(export_directory(&options), PathBuf::from("/tmp/cards"));
    }
}
