//! highlight-card
//!
//! Turns Markdown (or literal HTML) prose with `===highlight===` spans into
//! styled cards that can be exported as PNG images.
//!
//! - [`render`] - the text transformation pipeline and card wrapper
//! - [`editor`] - editing session with debounced, bounded undo/redo history
//! - [`style`] - fonts, style parameters and presets
//! - [`export`] - rasterization, clipboard and file delivery
//! - [`config`] - persisted user settings

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod render;
pub mod style;
mod string_utils;

pub use config::Settings;
pub use editor::EditorSession;
pub use error::{Error, Result};
pub use style::{FontFamily, Preset, StyleParams};
