//! Style parameters, fonts and presets
//!
//! - `fonts.rs` - Named font families and their CSS stacks
//! - `params.rs` - The per-render `StyleParams` record and its bounds
//! - `presets.rs` - Named presets that assign a full style at once

mod fonts;
mod params;
mod presets;

pub use fonts::{FontFamily, WEB_FONT_CSS};
pub use params::{is_css_color, StyleParams};
pub use presets::Preset;
