//! Rendering: raw document to styled, exportable markup
//!
//! # Architecture
//!
//! - `converter.rs` - Fallible Markdown to HTML conversion (comrak)
//! - `pipeline.rs` - The transformation pipeline (highlights, conversion,
//!   decoration, literal mode and the degraded fallback)
//! - `card.rs` - Card container and standalone document for export

mod card;
mod converter;
mod pipeline;

pub use card::{card_css, card_document, render_card};
pub use converter::{ComrakConverter, MarkdownConverter, MarkdownOptions};
pub use pipeline::{
    apply_highlights, normalize_newlines, process_content, process_content_with,
    render_line_breaks, PARAGRAPH_SPACER,
};
