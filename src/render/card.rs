//! Card wrapper for styled output
//!
//! Wraps the pipeline's markup in the container that gives it its width,
//! padding, background and typography. The same container is used for the
//! preview and for export, so what is previewed is what gets rasterized.

use crate::style::{StyleParams, WEB_FONT_CSS};

/// Inline CSS for the card container. The style is sanitized first.
pub fn card_css(style: &StyleParams) -> String {
    let style = style.clone().sanitized();
    format!(
        "width: {width}px; background-color: {bg}; padding: {padding}px; \
         font-family: {font}; font-size: {size}px; line-height: {line_height}; \
         color: {color}; box-sizing: border-box;",
        width = style.width,
        bg = style.bg_color,
        padding = style.padding,
        font = style.font_family.css_stack(),
        size = style.font_size,
        line_height = style.line_height,
        color = style.text_color,
    )
}

/// Wrap styled markup in the card container.
pub fn render_card(markup: &str, style: &StyleParams) -> String {
    format!(
        "<div class=\"highlight-card\" style=\"{}\">\n{}\n</div>",
        card_css(style),
        markup
    )
}

/// Generate a standalone HTML document containing a single card.
///
/// This is what the rasterizer renders and what `render --document` saves.
pub fn card_document(markup: &str, style: &StyleParams, title: Option<&str>) -> String {
    let style = &style.clone().sanitized();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width={width}">
    <meta name="generator" content="highlight-card">
    <title>{title}</title>
    <style>
{fonts}

html, body {{
    margin: 0;
    padding: 0;
    background-color: {bg};
}}

.highlight-card p {{
    margin: 0;
}}
    </style>
</head>
<body>
{card}
</body>
</html>"#,
        width = style.width,
        title = html_escape(title.unwrap_or("Highlighted text")),
        fonts = WEB_FONT_CSS,
        bg = style.bg_color,
        card = render_card(markup, style),
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
