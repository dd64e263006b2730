//! Content transformation pipeline
//!
//! Turns the raw document into styled markup:
//!
//! 1. Windows line endings and literal `\n` sequences become real line breaks.
//! 2. Markdown mode: `===text===` spans become `<mark>` wrappers, the result
//!    is converted to HTML, and the HTML is decorated with the header font,
//!    paragraph/line spacing and list styles.
//! 3. Literal mode: line breaks become `<br>` markup and existing `<strong>`
//!    tags get the header font.
//!
//! The pipeline is total: a failing converter degrades to the plain
//! line-break rendering.

use super::converter::{ComrakConverter, MarkdownConverter};
use crate::error::{Error, Result};
use crate::style::StyleParams;
use log::warn;
use regex::{Captures, Regex};
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Markup Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Inserted for a blank line when no Markdown structure is available.
pub const PARAGRAPH_SPACER: &str = "<br><div style=\"height: 1em;\"></div>";

const LINE_BREAK: &str = "<br>";
const SPACED_PARAGRAPH: &str = "<p style=\"margin-top: 1em;\">";
const BREAK_SPACER: &str = "<div style=\"height: 1em;\"></div>";
const LIST_STYLE: &str = "margin: 0.5em 0; padding-left: 2em; list-style-position: outside;";
const ITEM_TAG: &str = "<li style=\"margin: 0.25em 0;\">";

// ─────────────────────────────────────────────────────────────────────────────
// Compiled Patterns
// ─────────────────────────────────────────────────────────────────────────────

struct Patterns {
    highlight: Regex,
    heading_open: Regex,
    paragraph_gap: Regex,
    double_break: Regex,
    ordered_list_open: Regex,
}

impl Patterns {
    fn compile() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            highlight: Regex::new(r"===(.*?)===")?,
            heading_open: Regex::new(r"<h([1-6])>")?,
            paragraph_gap: Regex::new(r"</p>(\s*)<p>")?,
            double_break: Regex::new(r"<br\s*/?>(\s*)<br\s*/?>")?,
            ordered_list_open: Regex::new(r#"<ol( start="\d+")?>"#)?,
        })
    }
}

fn patterns() -> Result<&'static Patterns> {
    static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| Patterns::compile().ok())
        .as_ref()
        .ok_or_else(|| Error::Markdown("pipeline patterns failed to compile".to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Transform raw text into styled markup using the default comrak converter.
pub fn process_content(text: &str, style: &StyleParams) -> String {
    process_content_with(&ComrakConverter::default(), text, style)
}

/// Transform raw text into styled markup with a specific converter.
///
/// The style is sanitized first, so out-of-range or malformed values never
/// reach the inline `style` attributes.
pub fn process_content_with(
    converter: &dyn MarkdownConverter,
    text: &str,
    style: &StyleParams,
) -> String {
    let style = &style.clone().sanitized();
    let text = normalize_newlines(text);

    if style.markdown {
        match render_markdown(converter, &text, style) {
            Ok(html) => html,
            Err(err) => {
                warn!("Markdown rendering failed, using plain line breaks: {}", err);
                render_line_breaks(&text)
            }
        }
    } else {
        inject_strong_font(&render_line_breaks(&text), style)
    }
}

/// Fold CRLF line endings and literal backslash-n sequences into `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace("\\n", "\n")
}

/// Wrap every `===text===` span in a `<mark>` carrying the highlight color.
pub fn apply_highlights(text: &str, highlight_color: &str) -> String {
    match patterns() {
        Ok(p) => highlight_with(&p.highlight, text, highlight_color),
        Err(_) => text.to_string(),
    }
}

/// Plain rendering: blank lines become a spacer, single newlines a `<br>`.
pub fn render_line_breaks(text: &str) -> String {
    text.replace("\n\n", PARAGRAPH_SPACER)
        .replace('\n', LINE_BREAK)
}

// ─────────────────────────────────────────────────────────────────────────────
// Markdown Mode
// ─────────────────────────────────────────────────────────────────────────────

fn render_markdown(
    converter: &dyn MarkdownConverter,
    text: &str,
    style: &StyleParams,
) -> Result<String> {
    let p = patterns()?;
    // Delimiters must be gone before conversion or they read as setext underlines
    let marked = highlight_with(&p.highlight, text, &style.highlight_color);
    let html = converter.convert(&marked)?;
    Ok(decorate_html(p, &html, style))
}

fn highlight_with(re: &Regex, text: &str, color: &str) -> String {
    re.replace_all(text, |caps: &Captures| {
        format!(
            "<mark style=\"background-color: {};\">{}</mark>",
            color, &caps[1]
        )
    })
    .into_owned()
}

fn decorate_html(p: &Patterns, html: &str, style: &StyleParams) -> String {
    let header_font = style.header_font_family.css_stack();

    let html = p.heading_open.replace_all(html, |caps: &Captures| {
        format!("<h{} style=\"font-family: {};\">", &caps[1], header_font)
    });
    let html = inject_strong_font(&html, style);

    let html = p
        .paragraph_gap
        .replace_all(&html, |caps: &Captures| {
            format!("</p>{}{}", &caps[1], SPACED_PARAGRAPH)
        })
        .into_owned();
    let html = p
        .double_break
        .replace_all(&html, |caps: &Captures| {
            format!("<br />{}{}", &caps[1], BREAK_SPACER)
        })
        .into_owned();

    let html = html.replace("<ul>", &format!("<ul style=\"{}\">", LIST_STYLE));
    let html = p
        .ordered_list_open
        .replace_all(&html, |caps: &Captures| {
            let start = caps.get(1).map_or("", |m| m.as_str());
            format!(
                "<ol{} style=\"{} list-style-type: decimal;\">",
                start, LIST_STYLE
            )
        })
        .into_owned();
    html.replace("<li>", ITEM_TAG)
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared Post-processing
// ─────────────────────────────────────────────────────────────────────────────

fn inject_strong_font(html: &str, style: &StyleParams) -> String {
    html.replace(
        "<strong>",
        &format!(
            "<strong style=\"font-family: {};\">",
            style.header_font_family.css_stack()
        ),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
