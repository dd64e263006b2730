//! Markdown to HTML conversion using comrak
//!
//! The pipeline talks to the converter through the [`MarkdownConverter`]
//! trait so that conversion is treated as fallible: a failure is absorbed by
//! the plain line-break renderer instead of reaching the caller.

use crate::error::{Error, Result};
use comrak::{markdown_to_html, Options};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

// ─────────────────────────────────────────────────────────────────────────────
// Converter Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Converts Markdown source into an HTML fragment.
pub trait MarkdownConverter {
    fn convert(&self, markdown: &str) -> Result<String>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown conversion.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Render a single newline as `<br />` instead of a soft break
    pub hard_breaks: bool,
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Pass raw HTML through untouched (needed for highlight wrappers)
    pub raw_html: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            hard_breaks: true,
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            raw_html: true,
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        // Extension options
        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;

        // Render options
        options.render.hardbreaks = self.hard_breaks;
        options.render.unsafe_ = self.raw_html;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Comrak Converter
// ─────────────────────────────────────────────────────────────────────────────

/// GitHub-flavored, line-break-sensitive converter backed by comrak.
#[derive(Debug, Clone, Default)]
pub struct ComrakConverter {
    options: MarkdownOptions,
}

impl ComrakConverter {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }
}

impl MarkdownConverter for ComrakConverter {
    fn convert(&self, markdown: &str) -> Result<String> {
        let options = self.options.to_comrak_options();
        // comrak has no error channel; a parser panic is its only failure mode
        catch_parser_panic(|| markdown_to_html(markdown, &options))
    }
}

/// Run a conversion, reporting a panic inside it as `Error::Markdown`.
pub(crate) fn catch_parser_panic<F>(convert: F) -> Result<String>
where
    F: FnOnce() -> String,
{
    panic::catch_unwind(AssertUnwindSafe(convert))
        .map_err(|payload| Error::Markdown(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "parser panicked".to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
