//! Editing session controller
//!
//! `EditorSession` owns everything the editing surface works with: the raw
//! document, its undo/redo history, the current style and the pending
//! debounced history record. The surface calls into it explicitly; nothing
//! re-renders implicitly.
//!
//! Typed edits are coalesced: [`EditorSession::edit`] replaces the document
//! and (re)schedules a history record, which [`EditorSession::tick`] commits
//! once the debounce delay has passed without further typing. Highlight and
//! bold insertions are recorded immediately.

use super::debounce::Debouncer;
use super::formatting::{wrap_selection, InsertCommand, InsertResult, MarkupMode};
use super::history::History;
use crate::config::Settings;
use crate::export::ExportSnapshot;
use crate::render::{process_content, render_card};
use crate::style::{Preset, StyleParams};
use log::debug;
use std::time::{Duration, Instant};

/// Document every new session starts with.
pub const SEED_DOCUMENT: &str = r#"# The Future of AI Development: Key Insights

## 1. The Demand for AI-Native Developer Tools is Exploding

The rapid scaling of companies like **Cursor** proves there is a massive, unmet need for development environments built from the ground up with AI at their core, not just as a plugin.

**Key points:**
- Massive unmet demand for AI-native tools
- Traditional IDEs with AI plugins aren't enough
- Purpose-built solutions win

## 2. AI Progress Isn't a Slope, It's a Staircase

The jump from one model generation to the next isn't just an incremental improvement. It's a *step-function* change that unlocks entirely new categories of capabilities.

**What this means:**
1. Each new model unlocks new capabilities
2. Progress happens in discrete jumps
3. Planning must account for step changes

## 3. The Fastest Way to Build the Future is to Use It Yourself

By using Cursor to build Cursor, the team creates a powerful recursive feedback loop. This internal "dogfooding" accelerates development."#;

/// State of one editing session.
#[derive(Debug, Clone)]
pub struct EditorSession {
    /// Authoritative raw text
    document: String,
    history: History,
    style: StyleParams,
    /// Show only the rendered card, hiding the editor
    preview_only: bool,
    /// Typed text waiting to be committed to history
    pending: Debouncer<String>,
}

impl EditorSession {
    /// Create a session with default history limit and debounce delay.
    pub fn new(seed: impl Into<String>, style: StyleParams) -> Self {
        Self::with_options(seed, style, super::DEFAULT_HISTORY_LIMIT, super::DEFAULT_DEBOUNCE)
    }

    /// Create a session with explicit history limit and debounce delay.
    pub fn with_options(
        seed: impl Into<String>,
        style: StyleParams,
        history_limit: usize,
        debounce: Duration,
    ) -> Self {
        let document = seed.into();
        Self {
            history: History::with_limit(document.clone(), history_limit),
            document,
            style: style.sanitized(),
            preview_only: false,
            pending: Debouncer::new(debounce),
        }
    }

    /// Create a session on `document` configured from user settings.
    pub fn from_settings(document: impl Into<String>, settings: &Settings) -> Self {
        let mut style = settings.style.clone();
        if let Some(preset) = settings.preset {
            preset.apply_to(&mut style);
        }
        Self::with_options(
            document,
            style,
            settings.history_limit,
            Duration::from_millis(settings.debounce_ms),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn style(&self) -> &StyleParams {
        &self.style
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether a typed edit is waiting for the debounce delay.
    pub fn has_pending_record(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn preview_only(&self) -> bool {
        self.preview_only
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the document with typed text and schedule a history record.
    pub fn edit(&mut self, text: impl Into<String>, now: Instant) {
        self.document = text.into();
        self.pending.schedule(self.document.clone(), now);
    }

    /// Commit the pending typed edit if its delay has passed.
    ///
    /// Returns `true` when a new history entry was created.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending.poll(now) {
            Some(text) => self.history.record(text),
            None => false,
        }
    }

    /// Commit the pending typed edit right away.
    pub fn flush_pending(&mut self) -> bool {
        match self.pending.flush() {
            Some(text) => self.history.record(text),
            None => false,
        }
    }

    /// Wrap the selected character span in highlight markup.
    pub fn highlight_selection(&mut self, start: usize, end: usize) -> InsertResult {
        self.insert(start, end, InsertCommand::Highlight)
    }

    /// Wrap the selected character span in bold markup.
    pub fn bold_selection(&mut self, start: usize, end: usize) -> InsertResult {
        self.insert(start, end, InsertCommand::Bold)
    }

    fn insert(&mut self, start: usize, end: usize, command: InsertCommand) -> InsertResult {
        let mode = if self.style.markdown {
            MarkupMode::Markdown
        } else {
            MarkupMode::Literal {
                highlight_color: &self.style.highlight_color,
            }
        };
        let result = wrap_selection(&self.document, start, end, command, &mode);

        if result.applied {
            // Typed text before the insertion keeps its own undo step
            self.flush_pending();
            self.document = result.text.clone();
            self.history.record(self.document.clone());
            debug!("Inserted {:?} markup at {}..{}", command, start, end);
        }
        result
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Undo / Redo
    // ─────────────────────────────────────────────────────────────────────────

    /// Undo one step. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.flush_pending();
        match self.history.undo() {
            Some(text) => {
                self.document = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Redo one step. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.flush_pending();
        match self.history.redo() {
            Some(text) => {
                self.document = text.to_string();
                true
            }
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Style
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the style, clamping it to valid ranges.
    pub fn set_style(&mut self, style: StyleParams) {
        self.style = style.sanitized();
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        preset.apply_to(&mut self.style);
        debug!("Applied preset {}", preset);
    }

    /// Switch between Markdown and literal HTML. The document is left as is.
    pub fn set_markdown_mode(&mut self, markdown: bool) {
        self.style.markdown = markdown;
    }

    pub fn toggle_preview_only(&mut self) -> bool {
        self.preview_only = !self.preview_only;
        self.preview_only
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Styled markup for the current document and style.
    pub fn render(&self) -> String {
        process_content(&self.document, &self.style)
    }

    /// Styled markup wrapped in the card container.
    pub fn render_card(&self) -> String {
        render_card(&self.render(), &self.style)
    }

    /// Capture what an export should render, as of now.
    pub fn export_snapshot(&self) -> ExportSnapshot {
        ExportSnapshot::new(self.render(), self.style.clone())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SEED_DOCUMENT, StyleParams::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session(seed: &str) -> EditorSession {
        EditorSession::new(seed, StyleParams::default())
    }

    #[test]
    fn test_default_session_uses_seed() {
        let session = EditorSession::default();
        assert_eq!(session.document(), SEED_DOCUMENT);
        assert_eq!(session.history().len(), 1);
        assert!(session.render().contains("<h1 style="));
    }

    #[test]
    fn test_typing_burst_is_one_entry() {
        let start = Instant::now();
        let mut s = session("");
        for (i, text) in ["h", "he", "hel", "hell", "hello"].iter().enumerate() {
            s.edit(*text, start + ms(100 * i as u64));
            assert!(!s.tick(start + ms(100 * i as u64 + 50)));
        }
        assert_eq!(s.document(), "hello");
        assert_eq!(s.history().len(), 1);
        assert!(s.tick(start + ms(400 + 500)));
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.history().current(), "hello");
    }

    #[test]
    fn test_tick_without_change_records_nothing() {
        let start = Instant::now();
        let mut s = session("same");
        s.edit("same", start);
        assert!(!s.tick(start + ms(600)));
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_highlight_records_immediately() {
        let mut s = session("hello world");
        let result = s.highlight_selection(6, 11);
        assert_eq!(result.text, "hello ===world===");
        assert_eq!(result.cursor, 17);
        assert_eq!(s.document(), "hello ===world===");
        assert_eq!(s.history().len(), 2);
        assert!(!s.has_pending_record());
    }

    #[test]
    fn test_bold_in_literal_mode() {
        let mut s = session("hello world");
        s.set_markdown_mode(false);
        s.bold_selection(0, 5);
        assert_eq!(s.document(), "<strong>hello</strong> world");
    }

    #[test]
    fn test_highlight_literal_uses_style_color() {
        let mut s = session("hi");
        s.set_markdown_mode(false);
        s.apply_preset(Preset::LinkedInPost);
        s.highlight_selection(0, 2);
        assert_eq!(
            s.document(),
            "<mark style=\"background-color: #ddd6fe; padding: 0 4px;\">hi</mark>"
        );
    }

    #[test]
    fn test_empty_selection_does_not_record() {
        let mut s = session("hello");
        let result = s.bold_selection(2, 2);
        assert!(!result.applied);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_insert_flushes_pending_typing_first() {
        let start = Instant::now();
        let mut s = session("a");
        s.edit("a b", start);
        s.bold_selection(2, 3);
        assert_eq!(s.history().len(), 3);
        assert!(s.undo());
        assert_eq!(s.document(), "a b");
        assert!(s.undo());
        assert_eq!(s.document(), "a");
    }

    #[test]
    fn test_undo_commits_pending_burst() {
        let start = Instant::now();
        let mut s = session("one");
        s.edit("one two", start);
        assert!(s.undo());
        assert_eq!(s.document(), "one");
        assert!(s.redo());
        assert_eq!(s.document(), "one two");
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let start = Instant::now();
        let mut s = session("v0");
        for i in 1..=4u64 {
            s.edit(format!("v{}", i), start + ms(i * 1000));
            assert!(s.tick(start + ms(i * 1000 + 500)));
        }
        for i in (0..4).rev() {
            assert!(s.undo());
            assert_eq!(s.document(), format!("v{}", i));
        }
        assert!(!s.undo());
        assert_eq!(s.document(), "v0");
        for i in 1..=4 {
            assert!(s.redo());
            assert_eq!(s.document(), format!("v{}", i));
        }
        assert!(!s.redo());
    }

    #[test]
    fn test_edit_after_undo_drops_redo() {
        let start = Instant::now();
        let mut s = session("a");
        s.highlight_selection(0, 1);
        assert!(s.undo());
        s.edit("b", start);
        s.tick(start + ms(500));
        assert!(!s.redo());
        assert_eq!(s.document(), "b");
    }

    #[test]
    fn test_from_settings_applies_preset_and_limits() {
        let settings = Settings {
            preset: Some(Preset::BlogHeader),
            history_limit: 2,
            debounce_ms: 100,
            ..Default::default()
        };
        let start = Instant::now();
        let mut s = EditorSession::from_settings("x", &settings);
        assert_eq!(s.style().width, 800);
        s.edit("xy", start);
        assert!(s.tick(start + ms(100)));
        s.edit("xyz", start + ms(200));
        assert!(s.tick(start + ms(300)));
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn test_set_style_sanitizes() {
        let mut s = session("x");
        s.set_style(StyleParams {
            font_size: 500,
            ..Default::default()
        });
        assert_eq!(s.style().font_size, StyleParams::MAX_FONT_SIZE);
    }

    #[test]
    fn test_preview_toggle() {
        let mut s = session("x");
        assert!(!s.preview_only());
        assert!(s.toggle_preview_only());
        assert!(!s.toggle_preview_only());
    }

    #[test]
    fn test_export_snapshot_is_detached() {
        let mut s = session("===hi===");
        let snapshot = s.export_snapshot();
        s.highlight_selection(0, 2);
        s.apply_preset(Preset::Minimal);
        assert!(snapshot.markup().contains("<mark"));
        assert_eq!(snapshot.style().width, 672);
    }

    #[test]
    fn test_render_card_contains_markup() {
        let s = session("**bold**");
        let card = s.render_card();
        assert!(card.contains("class=\"highlight-card\""));
        assert!(card.contains("<strong style="));
    }
}
