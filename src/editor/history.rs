//! Linear undo/redo history of document snapshots
//!
//! The history is a bounded list of full-text snapshots (oldest first) and a
//! cursor pointing at the snapshot that matches the editing surface.
//! Recording after an undo abandons the redo branch; there is no tree.

use log::debug;

/// Default maximum number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded, navigable record of raw-text states.
#[derive(Debug, Clone)]
pub struct History {
    /// Snapshots, oldest first. Never empty.
    entries: Vec<String>,
    /// Index of the current snapshot
    cursor: usize,
    /// Maximum number of snapshots (at least 1)
    limit: usize,
}

impl History {
    /// Create a history whose sole entry is `seed`.
    pub fn new(seed: impl Into<String>) -> Self {
        Self::with_limit(seed, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history with a custom maximum length.
    pub fn with_limit(seed: impl Into<String>, limit: usize) -> Self {
        Self {
            entries: vec![seed.into()],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new snapshot.
    ///
    /// Returns `false` (and does nothing) when `text` equals the current
    /// snapshot. Otherwise everything after the cursor is discarded, `text`
    /// is appended and becomes current, and the oldest snapshots are evicted
    /// if the limit is exceeded.
    pub fn record(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.entries[self.cursor] == text {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(text);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
            self.cursor -= overflow;
            debug!("History limit reached, evicted {} snapshot(s)", overflow);
        }

        true
    }

    /// Step back one snapshot. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one snapshot. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the seed snapshot is never evicted without a replacement.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
