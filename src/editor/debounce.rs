//! Cancellable deferred task for coalescing bursts of edits
//!
//! A [`Debouncer`] holds at most one pending value with a deadline.
//! Scheduling a new value replaces the pending one and restarts the delay, so
//! a burst of calls yields only the last value once things go quiet. Time is
//! passed in by the caller; the debouncer never reads the clock itself.

use std::time::{Duration, Instant};

/// Default delay before a typed edit is committed to history.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Single-slot debounced task.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `value` to fire `delay` after `now`, superseding any pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Take the pending value immediately, regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value. Returns whether something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
