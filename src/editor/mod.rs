//! Editing module for highlight-card
//!
//! This module contains everything that changes the raw document:
//! - Selection insertion (highlight and bold markup)
//! - Bounded linear undo/redo history
//! - Debounced coalescing of typed edits
//! - The session controller tying them together

mod debounce;
pub mod formatting;
mod history;
mod session;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use formatting::{wrap_selection, InsertCommand, InsertResult, MarkupMode};
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use session::{EditorSession, SEED_DOCUMENT};
