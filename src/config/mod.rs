//! Configuration module for highlight-card
//!
//! This module handles user preferences, including serialization to and
//! from JSON and persistent storage in platform-specific directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
