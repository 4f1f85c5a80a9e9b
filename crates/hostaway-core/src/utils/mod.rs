//! Utility functions for string formatting.

pub mod format;

pub use format::{preview, truncate_string};
