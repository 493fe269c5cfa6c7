//! Output writers for statistics documents.
//!
//! This module handles writing per-group statistics to disk and reading
//! them back for validation and comparison.

pub mod json;

// Re-export main functions
pub use json::{read_statistics, statistics_to_string, validate_path, write_statistics};
