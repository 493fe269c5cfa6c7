//! Baseline vs treatment comparison of statistics documents.
//!
//! Compares two statistics documents of the same test group and reports
//! mean deltas with optional regression thresholds.
//!
//! # Example
//! ```ignore
//! use trace_baseline::diff::{check_thresholds, compare_statistics, RegressionThresholds};
//! use trace_baseline::output::read_statistics;
//!
//! let baseline = read_statistics("baseline/statistics/test_form.json")?;
//! let treatment = read_statistics("treatment/statistics/test_form.json")?;
//! let mut report = compare_statistics(&baseline, &treatment);
//! check_thresholds(&mut report, &RegressionThresholds::percent(10.0));
//! ```

mod engine;
mod output;
mod schema;
mod threshold;

// Public API exports
pub use engine::{compare_files, compare_statistics, compare_values};
pub use output::render_terminal_diff;
pub use schema::{
    ComparisonDifference, ComparisonReport, ComparisonSummary, PhaseComparison, Severity,
    ThresholdViolation,
};
pub use threshold::{check_thresholds, RegressionThresholds};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to read statistics: {0}")]
    ReadFailed(#[from] crate::utils::error::OutputError),
}
