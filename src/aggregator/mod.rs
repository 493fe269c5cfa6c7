//! Aggregation of per-run phase metrics into baseline statistics.
//!
//! This module provides:
//! - Population statistics (mean, std, variance)
//! - Ragged per-phase sample collection across runs
//! - Z-score outlier detection reused for every metric

pub mod outliers;
pub mod schema;
pub mod statistics;

// Re-export main types and functions
pub use outliers::{detect_outliers, identify_outliers, OutlierRecord, OutlierSet};
pub use schema::{FullStatistics, PhaseStatisticEntry, PhaseStatistics, Statistics};
pub use statistics::{
    aggregate, aggregate_phase_counts, aggregate_phase_durations, collect_phase_samples,
    compute_full_statistics, population_moments, PhaseSeries,
};
