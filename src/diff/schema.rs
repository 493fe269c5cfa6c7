//! Schema definitions for comparison reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete comparison of a baseline and a treatment statistics document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Timestamp when the comparison was generated
    pub generated_at: String,

    /// Change of the mean long animation frame total
    pub long_animation_frames: ComparisonDifference,

    /// Profile name -> phase -> changes, for phases present on both sides
    pub phase_statistics: BTreeMap<String, BTreeMap<String, PhaseComparison>>,

    /// `profile/phase` keys only present in the treatment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added_phases: Vec<String>,

    /// `profile/phase` keys only present in the baseline
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_phases: Vec<String>,

    /// Threshold violations (populated by `check_thresholds`)
    pub threshold_violations: Vec<ThresholdViolation>,

    pub summary: ComparisonSummary,
}

/// Change of one metric's mean
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDifference {
    pub baseline: f64,
    pub treatment: f64,

    /// treatment - baseline
    pub difference: f64,

    /// Relative change in percent; infinite when the mean leaves a zero
    /// baseline (written as `null` in JSON)
    pub percent_change: f64,

    /// Difference in baseline standard deviations; infinite when the mean
    /// moves and the baseline has no spread
    pub std_change: f64,
}

/// Duration and count changes of one phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseComparison {
    pub duration_ms: ComparisonDifference,
    pub count: ComparisonDifference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A metric that moved beyond its configured threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdViolation {
    /// Dotted metric path, e.g. `phase_statistics.app.mount.duration_ms`
    pub metric: String,
    pub threshold: f64,
    pub actual: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub has_regressions: bool,
    pub violation_count: usize,

    /// PASSED, WARNING or FAILED
    pub status: String,
}

impl Default for ComparisonSummary {
    fn default() -> Self {
        Self {
            has_regressions: false,
            violation_count: 0,
            status: "PASSED".to_string(),
        }
    }
}
