//! Regression thresholds and violation detection.

use super::schema::{
    ComparisonDifference, ComparisonReport, ComparisonSummary, Severity, ThresholdViolation,
};

/// Limits a treatment may move away from its baseline
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegressionThresholds {
    /// Maximum allowed increase of a mean, in percent of the baseline mean
    pub max_increase_percent: Option<f64>,

    /// Maximum allowed increase of a mean, in baseline standard deviations
    pub max_std_increase: Option<f64>,
}

impl RegressionThresholds {
    pub fn percent(max_increase_percent: f64) -> Self {
        Self {
            max_increase_percent: Some(max_increase_percent),
            max_std_increase: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max_increase_percent.is_none() && self.max_std_increase.is_none()
    }
}

/// Check a comparison report against thresholds and update its violations
///
/// Duration and long animation frame increases are errors; commit count
/// increases are warnings.
pub fn check_thresholds(
    report: &mut ComparisonReport,
    thresholds: &RegressionThresholds,
) -> Vec<ThresholdViolation> {
    let mut violations = Vec::new();

    check_metric(
        "long_animation_frames",
        &report.long_animation_frames,
        thresholds,
        Severity::Error,
        &mut violations,
    );

    for (profile_name, phases) in &report.phase_statistics {
        for (phase_name, comparison) in phases {
            let prefix = format!("phase_statistics.{}.{}", profile_name, phase_name);
            check_metric(
                &format!("{}.duration_ms", prefix),
                &comparison.duration_ms,
                thresholds,
                Severity::Error,
                &mut violations,
            );
            check_metric(
                &format!("{}.count", prefix),
                &comparison.count,
                thresholds,
                Severity::Warning,
                &mut violations,
            );
        }
    }

    report.threshold_violations = violations.clone();
    report.summary = create_summary(&violations);

    violations
}

fn check_metric(
    metric: &str,
    difference: &ComparisonDifference,
    thresholds: &RegressionThresholds,
    severity: Severity,
    violations: &mut Vec<ThresholdViolation>,
) {
    if difference.difference <= 0.0 {
        return;
    }

    if let Some(max_percent) = thresholds.max_increase_percent {
        if difference.percent_change > max_percent {
            violations.push(ThresholdViolation {
                metric: format!("{}.percent", metric),
                threshold: max_percent,
                actual: difference.percent_change,
                severity,
            });
        }
    }

    if let Some(max_std) = thresholds.max_std_increase {
        if difference.std_change > max_std {
            violations.push(ThresholdViolation {
                metric: format!("{}.std", metric),
                threshold: max_std,
                actual: difference.std_change,
                severity,
            });
        }
    }
}

/// Create summary based on violations
fn create_summary(violations: &[ThresholdViolation]) -> ComparisonSummary {
    let error_count = violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .count();

    let status = if error_count > 0 {
        "FAILED"
    } else if !violations.is_empty() {
        "WARNING"
    } else {
        "PASSED"
    };

    ComparisonSummary {
        has_regressions: error_count > 0,
        violation_count: violations.len(),
        status: status.to_string(),
    }
}
