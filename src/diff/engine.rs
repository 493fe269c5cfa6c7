//! Core comparison engine.
//! Computes mean deltas between two statistics documents.

use super::schema::{ComparisonDifference, ComparisonReport, ComparisonSummary, PhaseComparison};
use super::DiffError;
use crate::aggregator::schema::{FullStatistics, Statistics};
use crate::output::read_statistics;
use chrono::Utc;
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;

/// Compare the means of one metric
///
/// A mean that moves away from a zero baseline (or from a baseline without
/// spread, for `std_change`) is reported as an infinite change.
pub fn compare_values(baseline: &Statistics, treatment: &Statistics) -> ComparisonDifference {
    let difference = treatment.mean - baseline.mean;
    let percent_change = relative_change(difference, baseline.mean.abs()) * 100.0;
    let std_change = relative_change(difference, baseline.std);

    ComparisonDifference {
        baseline: baseline.mean,
        treatment: treatment.mean,
        difference,
        percent_change,
        std_change,
    }
}

fn relative_change(difference: f64, scale: f64) -> f64 {
    if scale > 0.0 {
        difference / scale
    } else if difference == 0.0 {
        0.0
    } else {
        f64::INFINITY.copysign(difference)
    }
}

/// Generate a comparison report for two statistics documents
///
/// **Public** - main entry point for comparisons
///
/// Both documents are expected to describe the same test group.
pub fn compare_statistics(baseline: &FullStatistics, treatment: &FullStatistics) -> ComparisonReport {
    let mut phase_statistics: BTreeMap<String, BTreeMap<String, PhaseComparison>> = BTreeMap::new();
    let mut removed_phases = Vec::new();
    let mut added_phases = Vec::new();

    for (profile_name, baseline_phases) in &baseline.phase_statistics {
        let treatment_phases = treatment.phase_statistics.get(profile_name);

        for (phase_name, baseline_entry) in baseline_phases {
            let Some(treatment_entry) = treatment_phases.and_then(|p| p.get(phase_name)) else {
                removed_phases.push(format!("{}/{}", profile_name, phase_name));
                continue;
            };

            phase_statistics
                .entry(profile_name.clone())
                .or_default()
                .insert(
                    phase_name.clone(),
                    PhaseComparison {
                        duration_ms: compare_values(
                            &baseline_entry.duration_ms,
                            &treatment_entry.duration_ms,
                        ),
                        count: compare_values(&baseline_entry.count, &treatment_entry.count),
                    },
                );
        }
    }

    for (profile_name, treatment_phases) in &treatment.phase_statistics {
        let baseline_phases = baseline.phase_statistics.get(profile_name);
        for phase_name in treatment_phases.keys() {
            if baseline_phases.map_or(true, |p| !p.contains_key(phase_name)) {
                added_phases.push(format!("{}/{}", profile_name, phase_name));
            }
        }
    }

    debug!(
        "Compared {} profiles ({} added, {} removed phases)",
        phase_statistics.len(),
        added_phases.len(),
        removed_phases.len()
    );

    ComparisonReport {
        generated_at: Utc::now().to_rfc3339(),
        long_animation_frames: compare_values(
            &baseline.long_animation_frames,
            &treatment.long_animation_frames,
        ),
        phase_statistics,
        added_phases,
        removed_phases,
        threshold_violations: Vec::new(),
        summary: ComparisonSummary::default(),
    }
}

/// Load two statistics documents and compare them
///
/// # Errors
/// * `DiffError::ReadFailed` - either document cannot be read or decoded
pub fn compare_files(
    baseline_path: impl AsRef<Path>,
    treatment_path: impl AsRef<Path>,
) -> Result<ComparisonReport, DiffError> {
    let baseline = read_statistics(baseline_path)?;
    let treatment = read_statistics(treatment_path)?;
    Ok(compare_statistics(&baseline, &treatment))
}
