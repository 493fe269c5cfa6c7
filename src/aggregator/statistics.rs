//! Population statistics over per-run phase metrics.
//!
//! Phase samples are ragged: a run that never committed a phase simply
//! contributes no sample for it, so sample counts may differ per phase.

use super::schema::{FullStatistics, PhaseStatisticEntry, PhaseStatistics, Statistics};
use crate::parser::schema::{CalculatedPhase, ProfilePhases};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Profile name -> phase name -> one sample per run containing that phase
pub type PhaseSeries<T> = BTreeMap<String, BTreeMap<String, Vec<T>>>;

/// Population mean and variance, `None` for an empty slice
///
/// **Public** - shared with the outlier detector so both agree on `std`
pub fn population_moments(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some((mean, var))
}

/// Mean, std and variance using population (divide by N) formulas
///
/// An empty sample set yields all zeros.
pub fn aggregate(samples: &[f64]) -> Statistics {
    match population_moments(samples) {
        Some((mean, var)) => Statistics {
            mean,
            std: var.sqrt(),
            var,
        },
        None => {
            warn!("No samples to aggregate, reporting zero statistics");
            Statistics::default()
        }
    }
}

/// Collect one sample per run for every profile/phase the run contains
///
/// **Public** - generic collector behind the duration/count series
///
/// `select` receives the run's position in `runs` together with its phase
/// metrics, so callers can keep samples attributable to their run.
pub fn collect_phase_samples<'a, I, T, F>(runs: I, select: F) -> PhaseSeries<T>
where
    I: IntoIterator<Item = &'a ProfilePhases>,
    F: Fn(usize, &CalculatedPhase) -> T,
{
    let mut series: PhaseSeries<T> = BTreeMap::new();

    for (index, profiles) in runs.into_iter().enumerate() {
        for (profile_name, phases) in profiles {
            let profile_series = series.entry(profile_name.clone()).or_default();
            for (phase_name, phase) in phases {
                profile_series
                    .entry(phase_name.clone())
                    .or_default()
                    .push(select(index, phase));
            }
        }
    }

    series
}

/// Summed phase durations per profile/phase across runs
pub fn aggregate_phase_durations<'a, I>(all_phases: I) -> PhaseSeries<f64>
where
    I: IntoIterator<Item = &'a ProfilePhases>,
{
    collect_phase_samples(all_phases, |_, phase| phase.duration_ms)
}

/// Commit counts per profile/phase across runs
pub fn aggregate_phase_counts<'a, I>(all_phases: I) -> PhaseSeries<u64>
where
    I: IntoIterator<Item = &'a ProfilePhases>,
{
    collect_phase_samples(all_phases, |_, phase| phase.count)
}

/// Build the statistics document for a set of runs
///
/// **Public** - final aggregation stage of the pipeline
///
/// # Arguments
/// * `all_phases` - per-run phase metrics
/// * `long_animation_frames` - per-run long animation frame totals
pub fn compute_full_statistics(
    all_phases: &[ProfilePhases],
    long_animation_frames: &[f64],
) -> FullStatistics {
    let durations = aggregate_phase_durations(all_phases);
    let counts = aggregate_phase_counts(all_phases);

    let phase_statistics = durations
        .into_iter()
        .map(|(profile_name, phases)| {
            let profile_counts = counts.get(&profile_name);
            let phase_stats: PhaseStatistics = phases
                .into_iter()
                .map(|(phase_name, phase_durations)| {
                    let phase_counts: Vec<f64> = profile_counts
                        .and_then(|c| c.get(&phase_name))
                        .map(|c| c.iter().map(|&n| n as f64).collect())
                        .unwrap_or_default();

                    let entry = PhaseStatisticEntry {
                        duration_ms: aggregate(&phase_durations),
                        count: aggregate(&phase_counts),
                    };
                    (phase_name, entry)
                })
                .collect();
            (profile_name, phase_stats)
        })
        .collect();

    let statistics = FullStatistics {
        long_animation_frames: aggregate(long_animation_frames),
        phase_statistics,
    };

    debug!(
        "Aggregated {} runs into {} phase statistics",
        all_phases.len(),
        statistics.phase_count()
    );

    statistics
}
