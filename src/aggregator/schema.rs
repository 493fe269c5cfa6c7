//! Output JSON schema definitions for statistics documents.
//!
//! One `FullStatistics` document is written per test group.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Population mean, standard deviation and variance of a sample set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    pub std: f64,
    pub var: f64,
}

/// Statistics for one phase of one profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseStatisticEntry {
    /// Summed `actualDuration` per run
    pub duration_ms: Statistics,

    /// Commits per run
    pub count: Statistics,
}

/// Phase name -> statistics
pub type PhaseStatistics = BTreeMap<String, PhaseStatisticEntry>;

/// Top-level statistics document written to `<dir>/statistics/<test>.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullStatistics {
    /// Per-run long animation frame totals
    pub long_animation_frames: Statistics,

    /// Profile name -> phase -> statistics
    pub phase_statistics: BTreeMap<String, PhaseStatistics>,
}

impl FullStatistics {
    /// Number of (profile, phase) pairs with statistics
    pub fn phase_count(&self) -> usize {
        self.phase_statistics.values().map(|phases| phases.len()).sum()
    }
}
