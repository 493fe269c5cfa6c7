//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Decoding capture files into typed trace sections
//! - Extracting per-profile render phase metrics
//! - Summing long animation frame durations

pub mod perf_trace;
pub mod schema;

// Re-export main types
pub use perf_trace::{
    count_entries_per_phase, extract_all_phases, extract_phases, list_profile_names,
    parse_document, sum_long_animation_frames,
};
pub use schema::{
    CalculatedPhase, CalculatedPhases, CapturedTraces, LongAnimationFrame, LongTask, Metric,
    PerformanceEntry, ProfileEntry, ProfilePhases, ProfileSection, RecordedProfile, TraceDocument,
};
