//! Trace Baseline
//!
//! Outlier-resistant performance baselines from repeated browser
//! trace captures of UI test runs.
//!
//! Each test runs several times (browsers, shards) and every run writes
//! one capture file. The pipeline groups captures by test, extracts
//! React profiler phase metrics and long animation frame totals, drops
//! runs that are z-score outliers for any metric, and writes
//! mean/std/variance per test group.
//!
//! ```bash
//! trace-baseline process ./perf-results
//! ```

pub mod aggregator;
pub mod commands;
pub mod diff;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod runs;
pub mod utils;
