//! Two-pass statistics pipeline over a directory of trace captures.
//!
//! Stages, per invocation:
//! 1. Discover capture files in the directory
//! 2. Group them by stable test name
//! 3. Per group: extract -> detect outliers -> filter -> aggregate
//! 4. Persist one statistics document per group

pub mod discovery;
pub mod orchestrator;

pub use discovery::{discover_trace_files, group_test_runs, PipelineConfig, TestGroup};
pub use orchestrator::{filter_outliers, FileMetrics, GroupReport, Pipeline, RunSummary};
