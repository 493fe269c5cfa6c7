//! Configuration and constants for the pipeline.

/// Current statistics schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Extension every trace capture (and statistics document) carries
pub const TRACE_FILE_EXTENSION: &str = ".json";

/// Name of the output subdirectory; top-level files starting with it are never inputs
pub const STATISTICS_DIR_NAME: &str = "statistics";

/// Z-score above which a run is treated as an outlier
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 2.0;

// Capture files wrap the trace sections under this key, next to a "metrics" list
pub const CAPTURED_TRACES_KEY: &str = "capturedTraces";
pub const METRICS_KEY: &str = "metrics";
