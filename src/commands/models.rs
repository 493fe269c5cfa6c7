use crate::pipeline::PipelineConfig;
use std::path::PathBuf;

/// Arguments for the process command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ProcessArgs {
    /// Directory holding the trace captures
    pub directory: PathBuf,

    /// Pipeline conventions (output directory, extension, outlier threshold)
    pub config: PipelineConfig,

    /// Print a per-group summary to stdout
    pub print_summary: bool,
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            config: PipelineConfig::default(),
            print_summary: false,
        }
    }
}

/// Arguments for the compare command
#[derive(Debug, Clone, Default)]
pub struct CompareArgs {
    /// Baseline statistics document
    pub baseline: PathBuf,

    /// Treatment statistics document of the same test
    pub treatment: PathBuf,

    /// Maximum allowed mean increase in percent
    pub max_increase_percent: Option<f64>,

    /// Maximum allowed mean increase in baseline standard deviations
    pub max_std_increase: Option<f64>,

    /// Write the comparison report JSON here
    pub output: Option<PathBuf>,

    /// Print a text summary to stdout
    pub summary: bool,
}
