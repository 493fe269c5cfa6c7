//! Capture file discovery and grouping by test identity.

use crate::runs::parse_test_run_with_extension;
use crate::utils::config::{DEFAULT_OUTLIER_THRESHOLD, STATISTICS_DIR_NAME, TRACE_FILE_EXTENSION};
use crate::utils::error::{NamingError, PipelineError};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Pipeline settings
///
/// **Public** - `Default` carries the fixed conventions of the capture tooling
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Output subdirectory; top-level files starting with this name are skipped
    pub output_dir_name: String,

    /// Extension of capture files
    pub extension: String,

    /// Z-score threshold for the outlier pass
    pub outlier_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir_name: STATISTICS_DIR_NAME.to_string(),
            extension: TRACE_FILE_EXTENSION.to_string(),
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
        }
    }
}

/// All executions of one test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestGroup {
    pub stable_name: String,
    pub filenames: BTreeSet<String>,
}

/// List capture files in `directory`
///
/// **Public** - discovery stage
///
/// Keeps regular files with the configured extension whose name does not
/// start with the reserved output name. The result is sorted.
///
/// # Errors
/// * `PipelineError::ReadDir` - directory cannot be listed
pub fn discover_trace_files(
    directory: &Path,
    config: &PipelineConfig,
) -> Result<Vec<String>, PipelineError> {
    let read_dir_error = |source| PipelineError::ReadDir {
        path: directory.to_path_buf(),
        source,
    };

    let mut filenames = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!("Skipping non UTF-8 entry: {:?}", entry.file_name());
            continue;
        };

        if !entry.path().is_file() {
            continue;
        }

        if !name.ends_with(&config.extension) || name.starts_with(&config.output_dir_name) {
            debug!("Skipping {}", name);
            continue;
        }

        filenames.push(name);
    }

    filenames.sort();
    info!("Discovered {} trace files in {}", filenames.len(), directory.display());

    Ok(filenames)
}

/// Group filenames by their stable test name
///
/// **Public** - grouping stage
///
/// Names are resolved against `config.extension`, the same extension
/// discovery filters on.
///
/// # Errors
/// Any filename that breaks the naming convention aborts grouping for the
/// whole batch.
pub fn group_test_runs<S: AsRef<str>>(
    filenames: &[S],
    config: &PipelineConfig,
) -> Result<Vec<TestGroup>, NamingError> {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for filename in filenames {
        let run = parse_test_run_with_extension(filename.as_ref(), &config.extension)?;
        groups.entry(run.stable_name).or_default().insert(run.filename);
    }

    Ok(groups
        .into_iter()
        .map(|(stable_name, filenames)| TestGroup {
            stable_name,
            filenames,
        })
        .collect())
}
