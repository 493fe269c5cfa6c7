//! JSON statistics output writer.
//!
//! Writes FullStatistics documents to JSON files with proper formatting.

use crate::aggregator::schema::FullStatistics;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a statistics document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `statistics` - Statistics to write
/// * `output_path` - Path to output JSON file (parent directories are created)
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_statistics(
    statistics: &FullStatistics,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing statistics to: {}", output_path.display());

    validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, statistics)
        .map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    debug!(
        "Statistics written ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize statistics to a pretty JSON string
pub fn statistics_to_string(statistics: &FullStatistics) -> Result<String, OutputError> {
    serde_json::to_string_pretty(statistics).map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Public** - rejects empty paths and existing directories
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a statistics document from a JSON file
///
/// **Public** - used by validation and comparison
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_statistics(input_path: impl AsRef<Path>) -> Result<FullStatistics, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading statistics from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let statistics: FullStatistics =
        serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(OutputError::SerializationFailed)?;

    debug!(
        "Statistics loaded: {} profiles, {} phases",
        statistics.phase_statistics.len(),
        statistics.phase_count()
    );

    Ok(statistics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::schema::{PhaseStatisticEntry, Statistics};
    use std::collections::BTreeMap;
    use tempfile::NamedTempFile;

    fn create_test_statistics() -> FullStatistics {
        let mut phases = BTreeMap::new();
        phases.insert(
            "mount".to_string(),
            PhaseStatisticEntry {
                duration_ms: Statistics {
                    mean: 101.0,
                    std: 1.0,
                    var: 1.0,
                },
                count: Statistics {
                    mean: 1.0,
                    std: 0.0,
                    var: 0.0,
                },
            },
        );

        let mut phase_statistics = BTreeMap::new();
        phase_statistics.insert("app".to_string(), phases);

        FullStatistics {
            long_animation_frames: Statistics {
                mean: 12.5,
                std: 2.5,
                var: 6.25,
            },
            phase_statistics,
        }
    }

    #[test]
    fn test_write_and_read_statistics() {
        let statistics = create_test_statistics();
        let temp_file = NamedTempFile::new().unwrap();

        write_statistics(&statistics, temp_file.path()).unwrap();
        let loaded = read_statistics(temp_file.path()).unwrap();

        assert_eq!(loaded, statistics);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = statistics_to_string(&create_test_statistics()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["long_animation_frames"]["var"], 6.25);
        assert_eq!(
            value["phase_statistics"]["app"]["mount"]["duration_ms"]["mean"],
            101.0
        );
    }

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("statistics/test_something.json");

        write_statistics(&create_test_statistics(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
