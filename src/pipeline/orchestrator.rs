//! Pipeline orchestration.
//!
//! Within a group the extract pass finishes before outlier detection, and
//! outlier detection finishes across every metric before aggregation, since
//! the aggregate must exclude runs flagged by any metric.

use super::discovery::{discover_trace_files, group_test_runs, PipelineConfig, TestGroup};
use crate::aggregator::{collect_phase_samples, compute_full_statistics, detect_outliers};
use crate::aggregator::{FullStatistics, OutlierSet};
use crate::output::write_statistics;
use crate::parser::schema::ProfilePhases;
use crate::parser::{extract_all_phases, parse_document, sum_long_animation_frames};
use crate::utils::error::{ParseError, PipelineError};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Metrics extracted from one capture file
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetrics {
    pub filename: String,
    pub phases: ProfilePhases,
    pub long_animation_frames_ms: f64,
}

/// Result of running the pipeline over one test group
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub stable_name: String,

    /// Number of capture files in the group
    pub file_count: usize,

    /// Every (file, value) pair flagged by any metric
    pub outliers: OutlierSet,

    /// Statistics over the runs that survived filtering
    pub statistics: FullStatistics,

    /// Where the document was written, once persisted
    pub output_path: Option<PathBuf>,
}

impl GroupReport {
    /// Files that contributed to the statistics
    pub fn retained_count(&self) -> usize {
        self.file_count - self.outliers.filenames().len()
    }
}

/// Outcome of a full pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub groups: Vec<GroupReport>,
}

impl RunSummary {
    pub fn total_files(&self) -> usize {
        self.groups.iter().map(|g| g.file_count).sum()
    }

    pub fn total_outlier_files(&self) -> usize {
        self.groups.iter().map(|g| g.outliers.filenames().len()).sum()
    }
}

/// Drop every run flagged by any metric
///
/// **Public** - filter stage
pub fn filter_outliers(metrics: Vec<FileMetrics>, outliers: &OutlierSet) -> Vec<FileMetrics> {
    metrics
        .into_iter()
        .filter(|m| !outliers.contains_file(&m.filename))
        .collect()
}

/// Statistics pipeline over one directory of capture files
#[derive(Debug, Clone)]
pub struct Pipeline {
    root: PathBuf,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(root: impl Into<PathBuf>, config: PipelineConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Directory the statistics documents are written to
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.output_dir_name)
    }

    /// Discovery stage
    pub fn discover(&self) -> Result<Vec<String>, PipelineError> {
        discover_trace_files(&self.root, &self.config)
    }

    /// Grouping stage
    pub fn group(&self, filenames: &[String]) -> Result<Vec<TestGroup>, PipelineError> {
        Ok(group_test_runs(filenames, &self.config)?)
    }

    /// Extract pass: decode every file of the group
    ///
    /// # Errors
    /// * `PipelineError::ReadFile` - file cannot be read
    /// * `PipelineError::Decode` - file is not a valid trace document
    pub fn extract(&self, group: &TestGroup) -> Result<Vec<FileMetrics>, PipelineError> {
        group
            .filenames
            .iter()
            .map(|filename| self.extract_file(filename))
            .collect()
    }

    fn extract_file(&self, filename: &str) -> Result<FileMetrics, PipelineError> {
        let path = self.root.join(filename);
        debug!("Extracting metrics from {}", path.display());

        let content = std::fs::read_to_string(&path).map_err(|source| PipelineError::ReadFile {
            path: path.clone(),
            source,
        })?;

        let decoded: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| PipelineError::Decode {
                path: path.clone(),
                source: ParseError::JsonError(e),
            })?;

        let doc = parse_document(&decoded).map_err(|source| PipelineError::Decode {
            path: path.clone(),
            source,
        })?;

        Ok(FileMetrics {
            filename: filename.to_string(),
            phases: extract_all_phases(&doc),
            long_animation_frames_ms: sum_long_animation_frames(&doc),
        })
    }

    /// Outlier pass over every metric of the group
    ///
    /// Runs the detector on the long animation frame totals and, for every
    /// profile/phase, on durations and on counts. Each phase sample keeps
    /// the run it came from, so runs missing a phase never shift filenames.
    pub fn detect(&self, metrics: &[FileMetrics]) -> OutlierSet {
        let threshold = self.config.outlier_threshold;
        let filenames: Vec<&str> = metrics.iter().map(|m| m.filename.as_str()).collect();

        let frame_totals: Vec<f64> = metrics.iter().map(|m| m.long_animation_frames_ms).collect();
        let mut outliers = detect_outliers(&filenames, &frame_totals, threshold);

        let series = collect_phase_samples(metrics.iter().map(|m| &m.phases), |index, phase| {
            (index, phase.duration_ms, phase.count as f64)
        });

        for (profile_name, phases) in &series {
            for (phase_name, samples) in phases {
                let names: Vec<&str> = samples.iter().map(|(i, _, _)| filenames[*i]).collect();
                let durations: Vec<f64> = samples.iter().map(|(_, d, _)| *d).collect();
                let counts: Vec<f64> = samples.iter().map(|(_, _, c)| *c).collect();

                let duration_outliers = detect_outliers(&names, &durations, threshold);
                let count_outliers = detect_outliers(&names, &counts, threshold);

                if !duration_outliers.is_empty() || !count_outliers.is_empty() {
                    debug!(
                        "{}/{}: {} duration and {} count outliers",
                        profile_name,
                        phase_name,
                        duration_outliers.len(),
                        count_outliers.len()
                    );
                }

                outliers.extend(duration_outliers);
                outliers.extend(count_outliers);
            }
        }

        outliers
    }

    /// Aggregate pass over the filtered runs
    pub fn aggregate(&self, metrics: &[FileMetrics]) -> FullStatistics {
        let phases: Vec<ProfilePhases> = metrics.iter().map(|m| m.phases.clone()).collect();
        let frame_totals: Vec<f64> = metrics.iter().map(|m| m.long_animation_frames_ms).collect();
        compute_full_statistics(&phases, &frame_totals)
    }

    /// Extract, detect, filter and aggregate one group
    pub fn analyze_group(&self, group: &TestGroup) -> Result<GroupReport, PipelineError> {
        let metrics = self.extract(group)?;
        let file_count = metrics.len();

        let outliers = self.detect(&metrics);
        if outliers.is_empty() {
            info!("{}: no outliers across {} runs", group.stable_name, file_count);
        } else {
            for record in &outliers {
                info!(
                    "{}: outlier {} (value {:.3})",
                    group.stable_name, record.filename, record.value
                );
            }
        }

        let retained = filter_outliers(metrics, &outliers);
        if retained.is_empty() {
            warn!("{}: every run was flagged as an outlier", group.stable_name);
        }

        let statistics = self.aggregate(&retained);

        Ok(GroupReport {
            stable_name: group.stable_name.clone(),
            file_count,
            outliers,
            statistics,
            output_path: None,
        })
    }

    /// Write the group's statistics document, overwriting any previous one
    pub fn persist(&self, report: &GroupReport) -> Result<PathBuf, PipelineError> {
        let path = self
            .output_dir()
            .join(format!("{}{}", report.stable_name, self.config.extension));
        write_statistics(&report.statistics, &path)?;
        Ok(path)
    }

    /// Run every stage over the directory
    ///
    /// **Public** - main entry point of the pipeline
    ///
    /// All groups are analysed before anything is written, so a naming or
    /// decode failure leaves no statistics behind from this invocation.
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let filenames = self.discover()?;
        let groups = self.group(&filenames)?;
        info!("Found {} test groups", groups.len());

        let mut reports = groups
            .iter()
            .map(|group| self.analyze_group(group))
            .collect::<Result<Vec<_>, _>>()?;

        for report in &mut reports {
            let path = self.persist(report)?;
            report.output_path = Some(path);
        }

        Ok(RunSummary { groups: reports })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{CalculatedPhase, CalculatedPhases};

    fn run(filename: &str, mount_ms: Option<f64>, frames_ms: f64) -> FileMetrics {
        let mut phases = ProfilePhases::new();
        if let Some(duration_ms) = mount_ms {
            let mut app = CalculatedPhases::new();
            app.insert(
                "mount".to_string(),
                CalculatedPhase {
                    duration_ms,
                    count: 1,
                },
            );
            phases.insert("app".to_string(), app);
        }
        FileMetrics {
            filename: filename.to_string(),
            phases,
            long_animation_frames_ms: frames_ms,
        }
    }

    #[test]
    fn test_detect_ragged_alignment() {
        let pipeline = Pipeline::new(".", PipelineConfig::default());
        // run b has no mount phase; the outlier must still be attributed to f
        let metrics = vec![
            run("a.json", Some(100.0), 0.0),
            run("b.json", None, 0.0),
            run("c.json", Some(100.0), 0.0),
            run("d.json", Some(100.0), 0.0),
            run("e.json", Some(100.0), 0.0),
            run("f.json", Some(900.0), 0.0),
            run("g.json", Some(100.0), 0.0),
        ];

        let outliers = pipeline.detect(&metrics);
        assert_eq!(outliers.len(), 1);
        assert!(outliers.contains_file("f.json"));
    }

    #[test]
    fn test_detect_long_animation_frames() {
        let pipeline = Pipeline::new(".", PipelineConfig::default());
        let metrics = vec![
            run("a.json", None, 10.0),
            run("b.json", None, 10.0),
            run("c.json", None, 10.0),
            run("d.json", None, 10.0),
            run("e.json", None, 100.0),
        ];

        let outliers = pipeline.detect(&metrics);
        assert_eq!(outliers.filenames().into_iter().collect::<Vec<_>>(), vec!["e.json"]);
    }

    #[test]
    fn test_detect_commit_counts() {
        let pipeline = Pipeline::new(".", PipelineConfig::default());
        let mut metrics: Vec<FileMetrics> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|name| run(&format!("{}.json", name), Some(9.0), 0.0))
            .collect();
        if let Some(mount) = metrics[5].phases.get_mut("app").and_then(|p| p.get_mut("mount")) {
            mount.count = 9;
        }

        let outliers = pipeline.detect(&metrics);
        assert_eq!(outliers.len(), 1);
        assert!(outliers.contains_file("f.json"));
        assert_eq!(outliers.iter().next().map(|r| r.value), Some(9.0));
    }

    #[test]
    fn test_filter_outliers() {
        let metrics = vec![run("a.json", Some(1.0), 0.0), run("b.json", Some(2.0), 0.0)];
        let outliers: OutlierSet = vec![crate::aggregator::OutlierRecord::new("b.json", 2.0)]
            .into_iter()
            .collect();

        let retained = filter_outliers(metrics, &outliers);
        assert_eq!(retained.len(), 1);
        assert_eq!(retained[0].filename, "a.json");
    }
}
