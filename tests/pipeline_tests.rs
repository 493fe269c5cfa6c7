use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use trace_baseline::output::read_statistics;
use trace_baseline::pipeline::{Pipeline, PipelineConfig};
use trace_baseline::utils::error::PipelineError;

/// Capture file with one "app" profile holding the given mount durations
fn capture(mount_durations: &[f64], frame_durations: &[f64]) -> Value {
    let entries: Vec<Value> = mount_durations
        .iter()
        .map(|d| json!({"phase": "mount", "actualDuration": d, "baseDuration": d, "startTime": 0.0, "commitTime": d}))
        .collect();
    let frames: Vec<Value> = frame_durations.iter().map(|d| json!({"duration": d})).collect();

    json!({
        "metrics": [],
        "capturedTraces": {
            "profiles": {
                "app": {"entries": entries, "totalWrittenEntries": mount_durations.len()}
            },
            "long-animation-frame": frames
        }
    })
}

fn write_capture(dir: &Path, filename: &str, content: &Value) {
    fs::write(dir.join(filename), serde_json::to_string(content).unwrap()).unwrap();
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_outlier_run_excluded_from_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let name = "test_form_input_performance";
    write_capture(dir.path(), &format!("20241219180018_{}[chromium-1-3].json", name), &capture(&[100.0], &[]));
    write_capture(dir.path(), &format!("20241219180019_{}[chromium-2-3].json", name), &capture(&[102.0], &[]));
    write_capture(dir.path(), &format!("20241219180020_{}[webkit-3-3].json", name), &capture(&[500.0], &[]));

    // three runs can never exceed two population std devs, so use one here
    let config = PipelineConfig {
        outlier_threshold: 1.0,
        ..PipelineConfig::default()
    };
    let summary = Pipeline::new(dir.path(), config).run().unwrap();

    assert_eq!(summary.groups.len(), 1);
    let report = &summary.groups[0];
    assert_eq!(report.file_count, 3);
    assert_eq!(
        report.outliers.filenames().into_iter().collect::<Vec<_>>(),
        vec!["20241219180020_test_form_input_performance[webkit-3-3].json"]
    );
    assert_eq!(report.retained_count(), 2);

    let written = read_statistics(dir.path().join("statistics").join(format!("{}.json", name))).unwrap();
    let mount = written.phase_statistics["app"]["mount"];
    assert_close(mount.duration_ms.mean, 101.0);
    assert_close(mount.duration_ms.var, 1.0);
    assert_close(mount.count.mean, 1.0);
    assert_close(mount.count.std, 0.0);
    assert_eq!(written, report.statistics);
}

#[test]
fn test_default_threshold_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let durations = [100.0, 102.0, 100.0, 102.0, 100.0, 500.0];
    for (shard, duration) in durations.iter().enumerate() {
        write_capture(
            dir.path(),
            &format!("2024121918{:04}_test_chart_performance[chromium-{}-6].json", shard, shard + 1),
            &capture(&[*duration], &[50.0]),
        );
    }

    let summary = Pipeline::new(dir.path(), PipelineConfig::default()).run().unwrap();

    let report = &summary.groups[0];
    assert_eq!(report.outliers.len(), 1);
    assert!(report
        .outliers
        .contains_file("20241219180005_test_chart_performance[chromium-6-6].json"));

    let stats = &report.statistics;
    assert_close(stats.phase_statistics["app"]["mount"].duration_ms.mean, 100.8);
    assert_close(stats.long_animation_frames.mean, 50.0);
    assert_close(stats.long_animation_frames.std, 0.0);
}

#[test]
fn test_groups_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    write_capture(dir.path(), "20241219180018_test_alpha[chromium-1-2].json", &capture(&[10.0, 2.0], &[5.0, 7.5]));
    write_capture(dir.path(), "20241219180018_test_alpha[chromium-2-2].json", &capture(&[14.0], &[12.5]));
    write_capture(dir.path(), "20241219180019_test_beta.json", &capture(&[1000.0], &[]));

    let summary = Pipeline::new(dir.path(), PipelineConfig::default()).run().unwrap();

    assert_eq!(summary.groups.len(), 2);
    assert_eq!(summary.total_files(), 3);
    assert_eq!(summary.total_outlier_files(), 0);

    let alpha = read_statistics(dir.path().join("statistics/test_alpha.json")).unwrap();
    let mount = alpha.phase_statistics["app"]["mount"];
    assert_close(mount.duration_ms.mean, 13.0);
    assert_close(mount.count.mean, 1.5);
    assert_close(mount.count.var, 0.25);
    assert_close(alpha.long_animation_frames.mean, 12.5);

    let beta = read_statistics(dir.path().join("statistics/test_beta.json")).unwrap();
    assert_close(beta.phase_statistics["app"]["mount"].duration_ms.mean, 1000.0);
    assert_close(beta.long_animation_frames.mean, 0.0);
}

#[test]
fn test_discovery_skips_reserved_and_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    write_capture(dir.path(), "20241219180018_test_gamma.json", &capture(&[3.0], &[]));
    fs::write(dir.path().join("statistics.json"), "not json at all").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
    fs::create_dir(dir.path().join("statistics")).unwrap();
    fs::write(dir.path().join("statistics/test_gamma.json"), "stale").unwrap();

    let pipeline = Pipeline::new(dir.path(), PipelineConfig::default());
    assert_eq!(pipeline.discover().unwrap(), vec!["20241219180018_test_gamma.json"]);

    pipeline.run().unwrap();

    // stale output overwritten
    let gamma = read_statistics(dir.path().join("statistics/test_gamma.json")).unwrap();
    assert_close(gamma.phase_statistics["app"]["mount"].duration_ms.mean, 3.0);
}

#[test]
fn test_missing_sections_produce_empty_statistics() {
    let dir = tempfile::tempdir().unwrap();
    write_capture(dir.path(), "20241219180018_test_delta.json", &json!({"capturedTraces": {}}));
    write_capture(dir.path(), "20241219180019_test_delta.json", &json!({}));

    let summary = Pipeline::new(dir.path(), PipelineConfig::default()).run().unwrap();

    let stats = &summary.groups[0].statistics;
    assert!(stats.phase_statistics.is_empty());
    assert_close(stats.long_animation_frames.mean, 0.0);
}

#[test]
fn test_bad_filename_aborts_batch() {
    let dir = tempfile::tempdir().unwrap();
    write_capture(dir.path(), "20241219180018_test_ok.json", &capture(&[3.0], &[]));
    write_capture(dir.path(), "results.json", &capture(&[3.0], &[]));

    let result = Pipeline::new(dir.path(), PipelineConfig::default()).run();

    assert!(matches!(result, Err(PipelineError::Naming(_))));
    assert!(!dir.path().join("statistics").exists());
}

#[test]
fn test_corrupt_file_aborts_without_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    write_capture(dir.path(), "20241219180018_test_a_ok.json", &capture(&[3.0], &[]));
    fs::write(dir.path().join("20241219180018_test_b_broken.json"), "{\"capturedTraces\": ").unwrap();

    let result = Pipeline::new(dir.path(), PipelineConfig::default()).run();

    assert!(matches!(result, Err(PipelineError::Decode { .. })));
    assert!(!dir.path().join("statistics").exists());
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let result = Pipeline::new(dir.path().join("nope"), PipelineConfig::default()).run();
    assert!(matches!(result, Err(PipelineError::ReadDir { .. })));
}

#[test]
fn test_commit_count_outlier_excluded() {
    let dir = tempfile::tempdir().unwrap();
    let name = "test_data_editor_performance";

    // every run spends 9ms in "update"; the last one gets there in nine commits
    for shard in 1..=6 {
        let durations: Vec<f64> = if shard == 6 { vec![1.0; 9] } else { vec![9.0] };
        let entries: Vec<Value> = durations
            .iter()
            .map(|d| json!({"phase": "update", "actualDuration": d}))
            .collect();
        write_capture(
            dir.path(),
            &format!("2024121918{:04}_{}[chromium-{}-6].json", shard, name, shard),
            &json!({"capturedTraces": {"profiles": {"app": {"entries": entries}}}}),
        );
    }

    let summary = Pipeline::new(dir.path(), PipelineConfig::default()).run().unwrap();
    let report = &summary.groups[0];

    assert_eq!(
        report.outliers.filenames().into_iter().collect::<Vec<_>>(),
        vec!["20241219180006_test_data_editor_performance[chromium-6-6].json"]
    );

    let update = report.statistics.phase_statistics["app"]["update"];
    assert_close(update.count.mean, 1.0);
    assert_close(update.count.std, 0.0);
    assert_close(update.duration_ms.mean, 9.0);
}
