//! Process command implementation.
//!
//! The process command runs the statistics pipeline over one directory:
//! discovery, grouping by stable test name, per-group outlier filtering and
//! aggregation, then writing one statistics document per group.

use super::models::ProcessArgs;
use crate::pipeline::{Pipeline, RunSummary};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the process command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Directory cannot be listed
/// * A filename breaks the naming convention
/// * A capture file is not valid JSON
/// * Statistics cannot be written
pub fn execute_process(args: ProcessArgs) -> Result<RunSummary> {
    let start_time = Instant::now();

    info!("Processing trace captures in: {}", args.directory.display());

    let pipeline = Pipeline::new(&args.directory, args.config.clone());
    debug!(
        "Writing statistics to {} (outlier threshold {})",
        pipeline.output_dir().display(),
        pipeline.config().outlier_threshold
    );

    let summary = pipeline.run().with_context(|| {
        format!(
            "Failed to build statistics for {}",
            args.directory.display()
        )
    })?;

    for report in &summary.groups {
        if let Some(path) = &report.output_path {
            info!("✓ {} -> {}", report.stable_name, path.display());
        }
    }

    if args.print_summary {
        print_summary(&summary);
    }

    let elapsed = start_time.elapsed();
    info!("Processing completed in {:.2}s", elapsed.as_secs_f64());

    Ok(summary)
}

/// Validate process arguments
///
/// **Public** - can be called before execute_process for early validation
pub fn validate_args(args: &ProcessArgs) -> Result<()> {
    if args.directory.as_os_str().is_empty() {
        anyhow::bail!("Directory cannot be empty");
    }

    if !args.directory.is_dir() {
        anyhow::bail!("Not a directory: {}", args.directory.display());
    }

    if args.config.output_dir_name.is_empty() {
        anyhow::bail!("Output directory name cannot be empty");
    }

    if args.config.outlier_threshold.is_nan() || args.config.outlier_threshold <= 0.0 {
        anyhow::bail!("Outlier threshold must be positive");
    }

    Ok(())
}

/// Print per-group results
///
/// **Private** - internal helper for execute_process
fn print_summary(summary: &RunSummary) {
    println!("\n{}", "=".repeat(80));
    println!("BASELINE SUMMARY");
    println!("{}", "=".repeat(80));
    println!(
        "Groups: {} | Files: {} | Outlier files: {}",
        summary.groups.len(),
        summary.total_files(),
        summary.total_outlier_files()
    );

    for report in &summary.groups {
        println!(
            "\n{} ({} of {} runs kept)",
            report.stable_name,
            report.retained_count(),
            report.file_count
        );
        println!(
            "  long animation frames: mean {:.2} ms, std {:.2}",
            report.statistics.long_animation_frames.mean,
            report.statistics.long_animation_frames.std
        );
        for (profile_name, phases) in &report.statistics.phase_statistics {
            for (phase_name, entry) in phases {
                println!(
                    "  {}/{}: {:.2} ms (std {:.2}), {:.1} commits",
                    profile_name,
                    phase_name,
                    entry.duration_ms.mean,
                    entry.duration_ms.std,
                    entry.count.mean
                );
            }
        }
        for filename in report.outliers.filenames() {
            println!("  excluded: {}", filename);
        }
    }
    println!("{}", "=".repeat(80));
}
