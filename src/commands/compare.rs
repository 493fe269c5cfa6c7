//! Compare command implementation.
//! Compares a treatment statistics document against its baseline.

use super::models::CompareArgs;
use crate::diff::{check_thresholds, compare_files, render_terminal_diff, RegressionThresholds};
use anyhow::{Context, Result};
use log::info;
use std::fs;

/// Execute the compare command
///
/// # Errors
/// Fails when either document cannot be read, the report cannot be
/// written, or a threshold marks the treatment as a regression.
pub fn execute_compare(args: CompareArgs) -> Result<()> {
    let mut report = compare_files(&args.baseline, &args.treatment)
        .context("Failed to compare statistics documents")?;

    let thresholds = RegressionThresholds {
        max_increase_percent: args.max_increase_percent,
        max_std_increase: args.max_std_increase,
    };

    if !thresholds.is_empty() {
        check_thresholds(&mut report, &thresholds);
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).context("Failed to write comparison report JSON")?;
        info!("Comparison report written to {}", path.display());
    }

    if args.summary {
        println!("{}", render_terminal_diff(&report));
    }

    if report.summary.has_regressions {
        anyhow::bail!(
            "Regression detected: {} threshold violations",
            report.summary.violation_count
        );
    }

    Ok(())
}
