use crate::output::read_statistics;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a statistics JSON file
pub fn validate_statistics_file(file_path: PathBuf) -> Result<()> {
    println!("Validating statistics: {}", file_path.display());

    let statistics = read_statistics(&file_path).context("Not a valid statistics document")?;

    println!("✓ Valid statistics JSON");
    println!(
        "  Long animation frames: mean {:.2} ms",
        statistics.long_animation_frames.mean
    );
    println!("  Profiles: {}", statistics.phase_statistics.len());
    println!("  Phases: {}", statistics.phase_count());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Trace Baseline Statistics Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  long_animation_frames: object - Per-run long animation frame totals");
        println!("    mean: number               - Population mean (ms)");
        println!("    std: number                - Population standard deviation");
        println!("    var: number                - Population variance");
        println!("  phase_statistics: object      - Keyed by profile name, then phase");
        println!("    duration_ms: object        - Summed actualDuration per run (mean/std/var)");
        println!("    count: object              - Commits per run (mean/std/var)");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Trace Baseline v{}", env!("CARGO_PKG_VERSION"));
    println!("Statistics Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Outlier-resistant performance baselines from repeated trace captures.");
}
