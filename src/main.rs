//! Trace Baseline CLI
//!
//! Turns a directory of repeated performance trace captures into
//! per-test baseline statistics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_baseline::commands::{
    display_schema, display_version, execute_compare, execute_process, validate_args,
    validate_statistics_file, CompareArgs, ProcessArgs,
};
use trace_baseline::pipeline::PipelineConfig;

/// Trace Baseline - outlier-resistant statistics for UI performance traces
#[derive(Parser, Debug)]
#[command(name = "trace-baseline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute per-test statistics for a directory of trace captures
    Process {
        /// Directory containing the capture JSON files
        directory: PathBuf,

        /// Print a per-group summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Compare a treatment statistics file against a baseline
    Compare {
        /// Baseline statistics JSON
        #[arg(short, long)]
        baseline: PathBuf,

        /// Treatment statistics JSON (same test)
        #[arg(short, long)]
        treatment: PathBuf,

        /// Fail when a mean grows by more than this percentage
        #[arg(long)]
        max_increase_percent: Option<f64>,

        /// Fail when a mean grows by more than this many baseline standard deviations
        #[arg(long)]
        max_std_increase: Option<f64>,

        /// Output path for the comparison report JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a statistics JSON file
    Validate {
        /// Path to statistics JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Process { directory, summary } => {
            let args = ProcessArgs {
                directory,
                config: PipelineConfig::default(),
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_process(args)?;
        }

        Commands::Compare {
            baseline,
            treatment,
            max_increase_percent,
            max_std_increase,
            output,
            summary,
        } => {
            execute_compare(CompareArgs {
                baseline,
                treatment,
                max_increase_percent,
                max_std_increase,
                output,
                summary,
            })?;
        }

        Commands::Validate { file } => {
            validate_statistics_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
