//! Terminal output rendering for comparison reports.

use super::schema::{ComparisonDifference, ComparisonReport};

/// Render a human-readable summary of a comparison report for the terminal
pub fn render_terminal_diff(report: &ComparisonReport) -> String {
    let mut out = String::new();

    out.push_str("\nBaseline Comparison Summary\n");
    out.push_str("---------------------------------------------------\n");
    out.push_str(&render_line(
        "Long animation frames (ms)",
        &report.long_animation_frames,
    ));

    for (profile_name, phases) in &report.phase_statistics {
        out.push_str(&format!("\nProfile '{}':\n", profile_name));
        for (phase_name, comparison) in phases {
            out.push_str(&render_line(
                &format!("  {} duration (ms)", phase_name),
                &comparison.duration_ms,
            ));
            out.push_str(&render_line(
                &format!("  {} commits", phase_name),
                &comparison.count,
            ));
        }
    }

    if !report.added_phases.is_empty() {
        out.push_str(&format!("\nNew phases: {}\n", report.added_phases.join(", ")));
    }
    if !report.removed_phases.is_empty() {
        out.push_str(&format!(
            "\nMissing phases: {}\n",
            report.removed_phases.join(", ")
        ));
    }

    if !report.threshold_violations.is_empty() {
        out.push_str("\nThreshold violations:\n");
        for violation in &report.threshold_violations {
            out.push_str(&format!(
                "  [{:?}] {}: {:.2} > {:.2}\n",
                violation.severity, violation.metric, violation.actual, violation.threshold
            ));
        }
    }

    out.push_str("---------------------------------------------------\n");
    out.push_str(&format!("Status: {}\n", report.summary.status));

    out
}

fn render_line(label: &str, difference: &ComparisonDifference) -> String {
    let symbol = if difference.difference > 0.0 {
        "+"
    } else if difference.difference < 0.0 {
        "-"
    } else {
        "="
    };

    format!(
        "{} {}: {:.2} -> {:.2} ({:+.2}%)\n",
        symbol, label, difference.baseline, difference.treatment, difference.percent_change
    )
}
