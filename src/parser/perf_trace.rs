//! Phase metric extraction from performance trace captures.
//!
//! Decodes raw capture JSON into a [`TraceDocument`] and derives the
//! per-profile phase metrics and long animation frame totals the
//! statistics pipeline works on. Missing sections yield empty results.

use super::schema::{
    CalculatedPhase, CalculatedPhases, CapturedTraces, Metric, ProfileEntry, ProfilePhases,
    TraceDocument,
};
use crate::utils::config::{CAPTURED_TRACES_KEY, METRICS_KEY};
use crate::utils::error::ParseError;
use log::debug;
use std::collections::BTreeMap;

/// Parse a decoded capture file into typed trace sections
///
/// **Public** - main entry point for parsing
///
/// Accepts both the capture harness layout
/// (`{"metrics": [...], "capturedTraces": {...}}`) and a bare object
/// holding the trace sections directly.
///
/// # Errors
/// * `ParseError::InvalidFormat` - top level is not a JSON object
/// * `ParseError::JsonError` - a present section has the wrong shape
pub fn parse_document(raw: &serde_json::Value) -> Result<TraceDocument, ParseError> {
    let serde_json::Value::Object(obj) = raw else {
        return Err(ParseError::InvalidFormat(
            "Trace document must be a JSON object".to_string(),
        ));
    };

    let Some(captured) = obj.get(CAPTURED_TRACES_KEY) else {
        debug!("No '{}' wrapper, reading sections from top level", CAPTURED_TRACES_KEY);
        let traces: CapturedTraces = serde_json::from_value(raw.clone())?;
        return Ok(TraceDocument {
            metrics: Vec::new(),
            traces,
        });
    };

    let traces: CapturedTraces = if captured.is_null() {
        CapturedTraces::default()
    } else {
        serde_json::from_value(captured.clone())?
    };

    let metrics: Vec<Metric> = match obj.get(METRICS_KEY) {
        Some(value) if !value.is_null() => serde_json::from_value(value.clone())?,
        _ => Vec::new(),
    };

    Ok(TraceDocument { metrics, traces })
}

/// Entries of one profile, empty when the document has no such profile
///
/// **Private** - shared lookup for the phase extractors
fn profile_entries<'a>(doc: &'a TraceDocument, profile_name: &str) -> &'a [ProfileEntry] {
    doc.traces
        .profiles
        .as_ref()
        .and_then(|profiles| profiles.get(profile_name))
        .map(|profile| profile.entries())
        .unwrap_or(&[])
}

/// Sum `actualDuration` and count commits per phase for one profile
///
/// **Public** - returns an empty map when the profile is absent
pub fn extract_phases(doc: &TraceDocument, profile_name: &str) -> CalculatedPhases {
    let mut phases = CalculatedPhases::new();

    for entry in profile_entries(doc, profile_name) {
        let phase = phases
            .entry(entry.phase.clone())
            .or_insert_with(CalculatedPhase::default);
        phase.duration_ms += entry.actual_duration;
        phase.count += 1;
    }

    phases
}

/// Names of all profiles present in the document
pub fn list_profile_names(doc: &TraceDocument) -> Vec<String> {
    doc.traces
        .profiles
        .as_ref()
        .map(|profiles| profiles.keys().cloned().collect())
        .unwrap_or_default()
}

/// Phase metrics for every profile in the document
///
/// **Public** - per-file input of the statistics pipeline
pub fn extract_all_phases(doc: &TraceDocument) -> ProfilePhases {
    list_profile_names(doc)
        .into_iter()
        .map(|name| {
            let phases = extract_phases(doc, &name);
            (name, phases)
        })
        .collect()
}

/// Total duration of all long animation frames, 0.0 when none were captured
pub fn sum_long_animation_frames(doc: &TraceDocument) -> f64 {
    doc.traces
        .long_animation_frames
        .as_deref()
        .map(|frames| frames.iter().map(|frame| frame.duration).sum())
        .unwrap_or(0.0)
}

/// Number of commits per phase for one profile
pub fn count_entries_per_phase(doc: &TraceDocument, profile_name: &str) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for entry in profile_entries(doc, profile_name) {
        *counts.entry(entry.phase.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> TraceDocument {
        parse_document(&json!({
            "metrics": [{"name": "LCP", "value": 812.5}],
            "capturedTraces": {
                "profiles": {
                    "app": {
                        "entries": [
                            {"phase": "mount", "actualDuration": 12.0, "baseDuration": 10.0, "startTime": 1.0, "commitTime": 13.0},
                            {"phase": "update", "actualDuration": 2.5, "baseDuration": 2.0, "startTime": 20.0, "commitTime": 23.0},
                            {"phase": "update", "actualDuration": 3.5, "baseDuration": 2.0, "startTime": 30.0, "commitTime": 34.0}
                        ],
                        "totalWrittenEntries": 3
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_extract_phases_accumulates() {
        let doc = sample_document();
        let phases = extract_phases(&doc, "app");

        assert_eq!(phases.len(), 2);
        assert_eq!(phases["mount"].duration_ms, 12.0);
        assert_eq!(phases["mount"].count, 1);
        assert_eq!(phases["update"].duration_ms, 6.0);
        assert_eq!(phases["update"].count, 2);
    }

    #[test]
    fn test_extract_phases_unknown_profile() {
        let doc = sample_document();
        assert!(extract_phases(&doc, "missing").is_empty());
    }

    #[test]
    fn test_count_entries_per_phase() {
        let doc = sample_document();
        let counts = count_entries_per_phase(&doc, "app");
        assert_eq!(counts["mount"], 1);
        assert_eq!(counts["update"], 2);
    }

    #[test]
    fn test_metrics_are_carried() {
        let doc = sample_document();
        assert_eq!(doc.metrics.len(), 1);
        assert_eq!(doc.metrics[0].name, "LCP");
    }

    #[test]
    fn test_non_object_rejected() {
        let result = parse_document(&json!([1, 2, 3]));
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }
}
