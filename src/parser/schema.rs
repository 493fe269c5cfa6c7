//! Input schema definitions for performance trace captures.
//!
//! Every section of a capture is optional. Absence is modelled as `None`
//! rather than a missing key, so each access site handles it explicitly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A decoded capture file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceDocument {
    /// Scalar metrics reported next to the traces (web vitals etc.)
    #[serde(default)]
    pub metrics: Vec<Metric>,

    /// The captured performance timeline sections
    #[serde(default)]
    pub traces: CapturedTraces,
}

/// Named scalar metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
}

/// Performance timeline sections, keyed as the browser reports them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturedTraces {
    pub mark: Option<Vec<PerformanceEntry>>,

    pub paint: Option<Vec<PerformanceEntry>>,

    pub measure: Option<Vec<PerformanceEntry>>,

    pub longtask: Option<Vec<LongTask>>,

    #[serde(rename = "long-animation-frame")]
    pub long_animation_frames: Option<Vec<LongAnimationFrame>>,

    /// React profiler output, keyed by profiler id
    pub profiles: Option<BTreeMap<String, ProfileSection>>,
}

/// Generic `PerformanceEntry` (mark, paint, measure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub entry_type: String,

    #[serde(default)]
    pub start_time: f64,

    #[serde(default)]
    pub duration: f64,
}

/// Long task entry with its container attribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongTask {
    #[serde(flatten)]
    pub entry: PerformanceEntry,

    #[serde(default)]
    pub attribution: Vec<LongTaskAttribution>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongTaskAttribution {
    #[serde(flatten)]
    pub entry: PerformanceEntry,

    #[serde(default)]
    pub container_type: String,

    #[serde(default)]
    pub container_src: String,

    #[serde(default)]
    pub container_id: String,

    #[serde(default)]
    pub container_name: String,
}

/// Long animation frame (main thread busy for longer than a frame budget)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongAnimationFrame {
    /// Total frame duration in milliseconds
    pub duration: f64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub start_time: f64,

    #[serde(default)]
    pub render_start: f64,

    #[serde(default)]
    pub style_and_layout_start: f64,

    #[serde(default, rename = "firstUIEventTimestamp")]
    pub first_ui_event_timestamp: f64,

    #[serde(default)]
    pub blocking_duration: f64,

    #[serde(default)]
    pub scripts: Vec<FrameScript>,
}

/// Script attributed to a long animation frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameScript {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub invoker: String,

    #[serde(default)]
    pub invoker_type: String,

    #[serde(default)]
    pub forced_style_and_layout_duration: f64,

    #[serde(default, rename = "sourceURL")]
    pub source_url: String,

    #[serde(default)]
    pub source_function_name: String,
}

/// One React profiler commit measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntry {
    /// Commit phase: "mount", "update", "nested-update", ...
    pub phase: String,

    /// Time spent rendering the profiled tree for this commit
    pub actual_duration: f64,

    #[serde(default)]
    pub base_duration: f64,

    #[serde(default)]
    pub start_time: f64,

    #[serde(default)]
    pub commit_time: f64,
}

/// Profiler output as written by the capture harness
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedProfile {
    #[serde(default)]
    pub entries: Vec<ProfileEntry>,

    /// Entries observed before the harness capped the buffer
    #[serde(default)]
    pub total_written_entries: u64,
}

/// A profile is either the recorded object or a bare entry list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileSection {
    Recorded(RecordedProfile),
    Entries(Vec<ProfileEntry>),
}

impl ProfileSection {
    /// Entries of this profile regardless of the on-disk shape
    pub fn entries(&self) -> &[ProfileEntry] {
        match self {
            ProfileSection::Recorded(profile) => &profile.entries,
            ProfileSection::Entries(entries) => entries,
        }
    }
}

/// Summed duration and commit count of one phase within one profile of one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatedPhase {
    pub duration_ms: f64,
    pub count: u64,
}

/// Phase name -> metrics, for a single profile of a single file.
/// Phases are only inserted once an entry for them is seen, so counts are never zero.
pub type CalculatedPhases = BTreeMap<String, CalculatedPhase>;

/// Profile name -> phases, for a single file
pub type ProfilePhases = BTreeMap<String, CalculatedPhases>;
