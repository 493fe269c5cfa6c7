//! Z-score outlier detection over named samples.
//!
//! The detector is metric-agnostic: callers run it once per metric
//! (long animation frame totals, one phase's durations, one phase's
//! counts) and union the resulting sets.

use super::statistics::population_moments;
use crate::utils::config::DEFAULT_OUTLIER_THRESHOLD;
use log::debug;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// A run flagged as anomalous for one metric
#[derive(Debug, Clone)]
pub struct OutlierRecord {
    pub filename: String,
    pub value: f64,
}

impl OutlierRecord {
    pub fn new(filename: impl Into<String>, value: f64) -> Self {
        Self {
            filename: filename.into(),
            value,
        }
    }
}

// Equality and ordering go through `f64::total_cmp` so records can live in
// ordered sets; two records are equal only when the value bits match.
impl PartialEq for OutlierRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OutlierRecord {}

impl PartialOrd for OutlierRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OutlierRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.filename
            .cmp(&other.filename)
            .then_with(|| self.value.total_cmp(&other.value))
    }
}

impl Hash for OutlierRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filename.hash(state);
        self.value.to_bits().hash(state);
    }
}

/// Deterministically ordered set of outlier records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlierSet {
    records: BTreeSet<OutlierRecord>,
}

impl OutlierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: OutlierRecord) -> bool {
        self.records.insert(record)
    }

    /// Union another set into this one
    pub fn extend(&mut self, other: OutlierSet) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutlierRecord> {
        self.records.iter()
    }

    /// Whether any metric flagged this file
    pub fn contains_file(&self, filename: &str) -> bool {
        self.records.iter().any(|r| r.filename == filename)
    }

    /// Distinct flagged filenames, sorted
    pub fn filenames(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.filename.as_str()).collect()
    }
}

impl FromIterator<OutlierRecord> for OutlierSet {
    fn from_iter<I: IntoIterator<Item = OutlierRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OutlierSet {
    type Item = &'a OutlierRecord;
    type IntoIter = std::collections::btree_set::Iter<'a, OutlierRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Flag values whose distance from the population mean reaches
/// `threshold` population standard deviations
///
/// **Public** - main entry point for outlier detection
///
/// The bound is inclusive: `|value - mean| >= threshold * std`. With the
/// default threshold, a single spike among four equal runs
/// (`[10, 10, 10, 10, 100]`) sits exactly at 2 std and is flagged.
/// A zero spread (identical values, or a single sample) never flags anything.
///
/// # Panics
/// If `filenames` and `values` differ in length.
pub fn detect_outliers<S: AsRef<str>>(filenames: &[S], values: &[f64], threshold: f64) -> OutlierSet {
    assert_eq!(
        filenames.len(),
        values.len(),
        "every sample needs exactly one filename"
    );

    let Some((mean, var)) = population_moments(values) else {
        return OutlierSet::new();
    };

    let std = var.sqrt();
    if std <= 0.0 {
        return OutlierSet::new();
    }

    let outliers: OutlierSet = filenames
        .iter()
        .zip(values)
        .filter(|(_, value)| (*value - mean).abs() >= threshold * std)
        .map(|(filename, value)| OutlierRecord::new(filename.as_ref(), *value))
        .collect();

    debug!(
        "{} of {} samples beyond {} std (mean {:.3}, std {:.3})",
        outliers.len(),
        values.len(),
        threshold,
        mean,
        std
    );

    outliers
}

/// [`detect_outliers`] with the default threshold of 2 standard deviations
pub fn identify_outliers<S: AsRef<str>>(filenames: &[S], values: &[f64]) -> OutlierSet {
    detect_outliers(filenames, values, DEFAULT_OUTLIER_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("run_{}.json", i)).collect()
    }

    #[test]
    fn test_identical_values_have_no_outliers() {
        let values = vec![7.5; 6];
        assert!(identify_outliers(&names(6), &values).is_empty());
        assert!(detect_outliers(&names(6), &values, 0.0).is_empty());
    }

    #[test]
    fn test_single_sample_never_outlier() {
        assert!(identify_outliers(&names(1), &[123.0]).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let filenames: Vec<String> = Vec::new();
        assert!(identify_outliers(&filenames, &[]).is_empty());
    }

    #[test]
    fn test_flags_far_value() {
        let outliers = identify_outliers(&names(5), &[10.0, 10.0, 10.0, 10.0, 100.0]);
        assert_eq!(outliers.len(), 1);
        assert!(outliers.contains_file("run_4.json"));
        assert!(outliers.iter().all(|r| r.value == 100.0));
    }

    #[test]
    fn test_threshold_override() {
        let values = [100.0, 102.0, 500.0];
        assert!(identify_outliers(&names(3), &values).is_empty());

        let outliers = detect_outliers(&names(3), &values, 1.0);
        assert_eq!(outliers.len(), 1);
        assert!(outliers.contains_file("run_2.json"));
    }

    #[test]
    fn test_set_semantics() {
        let mut set = OutlierSet::new();
        assert!(set.insert(OutlierRecord::new("a.json", 1.0)));
        assert!(!set.insert(OutlierRecord::new("a.json", 1.0)));
        assert!(set.insert(OutlierRecord::new("a.json", 2.0)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.filenames().len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        identify_outliers(&names(2), &[1.0]);
    }
}
