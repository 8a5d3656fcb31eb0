//! Per-feature, per-class occurrence counters.
//!
//! Both Bayes-style classifiers keep the same shape of evidence: for every
//! feature (word) a map from class label to how often the feature was seen
//! under that label. Ordered maps keep iteration and serialized payloads
//! deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Occurrence counts keyed by feature, then by class label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureTable {
    counts: BTreeMap<String, BTreeMap<String, u64>>,
}

impl FeatureTable {
    /// Create an empty table.
    pub fn new() -> Self {
        FeatureTable::default()
    }

    /// Record one occurrence of `feature` under `label`.
    pub fn increment(&mut self, feature: &str, label: &str) {
        *self
            .counts
            .entry(feature.to_string())
            .or_default()
            .entry(label.to_string())
            .or_insert(0) += 1;
    }

    /// Occurrences of `feature` under `label`.
    pub fn count(&self, feature: &str, label: &str) -> u64 {
        self.counts
            .get(feature)
            .and_then(|per_label| per_label.get(label))
            .copied()
            .unwrap_or(0)
    }

    /// Occurrences of `feature` summed over every label.
    pub fn total(&self, feature: &str) -> u64 {
        self.counts
            .get(feature)
            .map(|per_label| per_label.values().sum())
            .unwrap_or(0)
    }

    /// Whether `feature` was ever observed.
    pub fn contains(&self, feature: &str) -> bool {
        self.counts.contains_key(feature)
    }

    /// Number of distinct features.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no feature was observed yet.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Every label that has at least one feature recorded.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.counts
            .values()
            .flat_map(|per_label| per_label.keys().map(String::as_str))
            .collect()
    }

    /// Occurrences summed over every feature and label.
    pub fn total_occurrences(&self) -> u64 {
        self.counts
            .values()
            .flat_map(|per_label| per_label.values())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut table = FeatureTable::new();
        table.increment("great", "positive");
        table.increment("great", "positive");
        table.increment("great", "negative");

        assert_eq!(table.count("great", "positive"), 2);
        assert_eq!(table.count("great", "negative"), 1);
        assert_eq!(table.count("great", "neutral"), 0);
        assert_eq!(table.total("great"), 3);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unknown_feature() {
        let table = FeatureTable::new();
        assert_eq!(table.count("missing", "any"), 0);
        assert_eq!(table.total("missing"), 0);
        assert!(!table.contains("missing"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_aggregates() {
        let mut table = FeatureTable::new();
        for (word, label) in [("zebra", "animal"), ("apple", "fruit"), ("apple", "fruit")] {
            table.increment(word, label);
        }
        assert_eq!(table.labels().into_iter().collect::<Vec<_>>(), vec!["animal", "fruit"]);
        assert_eq!(table.total_occurrences(), 3);
    }
}
