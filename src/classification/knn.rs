//! K-nearest-neighbours classifier over numeric feature vectors.
//!
//! A lazy learner: training only stores the samples. Classification computes
//! the weighted distance from the query to every stored sample, keeps the `k`
//! closest in a bounded max-heap and lets them vote.
//!
//! Equal distances are ordered by training index, so the earliest sample wins
//! a place among the neighbours. When several labels share the highest vote
//! count the result is all of them, sorted and joined by [`TIE_DELIMITER`].

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classification::distance::DistanceMetric;
use crate::error::{ClassifierError, Result};
use crate::persist::Persist;

/// Separator placed between tied labels in a composite result.
pub const TIE_DELIMITER: &str = "#";

/// Configuration for [`KNearestNeighbors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnConfig {
    /// Number of neighbours that vote.
    pub k: usize,
    /// Distance metric.
    pub metric: DistanceMetric,
    /// Per-dimension weights. Their length fixes the vector dimension.
    pub weights: Vec<f64>,
}

impl KnnConfig {
    /// Unit weights for `dimension` features.
    pub fn new(k: usize, metric: DistanceMetric, dimension: usize) -> Self {
        KnnConfig {
            k,
            metric,
            weights: vec![1.0; dimension],
        }
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(ClassifierError::invalid_argument("k must be at least 1"));
        }
        if self.weights.is_empty() {
            return Err(ClassifierError::invalid_argument("weights must not be empty"));
        }
        if let Some(w) = self.weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ClassifierError::invalid_argument(format!(
                "weights must be finite and non-negative, got {w}"
            )));
        }
        Ok(())
    }
}

/// Persisted form of a [`KNearestNeighbors`] classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnState {
    pub config: KnnConfig,
    pub samples: Vec<Vec<f64>>,
    pub labels: Vec<String>,
}

/// A stored sample and its distance to the query.
#[derive(Debug, Clone, Copy)]
struct Neighbor {
    index: usize,
    distance: f64,
}

impl PartialEq for Neighbor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Neighbor {}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: the farthest neighbour sits on top and is evicted first
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

fn check_dimension(dimension: usize, sample: &[f64]) -> Result<()> {
    if sample.len() != dimension {
        return Err(ClassifierError::dimension_mismatch(dimension, sample.len()));
    }
    Ok(())
}

/// Parallel sample/label sequences must line up, match the dimension and
/// carry non-empty labels.
fn check_samples(dimension: usize, samples: &[Vec<f64>], labels: &[String]) -> Result<()> {
    if samples.len() != labels.len() {
        return Err(ClassifierError::invalid_argument(format!(
            "got {} samples but {} labels",
            samples.len(),
            labels.len()
        )));
    }
    for sample in samples {
        check_dimension(dimension, sample)?;
    }
    if labels.iter().any(String::is_empty) {
        return Err(ClassifierError::invalid_argument("label must not be empty"));
    }
    Ok(())
}

/// Distance-weighted majority vote classifier.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    config: KnnConfig,
    samples: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl KNearestNeighbors {
    /// Create an empty classifier.
    pub fn new(config: KnnConfig) -> Result<Self> {
        config.validate()?;
        Ok(KNearestNeighbors {
            config,
            samples: Vec::new(),
            labels: Vec::new(),
        })
    }

    fn check_sample(&self, sample: &[f64]) -> Result<()> {
        check_dimension(self.dimension(), sample)
    }

    /// Replace the stored samples.
    ///
    /// On error the previous samples are kept.
    pub fn learn_batch(&mut self, samples: Vec<Vec<f64>>, labels: Vec<String>) -> Result<()> {
        check_samples(self.dimension(), &samples, &labels)?;

        log::debug!("stored {} samples", samples.len());
        self.samples = samples;
        self.labels = labels;
        Ok(())
    }

    /// Append one sample.
    pub fn learn(&mut self, sample: Vec<f64>, label: &str) -> Result<()> {
        super::validate_label(label)?;
        self.check_sample(&sample)?;
        self.samples.push(sample);
        self.labels.push(label.to_string());
        Ok(())
    }

    /// The `k` nearest samples to `query`, closest first.
    fn nearest(&self, query: &[f64]) -> Result<Vec<Neighbor>> {
        if self.samples.is_empty() {
            return Err(ClassifierError::not_classified("no training samples"));
        }
        self.check_sample(query)?;

        let k = self.config.k.min(self.samples.len());
        let mut heap = BinaryHeap::with_capacity(k + 1);
        for (index, sample) in self.samples.iter().enumerate() {
            let distance = self
                .config
                .metric
                .distance(query, sample, &self.config.weights)?;
            heap.push(Neighbor { index, distance });
            if heap.len() > k {
                heap.pop();
            }
        }

        Ok(heap.into_sorted_vec())
    }

    /// Labels with the highest vote count among the neighbours of `query`,
    /// in lexicographic order.
    pub fn vote(&self, query: &[f64]) -> Result<Vec<String>> {
        let neighbors = self.nearest(query)?;

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for neighbor in &neighbors {
            log::trace!(
                "neighbor index={} distance={}",
                neighbor.index,
                neighbor.distance
            );
            *counts.entry(self.labels[neighbor.index].as_str()).or_insert(0) += 1;
        }

        let max = counts.values().copied().max().unwrap_or(0);
        let winners: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count == max)
            .map(|(label, _)| label.to_string())
            .collect();

        if winners.len() > 1 {
            log::debug!("vote tied between {winners:?}");
        }
        Ok(winners)
    }

    /// Classify a single vector.
    ///
    /// Tied labels are joined with [`TIE_DELIMITER`].
    pub fn classify_one(&self, query: &[f64]) -> Result<String> {
        Ok(self.vote(query)?.join(TIE_DELIMITER))
    }

    /// Classify every query in parallel, preserving order.
    pub fn classify(&self, queries: &[Vec<f64>]) -> Result<Vec<String>> {
        if self.samples.is_empty() {
            return Err(ClassifierError::not_classified("no training samples"));
        }
        queries
            .par_iter()
            .map(|query| self.classify_one(query))
            .collect()
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no sample is stored.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Expected vector length.
    pub fn dimension(&self) -> usize {
        self.config.weights.len()
    }

    /// Active configuration.
    pub fn config(&self) -> &KnnConfig {
        &self.config
    }
}

impl Persist for KNearestNeighbors {
    const MODEL_NAME: &'static str = "KNearestNeighbors";
    const SCHEMA_VERSION: &'static str = "01";
    type State = KnnState;

    fn export_state(&self) -> KnnState {
        KnnState {
            config: self.config.clone(),
            samples: self.samples.clone(),
            labels: self.labels.clone(),
        }
    }

    fn import_state(&mut self, state: KnnState) {
        self.config = state.config;
        self.samples = state.samples;
        self.labels = state.labels;
    }

    fn validate_state(state: &KnnState) -> Result<()> {
        state.config.validate()?;
        check_samples(state.config.weights.len(), &state.samples, &state.labels)
    }
}
