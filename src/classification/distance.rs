//! Weighted distance metrics for nearest-neighbour classification.

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// Distance metrics supported by [`KNearestNeighbors`](super::KNearestNeighbors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceMetric {
    /// `sqrt(Σ w[i] × (a[i] - b[i])²)`
    #[default]
    Euclidean,
    /// `sqrt(Σ w[i] × |a[i] - b[i]|)`
    SqrtManhattan,
}

impl DistanceMetric {
    /// Weighted distance between `a` and `b`.
    ///
    /// Both vectors must have the same length as `weights`.
    pub fn distance(&self, a: &[f64], b: &[f64], weights: &[f64]) -> Result<f64> {
        match self {
            DistanceMetric::Euclidean => weighted_euclidean(a, b, weights),
            DistanceMetric::SqrtManhattan => weighted_sqrt_manhattan(a, b, weights),
        }
    }

    /// Get the name of this distance metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::SqrtManhattan => "sqrt_manhattan",
        }
    }

    /// Parse a distance metric from a string.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "euclidean" | "l2" => Ok(DistanceMetric::Euclidean),
            "sqrt_manhattan" | "huffman" => Ok(DistanceMetric::SqrtManhattan),
            _ => Err(ClassifierError::invalid_argument(format!(
                "Unknown distance metric: {s}"
            ))),
        }
    }
}

fn check_dimensions(a: &[f64], b: &[f64], weights: &[f64]) -> Result<()> {
    for v in [a, b] {
        if v.len() != weights.len() {
            return Err(ClassifierError::dimension_mismatch(weights.len(), v.len()));
        }
    }
    Ok(())
}

/// Weighted Euclidean distance.
pub fn weighted_euclidean(a: &[f64], b: &[f64], weights: &[f64]) -> Result<f64> {
    check_dimensions(a, b, weights)?;
    let sum: f64 = a
        .iter()
        .zip(b)
        .zip(weights)
        .map(|((x, y), w)| w * (x - y).powi(2))
        .sum();
    Ok(sum.sqrt())
}

/// Square root of the weighted Manhattan distance.
pub fn weighted_sqrt_manhattan(a: &[f64], b: &[f64], weights: &[f64]) -> Result<f64> {
    check_dimensions(a, b, weights)?;
    let sum: f64 = a
        .iter()
        .zip(b)
        .zip(weights)
        .map(|((x, y), w)| w * (x - y).abs())
        .sum();
    Ok(sum.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: [f64; 2] = [1.0, 1.0];

    #[test]
    fn test_euclidean() {
        let d = weighted_euclidean(&[0.0, 0.0], &[3.0, 4.0], &UNIT).unwrap();
        assert!((d - 5.0).abs() < 1e-12);

        let d = weighted_euclidean(&[0.0, 0.0], &[3.0, 4.0], &[0.0, 1.0]).unwrap();
        assert!((d - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_sqrt_manhattan() {
        let d = weighted_sqrt_manhattan(&[0.0, 0.0], &[3.0, 6.0], &UNIT).unwrap();
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry_and_identity() {
        let a = [1.5, -2.0, 0.25];
        let b = [0.0, 4.0, 1.0];
        let w = [1.0, 0.5, 2.0];
        for metric in [DistanceMetric::Euclidean, DistanceMetric::SqrtManhattan] {
            let ab = metric.distance(&a, &b, &w).unwrap();
            let ba = metric.distance(&b, &a, &w).unwrap();
            assert_eq!(ab, ba);
            assert!(ab >= 0.0);
            assert_eq!(metric.distance(&a, &a, &w).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = weighted_euclidean(&[1.0], &[1.0, 2.0], &UNIT).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert!(weighted_sqrt_manhattan(&[1.0, 2.0], &[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_parse_str() {
        assert_eq!(
            DistanceMetric::parse_str("Huffman").unwrap(),
            DistanceMetric::SqrtManhattan
        );
        assert_eq!(DistanceMetric::Euclidean.name(), "euclidean");
        assert!(DistanceMetric::parse_str("cosine").is_err());
    }
}
