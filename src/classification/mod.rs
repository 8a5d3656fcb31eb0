//! Classifiers and their shared building blocks.
//!
//! # Architecture
//!
//! - [`NaiveBayesClassifier`]: bag-of-words classifier with Laplace smoothing
//! - [`IntentClassifier`]: thread-safe Bayes-style classifier with weighted
//!   probability smoothing
//! - [`KNearestNeighbors`]: lazy distance-based classifier over numeric vectors
//! - [`FeatureTable`]: per-word, per-label counters used by the Bayes family
//! - [`TrainingSample`]: labeled text, loadable from JSON
//!
//! All three classifiers implement [`Persist`](crate::persist::Persist) and can
//! be saved to and restored from a model file.
//!
//! # Example
//!
//! ```
//! use textclass::classification::NaiveBayesClassifier;
//!
//! # fn main() -> textclass::error::Result<()> {
//! let mut classifier = NaiveBayesClassifier::new();
//! classifier.learn("great movie", "positive")?;
//! classifier.learn("terrible film", "negative")?;
//!
//! let result = classifier.classify("great")?;
//! assert_eq!(result.label, "positive");
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

pub mod distance;
pub mod feature_table;
pub mod intent;
pub mod knn;
pub mod naive_bayes;

pub use distance::DistanceMetric;
pub use feature_table::FeatureTable;
pub use intent::{IntentClassifier, IntentConfig};
pub use knn::{KNearestNeighbors, KnnConfig, TIE_DELIMITER};
pub use naive_bayes::{NaiveBayesClassifier, NaiveBayesConfig, ScoringRule};

/// The outcome of classifying one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Winning label.
    pub label: String,
    /// Score of the winning label. Its scale depends on the classifier.
    pub score: f64,
}

/// Training sample for the text classifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Document text.
    pub text: String,
    /// Label of the document.
    pub label: String,
}

impl TrainingSample {
    /// Create a new training sample.
    pub fn new<T: Into<String>, L: Into<String>>(text: T, label: L) -> Self {
        TrainingSample {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Load training samples from a JSON file holding an array of
/// `{"text": ..., "label": ...}` objects.
pub fn load_training_data<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingSample>> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).map_err(|e| ClassifierError::file(path, e))?;
    let samples: Vec<TrainingSample> = serde_json::from_str(&content)?;
    log::debug!("loaded {} training samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Reject empty labels before they reach any counter.
pub(crate) fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(ClassifierError::invalid_argument("label must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_training_data() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"text": "buy laptop", "label": "Transactional"}},
                {{"text": "what is rust", "label": "Informational"}}]"#
        )
        .unwrap();

        let samples = load_training_data(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0], TrainingSample::new("buy laptop", "Transactional"));
    }

    #[test]
    fn test_load_training_data_missing_file() {
        let err = load_training_data("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ClassifierError::File { .. }));
    }

    #[test]
    fn test_load_training_data_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_training_data(file.path()).unwrap_err();
        assert!(matches!(err, ClassifierError::Json(_)));
    }

    #[test]
    fn test_validate_label() {
        assert!(validate_label("spam").is_ok());
        assert!(matches!(
            validate_label(""),
            Err(ClassifierError::InvalidArgument(_))
        ));
    }
}
