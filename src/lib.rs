//! # textclass
//!
//! Statistical classifiers for short texts and numeric feature vectors.
//!
//! ## Features
//!
//! - Naive Bayes text classification with Laplace smoothing
//! - Thread-safe Bayes-style intent classification
//! - Weighted K-nearest-neighbours voting over numeric vectors
//! - Pluggable tokenizers and vectorizers
//! - Versioned, checksummed model files

pub mod analysis;
pub mod classification;
pub mod error;
pub mod persist;

pub mod prelude {
    pub use crate::analysis::tokenizer::{DefaultTokenizer, Tokenizer};
    pub use crate::classification::{
        Classification, DistanceMetric, IntentClassifier, KNearestNeighbors, KnnConfig,
        NaiveBayesClassifier,
    };
    pub use crate::error::{ClassifierError, Result};
    pub use crate::persist::Persist;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
