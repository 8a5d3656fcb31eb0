//! Vectorizers turn text into fixed-length numeric feature vectors.
//!
//! They bridge text into the [`KNearestNeighbors`](crate::classification::knn::KNearestNeighbors)
//! classifier, which only understands `Vec<f64>`. A vectorizer is fitted on a
//! corpus once; afterwards every call to [`Vectorizer::transform`] returns a
//! vector of length [`Vectorizer::dimension`].

use crate::error::Result;

pub mod tfidf;
pub mod word_count;

pub use tfidf::TfIdfVectorizer;
pub use word_count::WordCountVectorizer;

/// Capability that maps text to a fixed-length numeric vector.
pub trait Vectorizer: Send + Sync {
    /// Fit the vocabulary on training documents, replacing any previous fit.
    fn fit(&mut self, documents: &[String]) -> Result<()>;

    /// Transform a document into a feature vector of length `dimension()`.
    fn transform(&self, document: &str) -> Result<Vec<f64>>;

    /// Length of the vectors produced by `transform`.
    fn dimension(&self) -> usize;

    /// Transform several documents at once.
    fn transform_batch(&self, documents: &[String]) -> Result<Vec<Vec<f64>>> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }
}
