//! Error types for the textclass library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`ClassifierError`]. All variants are recoverable at the call site.
//!
//! # Examples
//!
//! ```
//! use textclass::error::{ClassifierError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ClassifierError::invalid_argument("label must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for textclass operations.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// No label beat the probability floor (untrained classifier, empty query,
    /// or a query sharing no evidence with the training data).
    #[error("Not classified: {0}")]
    NotClassified(String),

    /// Two vectors that must have equal length did not.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A persisted model does not belong to the classifier trying to load it.
    #[error("Incompatible model: {0}")]
    IncompatibleModel(String),

    /// I/O errors without path context.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O errors tied to a specific file.
    #[error("I/O error on {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed model archive or metadata record.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Model payload encoding/decoding failures.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Caller contract violations.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with ClassifierError.
pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    /// Create a new not-classified error.
    pub fn not_classified<S: Into<String>>(msg: S) -> Self {
        ClassifierError::NotClassified(msg.into())
    }

    /// Create a new dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        ClassifierError::DimensionMismatch { expected, actual }
    }

    /// Create a new incompatible model error.
    pub fn incompatible_model<S: Into<String>>(msg: S) -> Self {
        ClassifierError::IncompatibleModel(msg.into())
    }

    /// Wrap an I/O error with the path it happened on.
    pub fn file<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        ClassifierError::File {
            path: path.into(),
            source,
        }
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Storage(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        ClassifierError::Serialization(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ClassifierError::InvalidArgument(msg.into())
    }


    /// Whether this error means "no label could be chosen".
    pub fn is_not_classified(&self) -> bool {
        matches!(self, ClassifierError::NotClassified(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = ClassifierError::not_classified("no categories");
        assert_eq!(error.to_string(), "Not classified: no categories");
        assert!(error.is_not_classified());

        let error = ClassifierError::dimension_mismatch(3, 2);
        assert_eq!(error.to_string(), "Dimension mismatch: expected 3, got 2");

        let error = ClassifierError::storage("archive is truncated");
        assert_eq!(error.to_string(), "Storage error: archive is truncated");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = ClassifierError::from(io_error);

        match error {
            ClassifierError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_file_error_mentions_path() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing");
        let error = ClassifierError::file("/tmp/model.txc", io_error);
        assert!(error.to_string().contains("/tmp/model.txc"));
        assert!(error.to_string().contains("missing"));
    }
}
