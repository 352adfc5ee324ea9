//! Error types for the esgdoc library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`EsgdocError`] enum. The variants fall into two groups:
//!
//! - fatal errors ([`EsgdocError::Configuration`], model and I/O failures
//!   at startup) which abort a batch before any document is processed;
//! - per-document errors ([`EsgdocError::MissingCompanion`],
//!   [`EsgdocError::ClassificationFailed`]) which the batch driver records
//!   and moves past.
//!
//! # Examples
//!
//! ```
//! use esgdoc::error::{EsgdocError, Result};
//!
//! fn open_batch(dir_is_valid: bool) -> Result<()> {
//!     if !dir_is_valid {
//!         return Err(EsgdocError::configuration("not a directory"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(open_batch(false).is_err());
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for esgdoc operations.
#[derive(Error, Debug)]
pub enum EsgdocError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary model serialization errors
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Invalid run configuration (bad directory, unusable model, mismatched schema)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A PDF without a readable companion text file
    #[error("Missing companion text for {file}: {}", companion.display())]
    MissingCompanion { file: String, companion: PathBuf },

    /// The classifier could not produce a prediction for a document
    #[error("Classification failed for {file}: {reason}")]
    ClassificationFailed { file: String, reason: String },

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model artifact errors (invalid parameters, unknown features)
    #[error("Model error: {0}")]
    Model(String),

    /// Instance does not fit the model schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with EsgdocError.
pub type Result<T> = std::result::Result<T, EsgdocError>;

impl EsgdocError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        EsgdocError::Configuration(msg.into())
    }

    /// Create a new missing companion error.
    pub fn missing_companion<S: Into<String>>(file: S, companion: PathBuf) -> Self {
        EsgdocError::MissingCompanion {
            file: file.into(),
            companion,
        }
    }

    /// Create a new classification failure.
    pub fn classification_failed<F: Into<String>, R: Into<String>>(file: F, reason: R) -> Self {
        EsgdocError::ClassificationFailed {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        EsgdocError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        EsgdocError::Model(msg.into())
    }

    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        EsgdocError::Schema(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        EsgdocError::Other(msg.into())
    }

    /// Whether a batch can continue after this error.
    ///
    /// Only per-document errors are recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EsgdocError::MissingCompanion { .. } | EsgdocError::ClassificationFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = EsgdocError::configuration("not a directory: /tmp/x.pdf");
        assert_eq!(
            error.to_string(),
            "Configuration error: not a directory: /tmp/x.pdf"
        );

        let error = EsgdocError::classification_failed("a.pdf", "empty distribution");
        assert_eq!(
            error.to_string(),
            "Classification failed for a.pdf: empty distribution"
        );

        let error = EsgdocError::missing_companion("b.pdf", PathBuf::from("/docs/b.txt"));
        assert_eq!(
            error.to_string(),
            "Missing companion text for b.pdf: /docs/b.txt"
        );
    }

    #[test]
    fn test_recoverable_variants() {
        assert!(EsgdocError::classification_failed("a.pdf", "x").is_recoverable());
        assert!(EsgdocError::missing_companion("a.pdf", PathBuf::from("a.txt")).is_recoverable());
        assert!(!EsgdocError::configuration("x").is_recoverable());
        assert!(!EsgdocError::model("x").is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = EsgdocError::from(io_error);

        match error {
            EsgdocError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
