//! Error types for the textcat library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`TextcatError`] enum.
//!
//! # Examples
//!
//! ```
//! use textcat::error::{Result, TextcatError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TextcatError::analysis("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for textcat operations.
///
/// Missing probability data is never silently substituted: absence of a
/// *word* from the vocabulary is legitimate and ignored during scoring, but
/// absence of a category's prior or conditional table is surfaced as
/// [`TextcatError::CorruptModel`].
#[derive(Error, Debug)]
pub enum TextcatError {
    /// I/O errors (file operations etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Training was requested with no documents
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Scoring was requested against a model with no categories
    #[error("Untrained model: {0}")]
    UntrainedModel(String),

    /// Structurally invalid probability tables (zero prior, missing entry)
    #[error("Corrupt model: {0}")]
    CorruptModel(String),

    /// Persisted model missing required fields or unreadable
    #[error("Invalid model file: {0}")]
    InvalidModelFile(String),

    /// Label outside the known/expected category set
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Analysis-related errors (tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Dataset-related errors (malformed rows, bad split ratios)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TextcatError.
pub type Result<T> = std::result::Result<T, TextcatError>;

impl TextcatError {
    /// Create a new untrained-model error.
    pub fn untrained_model<S: Into<String>>(msg: S) -> Self {
        TextcatError::UntrainedModel(msg.into())
    }

    /// Create a new corrupt-model error.
    pub fn corrupt_model<S: Into<String>>(msg: S) -> Self {
        TextcatError::CorruptModel(msg.into())
    }

    /// Create a new invalid-model-file error.
    pub fn invalid_model_file<S: Into<String>>(msg: S) -> Self {
        TextcatError::InvalidModelFile(msg.into())
    }

    /// Create a new invalid-category error.
    pub fn invalid_category<S: Into<String>>(msg: S) -> Self {
        TextcatError::InvalidCategory(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TextcatError::Analysis(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        TextcatError::Dataset(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TextcatError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TextcatError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TextcatError::corrupt_model("missing prior");
        assert_eq!(error.to_string(), "Corrupt model: missing prior");

        let error = TextcatError::invalid_category("weather");
        assert_eq!(error.to_string(), "Invalid category: weather");

        let error = TextcatError::EmptyTrainingSet;
        assert_eq!(error.to_string(), "Training set is empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = TextcatError::from(io_error);

        match error {
            TextcatError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
