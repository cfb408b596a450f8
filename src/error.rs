//! Error types for the tailwiz library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TailwizError`] enum.
//!
//! # Examples
//!
//! ```
//! use tailwiz::error::{Result, TailwizError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TailwizError::missing_column("text"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tailwiz operations.
#[derive(Error, Debug)]
pub enum TailwizError {
    /// I/O errors (reading tables or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from a table
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A label cell could not be interpreted as a label value
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// Invalid argument passed by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model training or inference errors
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TailwizError.
pub type Result<T> = std::result::Result<T, TailwizError>;

impl TailwizError {
    /// Create a new missing column error.
    pub fn missing_column<S: Into<String>>(column: S) -> Self {
        TailwizError::MissingColumn(column.into())
    }

    /// Create a new invalid label error.
    pub fn invalid_label<S: Into<String>>(msg: S) -> Self {
        TailwizError::InvalidLabel(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TailwizError::InvalidArgument(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TailwizError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        TailwizError::Model(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TailwizError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TailwizError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TailwizError::missing_column("text");
        assert_eq!(error.to_string(), "Missing column: text");

        let error = TailwizError::invalid_label("[1, 2]");
        assert_eq!(error.to_string(), "Invalid label: [1, 2]");

        let error = TailwizError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = TailwizError::from(io_error);

        match error {
            TailwizError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
