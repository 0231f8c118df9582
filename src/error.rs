//! Error types for the Wakachi library.
//!
//! All errors are represented by the [`WakachiError`] enum. Configuration
//! problems are reported when a stage is constructed, never while tokens are
//! flowing through the pipeline.
//!
//! # Examples
//!
//! ```
//! use wakachi::error::{WakachiError, Result};
//!
//! fn build_stage(minimum_length: usize) -> Result<()> {
//!     if minimum_length < 2 {
//!         return Err(WakachiError::invalid_config(format!(
//!             "minimum_length must be >= 2, got {minimum_length}"
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(build_stage(1).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Wakachi operations.
///
/// This enum uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum WakachiError {
    /// I/O errors (reading configuration or fixture files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors raised by a morpheme source or tokenizer
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid stage configuration (bad option value, unknown option key, ...)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with WakachiError.
pub type Result<T> = std::result::Result<T, WakachiError>;

impl WakachiError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        WakachiError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        WakachiError::Configuration(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        WakachiError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WakachiError::Other(msg.into())
    }

    /// Returns true if this error was raised by invalid configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, WakachiError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = WakachiError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = WakachiError::invalid_config("minimum_length must be >= 2");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: minimum_length must be >= 2"
        );
        assert!(error.is_configuration());

        let error = WakachiError::invalid_argument("bad");
        assert_eq!(error.to_string(), "Error: Invalid argument: bad");
        assert!(!error.is_configuration());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wakachi_error = WakachiError::from(io_error);

        match wakachi_error {
            WakachiError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let wakachi_error = WakachiError::from(json_error);
        assert!(matches!(wakachi_error, WakachiError::Json(_)));
    }
}
