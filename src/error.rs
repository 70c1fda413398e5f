//! Error types for the Morphkit library.
//!
//! All fallible operations return [`Result`], whose error type is
//! [`MorphkitError`]. The variants follow four families:
//!
//! - configuration errors (`Config`) raised before the engine is touched,
//! - type errors (`Type`) for input elements that are not text,
//! - engine errors (`Engine`, `Dictionary`, `Io`, `Anyhow`) surfaced from the
//!   build, analysis and dictionary capabilities,
//! - range errors (`NotFound`) for morpheme id lookups.
//!
//! # Examples
//!
//! ```
//! use morphkit::error::{MorphkitError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(MorphkitError::config("top_n must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Morphkit operations.
#[derive(Error, Debug)]
pub enum MorphkitError {
    /// I/O errors (dictionary files, model directories, input lines)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration or argument detected before any engine call
    #[error("Configuration error: {0}")]
    Config(String),

    /// A non-textual element was found where text was required
    #[error("Type error: {0}")]
    Type(String),

    /// Failure reported by the build or analysis capability
    #[error("Engine error: {0}")]
    Engine(String),

    /// Malformed user dictionary content
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Lookup of an identifier that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MorphkitError.
pub type Result<T> = std::result::Result<T, MorphkitError>;

impl MorphkitError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MorphkitError::Config(msg.into())
    }

    /// Create a new type-mismatch error.
    pub fn type_mismatch<S: Into<String>>(msg: S) -> Self {
        MorphkitError::Type(msg.into())
    }

    /// Create a new engine error.
    pub fn engine<S: Into<String>>(msg: S) -> Self {
        MorphkitError::Engine(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        MorphkitError::Dictionary(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        MorphkitError::NotFound(msg.into())
    }

    /// Whether this error belongs to the configuration family.
    pub fn is_config(&self) -> bool {
        matches!(self, MorphkitError::Config(_))
    }

    /// Whether this error reports a non-textual input.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, MorphkitError::Type(_))
    }

    /// Whether this error reports a missing morpheme or entry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MorphkitError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = MorphkitError::config("unknown tag 'XYZ'");
        assert_eq!(error.to_string(), "Configuration error: unknown tag 'XYZ'");
        assert!(error.is_config());

        let error = MorphkitError::type_mismatch("expected text");
        assert_eq!(error.to_string(), "Type error: expected text");
        assert!(error.is_type_mismatch());

        let error = MorphkitError::not_found("morpheme id 99");
        assert_eq!(error.to_string(), "Not found: morpheme id 99");
        assert!(error.is_not_found());
        assert!(!error.is_config());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = MorphkitError::from(io_error);

        match error {
            MorphkitError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
