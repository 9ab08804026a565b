//! Error types for DGA diagnostics.

use std::io;
use thiserror::Error;

use crate::units::UnitFamily;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing samples or running a diagnostic chain.
///
/// A ratio or rate of change that cannot be computed is not an error: those
/// surface as `None` and the rule that needed them is skipped.
#[derive(Error, Debug)]
pub enum Error {
    /// A sample the algorithm structurally depends on is absent.
    #[error("missing required data: {0}")]
    MissingRequiredData(String),

    /// Conversion requested between units of different families.
    #[error("cannot convert {from:?} units to {to:?} units")]
    UnitFamilyMismatch {
        /// Family of the source unit.
        from: UnitFamily,
        /// Family of the requested unit.
        to: UnitFamily,
    },

    /// Malformed sample text.
    #[error("invalid sample '{input}': {message}")]
    Parse {
        /// Excerpt of the offending input.
        input: String,
        /// What went wrong.
        message: String,
    },

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    const EXCERPT_LEN: usize = 64;

    /// Builds a [`Error::Parse`] keeping only a short excerpt of the input.
    pub(crate) fn parse(input: &str, message: impl Into<String>) -> Self {
        let input = if input.chars().count() > Self::EXCERPT_LEN {
            let head: String = input.chars().take(Self::EXCERPT_LEN).collect();
            format!("{head}...")
        } else {
            input.to_string()
        };
        Self::Parse { input, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnitFamilyMismatch { from: UnitFamily::Angle, to: UnitFamily::Volume };
        assert!(err.to_string().contains("Angle"));
        assert!(err.to_string().contains("Volume"));
    }

    #[test]
    fn test_parse_error_truncates_input() {
        let long = "x".repeat(500);
        let err = Error::parse(&long, "bad");
        match err {
            Error::Parse { input, message } => {
                assert_eq!(input.len(), 67);
                assert!(input.ends_with("..."));
                assert_eq!(message, "bad");
            }
            _ => panic!("Expected Parse"),
        }
    }

    #[test]
    fn test_missing_data_message() {
        let err = Error::MissingRequiredData("current sample".to_string());
        assert_eq!(err.to_string(), "missing required data: current sample");
    }
}
