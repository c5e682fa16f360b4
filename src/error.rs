//! Error types for depcheck operations.
//!
//! This module defines [`DepcheckError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Only [`DepcheckError::MalformedRequirement`] escapes verification; missing
//!   packages and version mismatches become warnings instead
//! - Use `anyhow::Error` (via `DepcheckError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for depcheck operations.
#[derive(Debug, Error)]
pub enum DepcheckError {
    /// A requirement line could not be turned into a constraint.
    #[error("Malformed requirement on line {line} ('{text}'): {reason}")]
    MalformedRequirement {
        line: usize,
        text: String,
        reason: String,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for depcheck operations.
pub type Result<T> = std::result::Result<T, DepcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_requirement_displays_line_and_text() {
        let err = DepcheckError::MalformedRequirement {
            line: 3,
            text: "numpy>=1.x".into(),
            reason: "invalid version '1.x'".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("numpy>=1.x"));
        assert!(msg.contains("invalid version"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = DepcheckError::ConfigNotFound {
            path: PathBuf::from("/foo/depcheck.yml"),
        };
        assert!(err.to_string().contains("/foo/depcheck.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = DepcheckError::ConfigParseError {
            path: PathBuf::from("/depcheck.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/depcheck.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = DepcheckError::ConfigValidationError {
            message: "conflicting fields".into(),
        };
        assert!(err.to_string().contains("conflicting fields"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DepcheckError = io_err.into();
        assert!(matches!(err, DepcheckError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: DepcheckError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, DepcheckError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
