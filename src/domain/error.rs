//! Error types for the Lexikey plugin.
//!
//! This module defines two layers of errors: [`ApiError`], the normalized
//! failure shape produced at the fetch-client boundary, and [`LexikeyError`],
//! the crate-wide error type that wraps API failures alongside I/O, theme and
//! configuration problems. Both are implemented with the `thiserror` crate.

use thiserror::Error;

/// Fallback message used when a failure carries no usable message of its own.
pub const DEFAULT_FETCH_ERROR: &str = "an error occurred while fetching translation keys";

/// Normalized failure produced by the fetch client.
///
/// Every transport problem, non-success HTTP status and request deadline
/// expiry is folded into one of these variants before it leaves the API
/// layer. Callers can rely on [`ApiError::message`] always returning a
/// human-readable string, with `status`/`code` populated when the remote
/// side supplied them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a usable HTTP response.
    ///
    /// Covers connection failures, DNS problems and response bodies that
    /// could not be decoded despite a success status.
    #[error("network error: {message}")]
    Network {
        /// Human-readable description of the failure.
        message: String,
    },

    /// The remote API answered with a non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Message extracted from the error payload, or the fixed default.
        message: String,
        /// The HTTP status code of the response.
        status: u16,
        /// Machine-readable error code from the Directus error envelope.
        code: Option<String>,
    },

    /// The request did not complete within the configured deadline.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The deadline that expired, in milliseconds.
        timeout_ms: u64,
    },
}

impl ApiError {
    /// Returns the human-readable message for this failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Network { message } | Self::HttpStatus { message, .. } => message.clone(),
            Self::Timeout { .. } => self.to_string(),
        }
    }

    /// Returns the HTTP status code, when the failure carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the remote error code, when the failure carries one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// The main error type for Lexikey plugin operations.
///
/// Consolidates all error conditions that can occur during plugin execution,
/// from fetch failures to theme loading and configuration issues.
#[derive(Debug, Error)]
pub enum LexikeyError {
    /// A fetch against the translation-keys API failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Lexikey operations.
pub type Result<T> = std::result::Result<T, LexikeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_accessors() {
        let err = ApiError::HttpStatus {
            message: "Forbidden".to_string(),
            status: 403,
            code: Some("FORBIDDEN".to_string()),
        };
        assert_eq!(err.message(), "Forbidden");
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.code(), Some("FORBIDDEN"));
    }

    #[test]
    fn test_network_has_no_status_or_code() {
        let err = ApiError::Network {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.code(), None);
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn test_timeout_message_mentions_deadline() {
        let err = ApiError::Timeout { timeout_ms: 10_000 };
        assert!(err.message().contains("10000ms"));
        assert_eq!(err.status(), None);
    }
}
