//! Unified error types for Sidekick.
//!
//! This module provides a single error enum that the rest of the application
//! converts into. Protocol-level failures (malformed URIs, unknown actions)
//! deliberately do not surface here: the dispatcher and classifier degrade to
//! no-ops instead of returning errors.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Base error type for all Sidekick errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Singleton election and activation-channel errors.
    #[error("IPC error: {0}")]
    Ipc(String),

    /// Ingestion pipeline errors.
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Clipboard access errors.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid arguments provided.
    #[error("{0}")]
    InvalidArguments(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }

    /// Creates an IPC error.
    pub fn ipc(msg: impl Into<String>) -> Self { Self::Ipc(msg.into()) }

    /// Creates an ingestion error.
    pub fn ingest(msg: impl Into<String>) -> Self { Self::Ingest(msg.into()) }

    /// Creates a clipboard error.
    pub fn clipboard(msg: impl Into<String>) -> Self { Self::Clipboard(msg.into()) }

    /// Creates an invalid arguments error.
    pub fn invalid_args(msg: impl Into<String>) -> Self { Self::InvalidArguments(msg.into()) }

    /// Creates a generic error.
    pub fn other(msg: impl Into<String>) -> Self { Self::Other(msg.into()) }
}

impl From<String> for Error {
    fn from(msg: String) -> Self { Self::Other(msg) }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self { Self::Other(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("Invalid JSON");
        assert_eq!(err.to_string(), "Configuration error: Invalid JSON");
    }

    #[test]
    fn test_ipc_error_display() {
        let err = Error::ipc("primary endpoint not reachable");
        assert!(err.to_string().contains("IPC error"));
        assert!(err.to_string().contains("primary endpoint not reachable"));
    }

    #[test]
    fn test_error_from_string() {
        let err: Error = "test error".into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
