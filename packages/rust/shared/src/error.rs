//! Error types for the patch tracker.
//!
//! Library crates use [`PatchTrackerError`] and [`FetchError`] via `thiserror`.
//! The CLI wraps these with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Failure of the single page fetch. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// DNS, connection, TLS, or body transfer failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Top-level error type for all patch tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum PatchTrackerError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The page fetch failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid user input (URL, archive year/month, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PatchTrackerError>;

impl PatchTrackerError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
