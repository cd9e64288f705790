//! Error types for runtime detection and installation.
//!
//! This module defines [`RuntimeError`], the error type returned by every
//! fallible operation in the crate, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - "Not installed" is `None`, never an error
//! - An installer that runs and exits non-zero is `Ok(false)`, never an error
//! - Everything else is returned to the caller without local recovery

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for runtime operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A string could not be prepared for a native call.
    #[error("Cannot encode {what} for a native call: it contains an interior NUL")]
    Encoding { what: String },

    /// The version comparator returned an unexpected value or failed.
    #[error("Failed to compare versions '{installed}' and '{required}': {detail}")]
    ComparisonFault {
        installed: String,
        required: String,
        detail: String,
    },

    /// Fetching the bootstrapper failed.
    #[error("Failed to download {url}: {message}")]
    Network { url: String, message: String },

    /// The temp file could not be created, written or closed.
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The downloaded installer could not be started.
    #[error("Failed to launch {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The downloaded payload did not match the configured digest.
    #[error("Downloaded installer digest mismatch: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    /// The settings file could not be read or parsed.
    #[error("Invalid configuration at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RuntimeError {
    /// Build a filesystem error for `path`.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from preparing a string for a native call.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding { .. })
    }
}

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
