//! Error types shared across the crate.

use std::io;

use thiserror::Error;

/// Failures surfaced by configuration loading, the issue cache and reporting.
///
/// Port traits keep returning boxed errors; this type is used once a
/// failure crosses into the library's own modules.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JirastatError {
    /// Configuration is missing, unreadable, or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request to the tracker failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The issue cache could not be read or written.
    #[error("Store error: {0}")]
    Store(String),

    /// A cassette could not be read, parsed, or written.
    #[error("Cassette error: {0}")]
    Cassette(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias using [`JirastatError`].
pub type Result<T> = std::result::Result<T, JirastatError>;
