//! Error types for the remote store client.

use thiserror::Error;

/// Errors that can occur when talking to the document store.
#[derive(Error, Debug)]
pub enum RemoteStoreError {
    /// Network failure or non-success status with no further detail
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// Document id unknown or expired
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Invalid store URL
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// Response could not be parsed
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for remote store operations.
pub type Result<T> = std::result::Result<T, RemoteStoreError>;
