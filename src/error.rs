//! Error types for chart-sync

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a sync run
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing input combination
    #[error("configuration error: {0}")]
    Config(String),

    /// The requested release tag does not exist upstream
    #[error("release not found: {repo} has no release tagged {tag}")]
    ReleaseNotFound {
        /// Repository that was queried (`owner/name`)
        repo: String,
        /// Tag that was requested
        tag: String,
    },

    /// Non-success response from a read against the release registry
    #[error("{operation} failed: status {status} body: {body}")]
    Upstream {
        /// What was being fetched
        operation: String,
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Non-success response while publishing the proposal
    #[error("{operation} failed: status {status} response: {body}")]
    Submission {
        /// What was being submitted
        operation: String,
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// A local command (git, gh) failed
    #[error("`{command}` failed: {message}")]
    LocalExecution {
        /// Command line that was run
        command: String,
        /// Exit status and captured stderr
        message: String,
    },

    /// Reading or writing a chart artifact failed
    #[error("failed to update {}: {source}", path.display())]
    Chart {
        /// Artifact path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON in an API response
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for chart-sync operations
pub type Result<T> = std::result::Result<T, Error>;
