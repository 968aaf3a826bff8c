//! Error types for reward-curve
//!
//! Parse-level problems (malformed numbers, incomplete blocks) are not errors:
//! the parser drops them silently. Everything here is surfaced to the caller.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// reward-curve error types
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing left to plot after filtering
    #[error("no data available for plotting")]
    EmptyDataset,

    /// Chart backend failed while drawing or writing an artifact
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error (log file open/read, output write)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
