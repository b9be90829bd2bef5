//! Error types for the stats pipeline

use persistence::PersistenceError;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised by an [`ObservationSource`](crate::raw::ObservationSource)
#[derive(Error, Debug)]
pub enum FetchError {
    /// Upstream has no data for the season yet
    #[error("{season} data is not available yet, please try again later")]
    SeasonUnavailable { season: i32 },

    /// Upstream answered with a non-success status
    #[error("request to {url} failed with status {status}")]
    Http { status: u16, url: String },

    /// Connection, TLS or timeout failure
    #[error("network error: {0}")]
    Network(String),

    /// Payload could not be read into raw records
    #[error("failed to parse upstream data: {0}")]
    Parse(String),
}

/// Run-level errors. Each variant is fatal and maps to a non-zero exit.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Missing credentials or invalid settings, raised before any network activity
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching the season's weekly rows failed
    #[error("Error fetching data: {0}")]
    Fetch(#[from] FetchError),

    /// Unexpected failure while aggregating, selecting or building records
    #[error("Error processing data: {0}")]
    Transform(String),

    /// An upsert chunk failed; earlier chunks stay written
    #[error("Upload failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl PipelineError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new transform error
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }
}
