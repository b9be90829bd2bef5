//! Error types for the persistence layer

use thiserror::Error;

/// Result type alias for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Errors that can occur in the persistence layer
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O errors (local table files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure talking to the REST endpoint
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// REST endpoint rejected the request
    #[error("Upsert rejected with status {status}: {body}")]
    Http { status: u16, body: String },

    /// A row lacks one of the conflict columns
    #[error("Row is missing conflict column '{column}'")]
    MissingConflictKey { column: String },

    /// A chunk failed; the `rows_written` rows of earlier chunks are not rolled back
    #[error("Chunk {chunk_index} failed after {rows_written} rows were written: {source}")]
    ChunkFailed {
        chunk_index: usize,
        rows_written: usize,
        #[source]
        source: Box<PersistenceError>,
    },

    /// Invalid operation for current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl PersistenceError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid operation error
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }
}
