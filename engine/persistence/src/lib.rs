//! # Persistence Layer
//!
//! Insert-or-update storage for the stats tables produced by the loaders.
//!
//! ## Architecture
//!
//! - **UpsertBackend**: Abstract trait for different storage backends
//! - **RestBackend**: PostgREST (Supabase) tables over HTTP
//! - **JsonFileBackend**: Local JSON files, one per table
//! - **InMemoryBackend**: Process-local tables for tests and dry runs
//! - **upsert_in_chunks**: Sequential chunking in front of any backend
//!
//! ## Usage
//!
//! ```rust
//! use persistence::{upsert_in_chunks, InMemoryBackend};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryBackend::new();
//!     let rows = vec![json!({"player_id": "00-0034796", "passing_yards": 750})];
//!
//!     let summary = upsert_in_chunks(&backend, "player_stats_2025", &rows, "player_id", 500).await?;
//!     assert_eq!(summary.rows_written, 1);
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod batch;
pub mod config;
pub mod error;
pub mod local;
pub mod rest;

pub use backend::{conflict_key, InMemoryBackend, UpsertBackend};
pub use batch::{upsert_in_chunks, UpsertSummary};
pub use config::{PersistenceConfig, DEFAULT_CHUNK_SIZE, KEY_ENV_VARS, URL_ENV_VARS};
pub use error::{PersistenceError, Result};
pub use local::JsonFileBackend;
pub use rest::RestBackend;

/// Re-export common types for convenience
pub use serde_json::Value;
