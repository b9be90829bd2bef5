//! Sequential chunked upserts

use crate::backend::UpsertBackend;
use crate::error::{PersistenceError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

/// Outcome of a chunked upsert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpsertSummary {
    pub table: String,
    pub rows_written: usize,
    pub chunks_written: usize,
}

/// Upsert `rows` in sequential chunks of at most `chunk_size`.
///
/// Stops at the first failing chunk. Chunks already written stay written.
pub async fn upsert_in_chunks(
    backend: &dyn UpsertBackend,
    table: &str,
    rows: &[Value],
    on_conflict: &str,
    chunk_size: usize,
) -> Result<UpsertSummary> {
    if chunk_size == 0 {
        return Err(PersistenceError::config("chunk_size must be greater than 0"));
    }

    let mut summary = UpsertSummary { table: table.to_string(), ..Default::default() };

    if rows.is_empty() {
        info!("No records to upload to {}", table);
        return Ok(summary);
    }

    for (chunk_index, chunk) in rows.chunks(chunk_size).enumerate() {
        match backend.upsert(table, chunk, on_conflict).await {
            Ok(written) => {
                summary.rows_written += written;
                summary.chunks_written += 1;
            }
            Err(e) => {
                error!(
                    "Upsert chunk {} ({} rows) into {} via {} failed: {}",
                    chunk_index,
                    chunk.len(),
                    table,
                    backend.name(),
                    e
                );
                return Err(PersistenceError::ChunkFailed {
                    chunk_index,
                    rows_written: summary.rows_written,
                    source: Box::new(e),
                });
            }
        }
    }

    info!(
        "Upserted {} rows into {} in {} chunks via {}",
        summary.rows_written,
        table,
        summary.chunks_written,
        backend.name()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use serde_json::json;

    fn rows(count: usize) -> Vec<Value> {
        (0..count).map(|i| json!({"player_id": format!("P{i}"), "targets": i})).collect()
    }

    #[tokio::test]
    async fn test_splits_into_chunks() {
        let backend = InMemoryBackend::new();

        let summary = upsert_in_chunks(&backend, "stats", &rows(1201), "player_id", 500).await.unwrap();

        assert_eq!(summary.rows_written, 1201);
        assert_eq!(summary.chunks_written, 3);
        assert_eq!(backend.upsert_calls().await, vec![500, 500, 201]);
        assert_eq!(backend.rows("stats").await.len(), 1201);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let backend = InMemoryBackend::new();
        let summary = upsert_in_chunks(&backend, "stats", &[], "player_id", 500).await.unwrap();
        assert_eq!(summary.rows_written, 0);
        assert!(backend.upsert_calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_chunks() {
        let backend = InMemoryBackend::failing_on_call(1);

        let err = upsert_in_chunks(&backend, "stats", &rows(12), "player_id", 5).await.unwrap_err();

        match err {
            PersistenceError::ChunkFailed { chunk_index, rows_written, .. } => {
                assert_eq!(chunk_index, 1);
                assert_eq!(rows_written, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(backend.rows("stats").await.len(), 5);
        assert_eq!(backend.upsert_calls().await, vec![5, 5]);
    }

    #[tokio::test]
    async fn test_zero_chunk_size_rejected() {
        let backend = InMemoryBackend::new();
        let result = upsert_in_chunks(&backend, "stats", &rows(1), "player_id", 0).await;
        assert!(matches!(result, Err(PersistenceError::Config(_))));
    }
}
