//! Local file-based upsert backend

use crate::backend::{merge_rows, UpsertBackend};
use crate::config::PersistenceConfig;
use crate::error::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Stores each table as a pretty-printed JSON array at `{data_dir}/{table}.json`
pub struct JsonFileBackend {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileBackend {
    /// Create a new file backend rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), write_lock: Mutex::new(()) }
    }

    /// Create a file backend from configuration
    pub fn from_config(config: &PersistenceConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    /// Path of a table file
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.data_dir.join(format!("{table}.json"))
    }

    /// Read a table; a missing file is an empty table
    pub async fn read_table(&self, table: &str) -> Result<Vec<Value>> {
        read_rows(&self.table_path(table)).await
    }
}

async fn read_rows(path: &Path) -> Result<Vec<Value>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait::async_trait]
impl UpsertBackend for JsonFileBackend {
    async fn upsert(&self, table: &str, rows: &[Value], on_conflict: &str) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        tokio::fs::create_dir_all(&self.data_dir).await?;

        let path = self.table_path(table);
        let mut existing = read_rows(&path).await?;
        merge_rows(&mut existing, rows, on_conflict)?;

        tokio::fs::write(&path, serde_json::to_string_pretty(&existing)?).await?;

        tracing::debug!("Wrote {} rows to {:?} ({} total)", rows.len(), path, existing.len());

        Ok(rows.len())
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_table_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path());
        assert!(backend.read_table("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("tables");

        let backend = JsonFileBackend::new(&data_dir);
        backend
            .upsert(
                "auto_nfl_team_stats",
                &[json!({"team_name": "Detroit Lions", "season": 2025, "wins": 3})],
                "team_name,season",
            )
            .await
            .unwrap();

        let reopened = JsonFileBackend::new(&data_dir);
        reopened
            .upsert(
                "auto_nfl_team_stats",
                &[
                    json!({"team_name": "Detroit Lions", "season": 2025, "wins": 4}),
                    json!({"team_name": "Detroit Lions", "season": 2024, "wins": 15}),
                ],
                "team_name,season",
            )
            .await
            .unwrap();

        let rows = reopened.read_table("auto_nfl_team_stats").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["wins"], 4);
        assert_eq!(rows[1]["season"], 2024);
        assert!(reopened.table_path("auto_nfl_team_stats").exists());
    }
}
