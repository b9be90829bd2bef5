//! Upsert backend trait and the in-memory implementation

use crate::error::{PersistenceError, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Abstract trait for upsert backends
#[async_trait::async_trait]
pub trait UpsertBackend: Send + Sync {
    /// Insert rows, updating any row whose `on_conflict` columns already exist.
    ///
    /// `on_conflict` is a comma-separated column list (e.g. "team_name,season").
    /// Returns the number of rows sent.
    async fn upsert(&self, table: &str, rows: &[Value], on_conflict: &str) -> Result<usize>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Key identifying a row under a comma-separated conflict column list
pub fn conflict_key(row: &Value, on_conflict: &str) -> Result<String> {
    let object = row
        .as_object()
        .ok_or_else(|| PersistenceError::invalid_operation("Rows must be JSON objects"))?;

    let mut parts = Vec::new();
    for column in on_conflict.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let value = object
            .get(column)
            .ok_or_else(|| PersistenceError::MissingConflictKey { column: column.to_string() })?;
        parts.push(value.to_string());
    }

    if parts.is_empty() {
        return Err(PersistenceError::config("on_conflict must name at least one column"));
    }

    Ok(parts.join("\u{1f}"))
}

/// Merge `incoming` into a table keyed by conflict key, preserving insertion order
pub(crate) fn merge_rows(
    table: &mut Vec<Value>,
    incoming: &[Value],
    on_conflict: &str,
) -> Result<()> {
    let mut index: HashMap<String, usize> = HashMap::new();
    for (position, row) in table.iter().enumerate() {
        index.insert(conflict_key(row, on_conflict)?, position);
    }

    for row in incoming {
        let key = conflict_key(row, on_conflict)?;
        match index.get(&key) {
            Some(&position) => merge_object(&mut table[position], row),
            None => {
                index.insert(key, table.len());
                table.push(row.clone());
            }
        }
    }

    Ok(())
}

fn merge_object(existing: &mut Value, incoming: &Value) {
    match (existing.as_object_mut(), incoming.as_object()) {
        (Some(target), Some(source)) => {
            for (column, value) in source {
                target.insert(column.clone(), value.clone());
            }
        }
        _ => *existing = incoming.clone(),
    }
}

/// In-memory upsert backend (for testing and dry runs)
#[derive(Default)]
pub struct InMemoryBackend {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    calls: Mutex<Vec<usize>>,
    fail_on_call: Option<usize>,
}

impl InMemoryBackend {
    /// Create a new in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose `call`-th upsert (0-based) fails with an HTTP 500
    pub fn failing_on_call(call: usize) -> Self {
        Self { fail_on_call: Some(call), ..Self::default() }
    }

    /// Current rows of a table
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.lock().await.get(table).cloned().unwrap_or_default()
    }

    /// Row count of each upsert call, in call order
    pub async fn upsert_calls(&self) -> Vec<usize> {
        self.calls.lock().await.clone()
    }

    /// Find a row by a column value
    pub async fn find(&self, table: &str, column: &str, value: &Value) -> Option<Map<String, Value>> {
        self.rows(table)
            .await
            .into_iter()
            .filter_map(|row| row.as_object().cloned())
            .find(|row| row.get(column) == Some(value))
    }
}

#[async_trait::async_trait]
impl UpsertBackend for InMemoryBackend {
    async fn upsert(&self, table: &str, rows: &[Value], on_conflict: &str) -> Result<usize> {
        let call = {
            let mut calls = self.calls.lock().await;
            calls.push(rows.len());
            calls.len() - 1
        };

        if self.fail_on_call == Some(call) {
            return Err(PersistenceError::Http {
                status: 500,
                body: "simulated failure".to_string(),
            });
        }

        let mut tables = self.tables.lock().await;
        merge_rows(tables.entry(table.to_string()).or_default(), rows, on_conflict)?;

        Ok(rows.len())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
