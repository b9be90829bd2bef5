//! PostgREST (Supabase) upsert backend

use crate::backend::UpsertBackend;
use crate::config::PersistenceConfig;
use crate::error::{PersistenceError, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Upserts rows through a PostgREST `/rest/v1/{table}` endpoint
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    /// Create a new REST backend. Fails before any request when credentials are missing.
    pub fn new(config: &PersistenceConfig) -> Result<Self> {
        config.validate_rest().map_err(PersistenceError::config)?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Endpoint for a table
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[async_trait::async_trait]
impl UpsertBackend for RestBackend {
    async fn upsert(&self, table: &str, rows: &[Value], on_conflict: &str) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let url = self.table_url(table);
        debug!("Upserting {} rows into {} (on_conflict={})", rows.len(), url, on_conflict);

        let response = self
            .client
            .post(&url)
            .query(&[("on_conflict", on_conflict)])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(rows)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::Http { status: status.as_u16(), body });
        }

        Ok(rows.len())
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_credentials() {
        let result = RestBackend::new(&PersistenceConfig::default());
        assert!(matches!(result, Err(PersistenceError::Config(_))));
    }

    #[test]
    fn test_table_url() {
        let backend =
            RestBackend::new(&PersistenceConfig::rest("https://abc.supabase.co/", "key")).unwrap();
        assert_eq!(
            backend.table_url("player_stats_2025"),
            "https://abc.supabase.co/rest/v1/player_stats_2025"
        );
    }
}
