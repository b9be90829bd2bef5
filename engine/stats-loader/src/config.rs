//! Loader configuration management

use persistence::{PersistenceConfig, KEY_ENV_VARS, URL_ENV_VARS};
use serde::{Deserialize, Serialize};
use stats_pipeline::{GroupingKey, PipelineConfig, PipelineError};
use std::path::PathBuf;
use weekly_stats_fetcher::FetcherConfig;

/// Main loader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Pipeline stage configuration (season, window, caps)
    pub pipeline: PipelineConfig,

    /// Upsert endpoint and chunking
    pub persistence: PersistenceConfig,

    /// Upstream weekly stats source
    pub fetcher: FetcherConfig,

    /// Explicit table name; defaults to `player_stats_<season>`
    pub table: Option<String>,

    /// Transform only, never persist
    pub dry_run: bool,

    /// Write tables as JSON files here instead of the REST endpoint
    pub local_dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

impl LoggingConfig {
    /// Load logging configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("STATS_LOG_LEVEL") {
            config.level = level;
        }

        if let Ok(format) = std::env::var("STATS_LOG_FORMAT") {
            config.format = format;
        }

        config
    }
}

impl LoaderConfig {
    /// Load configuration from environment variables (call `dotenv` first)
    pub fn from_env() -> Result<Self, PipelineError> {
        let fetcher = FetcherConfig::from_env().map_err(|e| PipelineError::config(e.to_string()))?;
        Self::from_lookup(|name| std::env::var(name).ok(), fetcher)
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F, fetcher: FetcherConfig) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut pipeline = PipelineConfig::default();

        if let Some(season) = lookup("STATS_SEASON") {
            pipeline.season = season
                .trim()
                .parse()
                .map_err(|_| PipelineError::config(format!("STATS_SEASON is not a valid season: '{season}'")))?;
        }

        if let Some(window) = lookup("STATS_TRAILING_WINDOW") {
            pipeline.trailing_window = window.trim().parse().map_err(|_| {
                PipelineError::config(format!("STATS_TRAILING_WINDOW is not a valid week count: '{window}'"))
            })?;
        }

        if let Some(grouping) = lookup("STATS_TRAILING_GROUPING") {
            pipeline.trailing_grouping = parse_grouping(&grouping)?;
        }

        let persistence = PersistenceConfig::from_lookup(&lookup);
        let table = lookup("PLAYER_STATS_TABLE").filter(|t| !t.trim().is_empty());

        Ok(Self { pipeline, persistence, fetcher, table, dry_run: false, local_dir: None })
    }

    /// Apply command line overrides
    pub fn apply_overrides(
        &mut self,
        season: Option<i32>,
        table: Option<String>,
        chunk_size: Option<usize>,
        dry_run: bool,
        local_dir: Option<PathBuf>,
    ) {
        if let Some(season) = season {
            self.pipeline.season = season;
        }
        if table.is_some() {
            self.table = table;
        }
        if let Some(chunk_size) = chunk_size {
            self.persistence.chunk_size = chunk_size;
        }
        if local_dir.is_some() {
            self.local_dir = local_dir;
        }
        self.dry_run |= dry_run;
    }

    /// Target table name
    pub fn table_name(&self) -> String {
        self.table.clone().unwrap_or_else(|| format!("player_stats_{}", self.pipeline.season))
    }

    /// Validate everything the run needs before any network activity
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.pipeline.validate()?;
        self.persistence.validate().map_err(PipelineError::Config)?;

        if self.dry_run || self.local_dir.is_some() {
            return Ok(());
        }

        self.persistence.validate_rest().map_err(|e| {
            PipelineError::config(format!(
                "{e}: set one of {} and one of {}",
                URL_ENV_VARS.join("/"),
                KEY_ENV_VARS.join("/")
            ))
        })
    }
}

fn parse_grouping(value: &str) -> Result<GroupingKey, PipelineError> {
    match value.trim().to_lowercase().as_str() {
        "player_id" => Ok(GroupingKey::PlayerId),
        "identity" => Ok(GroupingKey::Identity),
        other => Err(PipelineError::config(format!(
            "STATS_TRAILING_GROUPING must be 'player_id' or 'identity', got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<LoaderConfig, PipelineError> {
        let env: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        LoaderConfig::from_lookup(|name| env.get(name).cloned(), FetcherConfig::default())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.pipeline.season, 2025);
        assert_eq!(config.table_name(), "player_stats_2025");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let config = load(&[("SUPABASE_URL", "https://example.supabase.co")]).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(err.to_string().contains("SUPABASE_SERVICE_ROLE_KEY"));
    }

    #[test]
    fn test_dry_run_needs_no_credentials() {
        let mut config = load(&[]).unwrap();
        config.apply_overrides(None, None, None, true, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fallback_credentials_accepted() {
        let config = load(&[
            ("NEXT_PUBLIC_SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_and_overrides() {
        let mut config = load(&[
            ("STATS_SEASON", "2024"),
            ("PLAYER_STATS_TABLE", "weekly_player_stats"),
            ("STATS_TRAILING_GROUPING", "identity"),
        ])
        .unwrap();

        assert_eq!(config.pipeline.season, 2024);
        assert_eq!(config.pipeline.trailing_grouping, GroupingKey::Identity);
        assert_eq!(config.table_name(), "weekly_player_stats");

        config.apply_overrides(Some(2023), Some("override".to_string()), Some(100), false, None);
        assert_eq!(config.pipeline.season, 2023);
        assert_eq!(config.table_name(), "override");
        assert_eq!(config.persistence.chunk_size, 100);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(load(&[("STATS_SEASON", "twenty")]), Err(PipelineError::Config(_))));
        assert!(matches!(load(&[("STATS_TRAILING_GROUPING", "team")]), Err(PipelineError::Config(_))));

        let mut config = load(&[]).unwrap();
        config.apply_overrides(None, None, Some(0), true, None);
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }
}
