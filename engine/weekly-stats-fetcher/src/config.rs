use serde::{Deserialize, Serialize};

/// nflverse weekly player stats release asset
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://github.com/nflverse/nflverse-data/releases/download/player_stats/player_stats_{season}.csv";

/// Configuration for the weekly stats fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Source URL; `{season}` is replaced with the target season
    pub url_template: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout_secs: 60,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36".to_string(),
        }
    }
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(template) = std::env::var("WEEKLY_STATS_URL_TEMPLATE") {
            config.url_template = template;
        }

        if let Ok(timeout) = std::env::var("WEEKLY_STATS_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().unwrap_or(60);
        }

        config.validate()?;
        Ok(config)
    }

    /// Source URL for a season
    pub fn season_url(&self, season: i32) -> String {
        self.url_template.replace("{season}", &season.to_string())
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.url_template.contains("{season}") {
            anyhow::bail!("URL template must contain {{season}}: {}", self.url_template);
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_url() {
        let config = FetcherConfig::default();
        assert_eq!(
            config.season_url(2025),
            "https://github.com/nflverse/nflverse-data/releases/download/player_stats/player_stats_2025.csv"
        );
    }

    #[test]
    fn test_validate_requires_placeholder() {
        let config = FetcherConfig { url_template: "https://example.com/stats.csv".to_string(), ..Default::default() };
        assert!(config.validate().is_err());
        assert!(FetcherConfig::default().validate().is_ok());
    }
}
