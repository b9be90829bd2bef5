use crate::config::FetcherConfig;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use stats_pipeline::{FetchError, ObservationSource, RawRecord};
use std::io::Read;
use std::time::Duration;
use tracing::{info, warn};

/// Fetches a season's weekly player stats CSV
pub struct WeeklyStatsFetcher {
    config: FetcherConfig,
    client: Client,
}

impl WeeklyStatsFetcher {
    /// Create a new fetcher instance
    pub fn new(config: FetcherConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// Download the raw CSV text for a season
    pub async fn fetch_season_csv(&self, season: i32) -> std::result::Result<String, FetchError> {
        let url = self.config.season_url(season);
        info!("Fetching weekly player stats for {} from: {}", season, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                warn!("No weekly stats published for {} yet", season);
                return Err(FetchError::SeasonUnavailable { season });
            }
            status => {
                return Err(FetchError::Http { status: status.as_u16(), url });
            }
        }

        let body = response.text().await.map_err(|e| FetchError::Network(e.to_string()))?;
        info!("Successfully fetched CSV ({} bytes)", body.len());

        Ok(body)
    }
}

#[async_trait::async_trait]
impl ObservationSource for WeeklyStatsFetcher {
    async fn fetch_season(&self, season: i32) -> std::result::Result<Vec<RawRecord>, FetchError> {
        let body = self.fetch_season_csv(season).await?;
        let records = parse_weekly_csv(body.as_bytes())?;

        if records.is_empty() {
            return Err(FetchError::SeasonUnavailable { season });
        }

        info!("Parsed {} weekly rows for {}", records.len(), season);
        Ok(records)
    }

    fn describe(&self) -> String {
        self.config.url_template.clone()
    }
}

/// Parse a weekly stats CSV into raw records keyed by header name.
///
/// Empty cells become nulls. Rows with more or fewer cells than the header
/// are rejected by the CSV reader.
pub fn parse_weekly_csv<R: Read>(rdr: R) -> std::result::Result<Vec<RawRecord>, FetchError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers().map_err(|e| FetchError::Parse(e.to_string()))?.clone();

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| FetchError::Parse(format!("row {}: {e}", line + 1)))?;

        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| {
                let value = if cell.trim().is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (header.trim().to_string(), value)
            })
            .collect();

        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stats_pipeline::normalizer::Normalizer;

    const FIXTURE: &str = "\
player_id,player_name,player_display_name,position,recent_team,season,week,completions,attempts,passing_yards,passing_tds,interceptions,carries,rushing_yards,rushing_tds,receptions,targets,receiving_yards,receiving_tds
00-0034796,L.Jackson,Lamar Jackson,QB,BAL,2025,1,14,19,209,2,0,7,70,1,0,0,0,0
00-0036900,J.Chase,Ja'Marr Chase,WR,CIN,2025,1,0,0,0,0,0,,,,5,9,26,0
";

    #[test]
    fn test_parse_weekly_csv() {
        let records = parse_weekly_csv(FIXTURE.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("player_id"), Some(&json!("00-0034796")));
        assert_eq!(records[0].get("passing_yards"), Some(&json!("209")));
        assert_eq!(records[1].get("carries"), Some(&Value::Null));
    }

    #[test]
    fn test_rows_normalize() {
        let records = parse_weekly_csv(FIXTURE.as_bytes()).unwrap();
        let normalizer = Normalizer::new(2025);

        let lamar = normalizer.normalize(&records[0]);
        assert_eq!(lamar.player_name, "L.Jackson");
        assert_eq!(lamar.team, "BAL");
        assert_eq!(lamar.week, 1);
        assert_eq!(lamar.stats.passing_attempts, 19.0);
        assert_eq!(lamar.stats.rushing_yards, 70.0);

        let chase = normalizer.normalize(&records[1]);
        assert_eq!(chase.stats.carries, 0.0);
        assert_eq!(chase.stats.targets, 9.0);
        assert!(normalizer.in_season(&records[1]));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let csv = "player_id,week\nA,1,extra\n";
        assert!(matches!(parse_weekly_csv(csv.as_bytes()), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_header_only_is_empty() {
        let records = parse_weekly_csv("player_id,week\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
