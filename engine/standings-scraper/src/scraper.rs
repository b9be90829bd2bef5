use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use stats_pipeline::coerce::{text_to_f64, text_to_i64};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::types::{StandingsData, TeamStanding, CONFERENCES};

/// Pro Football Reference standings scraper
pub struct PfrStandingsScraper {
    client: Client,
    base_url: String,
}

impl PfrStandingsScraper {
    /// Create a new standings scraper
    pub fn new() -> Result<Self> {
        Self::with_base_url("https://www.pro-football-reference.com")
    }

    /// Create a scraper against a different host
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    /// Season index page holding both conference tables
    pub fn standings_url(&self, season: i32) -> String {
        format!("{}/years/{season}/index.htm", self.base_url)
    }

    /// Scrape both conference standings tables for a season
    pub async fn scrape_standings(&self, season: i32) -> Result<StandingsData> {
        let url = self.standings_url(season);
        info!("Fetching {} NFL standings from: {}", season, url);

        let response = self.client.get(&url).send().await.context("Failed to fetch standings page")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP request failed with status: {}", response.status());
        }

        let html = response.text().await.context("Failed to read response body")?;
        info!("Successfully fetched HTML ({} bytes)", html.len());

        let data = parse_standings(&html, season)?;
        info!(
            "Successfully parsed {} teams (AFC: {}, NFC: {})",
            data.teams.len(),
            data.conference("AFC").len(),
            data.conference("NFC").len()
        );

        Ok(data)
    }
}

/// Parse the AFC and NFC standings tables out of a season index page.
///
/// A missing conference table is logged and skipped.
pub fn parse_standings(html: &str, season: i32) -> Result<StandingsData> {
    let document = Html::parse_document(html);
    let selectors = RowSelectors::new()?;

    let mut data = StandingsData::new(season);

    for conference in CONFERENCES {
        let table_selector = selector(&format!("table#{conference}"))?;

        match document.select(&table_selector).next() {
            Some(table) => {
                let teams = parse_conference(&table, conference, season, &selectors);
                debug!("Parsed {} {} teams", teams.len(), conference);
                data.teams.extend(teams);
            }
            None => warn!("{} table not found", conference),
        }
    }

    Ok(data)
}

struct RowSelectors {
    rows: Selector,
    division: Selector,
    team: Selector,
    cells: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            rows: selector("tbody > tr")?,
            division: selector("td[data-stat=\"onecell\"]")?,
            team: selector("th[data-stat=\"team\"]")?,
            cells: selector("td[data-stat]")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Failed to create selector '{}': {}", css, e))
}

/// Walk one conference table. Division header rows set the division for the
/// team rows that follow.
fn parse_conference(
    table: &ElementRef,
    conference: &str,
    season: i32,
    selectors: &RowSelectors,
) -> Vec<TeamStanding> {
    let mut teams = Vec::new();
    let mut current_division = String::new();

    for row in table.select(&selectors.rows) {
        if is_division_header(&row) {
            if let Some(cell) = row.select(&selectors.division).next() {
                current_division = cell_text(&cell);
            }
            continue;
        }

        let Some(team_cell) = row.select(&selectors.team).next() else {
            continue;
        };

        let raw_name = cell_text(&team_cell);
        let stats: HashMap<&str, String> = row
            .select(&selectors.cells)
            .filter_map(|td| td.value().attr("data-stat").map(|stat| (stat, cell_text(&td))))
            .collect();

        let int = |stat: &str| stats.get(stat).map(|v| text_to_i64(v)).unwrap_or(0);
        let float = |stat: &str| stats.get(stat).map(|v| text_to_f64(v)).unwrap_or(0.0);

        let team = TeamStanding {
            team_name: raw_name.trim_end_matches(['*', '+']).trim().to_string(),
            conference: conference.to_string(),
            division: current_division.clone(),
            season,
            is_division_leader: raw_name.contains('*'),
            is_wildcard: raw_name.contains('+'),
            wins: int("wins"),
            losses: int("losses"),
            ties: int("ties"),
            win_percentage: float("win_loss_perc"),
            points_for: int("points"),
            points_against: int("points_opp"),
            point_differential: int("points_diff"),
            margin_of_victory: float("mov"),
            strength_of_schedule: float("sos_total"),
            srs: float("srs_total"),
            offensive_srs: float("srs_offense"),
            defensive_srs: float("srs_defense"),
        };

        debug!("{} - {}: {} ({}-{})", conference, team.division, team.team_name, team.wins, team.losses);
        teams.push(team);
    }

    teams
}

fn is_division_header(row: &ElementRef) -> bool {
    let classes: Vec<&str> = row.value().classes().collect();
    classes.contains(&"thead") && classes.contains(&"onecell")
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
