//! NFL conference standings scraper
//!
//! Scrapes the AFC and NFC standings tables from a pro-football-reference
//! season index page into [`TeamStanding`] rows.

pub mod scraper;
pub mod store;
pub mod types;

pub use scraper::{parse_standings, PfrStandingsScraper};
pub use store::save_backend;
pub use types::{StandingsData, TeamStanding};

/// Table the standings are upserted into
pub const STANDINGS_TABLE: &str = "auto_nfl_team_stats";

/// One row per team and season
pub const STANDINGS_CONFLICT_KEY: &str = "team_name,season";
