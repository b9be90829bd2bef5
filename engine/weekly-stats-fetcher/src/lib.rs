//! Weekly Stats Fetcher
//!
//! Downloads the nflverse weekly player stats release for a season and
//! exposes each CSV row as a [`RawRecord`](stats_pipeline::RawRecord) for the
//! stats pipeline.

pub mod config;
pub mod fetcher;

pub use config::FetcherConfig;
pub use fetcher::{parse_weekly_csv, WeeklyStatsFetcher};
