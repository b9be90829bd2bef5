use stats_pipeline::normalizer::{stat_aliases, Normalizer, PLAYER_ID_ALIASES, TEAM_ALIASES};
use stats_pipeline::{config::DEFAULT_SEASON, RawRecord, Stat};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};
use weekly_stats_fetcher::{FetcherConfig, WeeklyStatsFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let season = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<i32>().ok())
        .unwrap_or(DEFAULT_SEASON);

    info!("Debugging weekly player stats for season {}", season);

    let config = FetcherConfig::from_env()?;
    let fetcher = WeeklyStatsFetcher::new(config)?;

    let body = fetcher.fetch_season_csv(season).await?;
    let records = weekly_stats_fetcher::parse_weekly_csv(body.as_bytes())?;
    info!("Fetched {} rows", records.len());

    let Some(first) = records.first() else {
        warn!("No rows returned for season {}", season);
        return Ok(());
    };

    let columns: BTreeSet<&str> = records.iter().flat_map(RawRecord::columns).collect();
    info!("Columns ({}): {:?}", columns.len(), columns);

    describe_resolution("player_id", first, PLAYER_ID_ALIASES);
    describe_resolution("team", first, TEAM_ALIASES);
    for stat in Stat::ALL {
        describe_resolution(stat.column(), first, stat_aliases(stat));
    }

    let normalizer = Normalizer::new(season);
    let batch = normalizer.normalize_all(&records);
    info!(
        "{} rows in season, {} rows from other seasons, {} rows without player id",
        batch.observations.len(),
        batch.dropped_other_season,
        batch.dropped_missing_id
    );

    let mut per_week: BTreeMap<u32, usize> = BTreeMap::new();
    for obs in &batch.observations {
        *per_week.entry(obs.week).or_default() += 1;
    }
    for (week, count) in per_week {
        info!("  Week {:>2}: {} rows", week, count);
    }

    info!("Debug completed!");
    Ok(())
}

fn describe_resolution(field: &str, record: &RawRecord, aliases: &[&str]) {
    match aliases.iter().find(|alias| record.contains(alias)) {
        Some(alias) => info!("  {:<22} <- {}", field, alias),
        None => warn!("  {:<22} <- (missing, defaults applied)", field),
    }
}
