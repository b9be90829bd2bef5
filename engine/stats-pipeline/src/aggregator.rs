//! Season totals and per-game rates

use crate::coerce::per_game;
use crate::models::{AggregatedPlayer, Observation, PlayerKey, StatLine};
use std::collections::BTreeMap;
use tracing::debug;

/// Sum observations per (player id, name, position, team).
///
/// A player who changes team or position mid-season produces one row per
/// tuple. `games_played` counts contributing weekly rows. Output is ordered
/// by the identity tuple.
pub fn aggregate_season_totals(observations: &[Observation]) -> Vec<AggregatedPlayer> {
    let mut groups: BTreeMap<PlayerKey, (StatLine, u32)> = BTreeMap::new();

    for obs in observations {
        let (totals, games) = groups.entry(obs.key()).or_default();
        totals.accumulate(&obs.stats);
        *games += 1;
    }

    let aggregated: Vec<AggregatedPlayer> = groups
        .into_iter()
        .map(|(key, (totals, games_played))| build_aggregate(key, totals, games_played))
        .collect();

    debug!("Aggregated {} observations into {} player rows", observations.len(), aggregated.len());

    aggregated
}

/// Attach per-game rates to a set of totals
pub fn build_aggregate(key: PlayerKey, totals: StatLine, games_played: u32) -> AggregatedPlayer {
    AggregatedPlayer {
        passing_yards_per_game: per_game(totals.passing_yards, games_played),
        rushing_yards_per_game: per_game(totals.rushing_yards, games_played),
        receiving_yards_per_game: per_game(totals.receiving_yards, games_played),
        key,
        totals,
        games_played,
    }
}
