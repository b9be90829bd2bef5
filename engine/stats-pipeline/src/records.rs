//! Output record assembly

use crate::coerce::{safe_float, safe_int};
use crate::error::{PipelineError, Result};
use crate::models::{GroupId, OutputRecord, SelectionResult, TrailingAverage};
use serde_json::Value;
use std::collections::HashMap;

/// Left-join selections with trailing averages.
///
/// Every selection yields exactly one record. A selection with no trailing
/// average gets 0.0 for all three averages. Averages grouped by identity are
/// matched before averages grouped by player id.
pub fn build_records(
    selection: &[SelectionResult],
    trailing: &[TrailingAverage],
) -> Vec<OutputRecord> {
    let by_group: HashMap<&GroupId, &TrailingAverage> =
        trailing.iter().map(|avg| (&avg.group, avg)).collect();

    selection
        .iter()
        .map(|pick| {
            let key = &pick.player.key;
            let average = by_group
                .get(&GroupId::Identity(key.clone()))
                .or_else(|| by_group.get(&GroupId::Player(key.player_id.clone())))
                .copied();
            build_record(pick, average)
        })
        .collect()
}

fn build_record(pick: &SelectionResult, average: Option<&TrailingAverage>) -> OutputRecord {
    let player = &pick.player;
    let totals = &player.totals;
    let (passing_avg, rushing_avg, receiving_avg) = average
        .map(|avg| (avg.passing_avg, avg.rushing_avg, avg.receiving_avg))
        .unwrap_or((0.0, 0.0, 0.0));

    OutputRecord {
        player_id: player.key.player_id.clone(),
        player_name: player.key.player_name.clone(),
        position: player.key.position.clone(),
        team: Some(player.key.team.clone()).filter(|team| !team.is_empty()),
        games_played: i64::from(player.games_played),
        passing_attempts: safe_int(totals.passing_attempts),
        passing_completions: safe_int(totals.passing_completions),
        passing_yards: safe_int(totals.passing_yards),
        passing_tds: safe_int(totals.passing_tds),
        passing_interceptions: safe_int(totals.passing_interceptions),
        carries: safe_int(totals.carries),
        rushing_yards: safe_int(totals.rushing_yards),
        rushing_tds: safe_int(totals.rushing_tds),
        targets: safe_int(totals.targets),
        receptions: safe_int(totals.receptions),
        receiving_yards: safe_int(totals.receiving_yards),
        receiving_tds: safe_int(totals.receiving_tds),
        passing_yards_per_game: safe_float(player.passing_yards_per_game),
        rushing_yards_per_game: safe_float(player.rushing_yards_per_game),
        receiving_yards_per_game: safe_float(player.receiving_yards_per_game),
        last_3_games_rushing_avg: safe_float(rushing_avg),
        last_3_games_receiving_avg: safe_float(receiving_avg),
        last_3_games_passing_avg: safe_float(passing_avg),
    }
}

/// Serialize records into the key-value rows the persistence layer accepts
pub fn to_rows(records: &[OutputRecord]) -> Result<Vec<Value>> {
    records
        .iter()
        .map(|record| {
            serde_json::to_value(record).map_err(|e| {
                PipelineError::transform(format!(
                    "Failed to serialize record for player {}: {e}",
                    record.player_id
                ))
            })
        })
        .collect()
}
