//! Raw row normalization
//!
//! Upstream column names drift between data releases, so every canonical
//! field is resolved through an ordered alias list. Normalization never
//! fails: unresolved identity fields become empty strings and unresolved or
//! unparseable statistics become zero.

use crate::coerce;
use crate::models::{Observation, Stat, StatLine};
use crate::raw::RawRecord;
use serde_json::Value;
use tracing::{debug, warn};

pub const PLAYER_ID_ALIASES: &[&str] = &["player_id", "gsis_id", "pfr_player_id"];
pub const PLAYER_NAME_ALIASES: &[&str] = &["player_name", "player_display_name", "player"];
pub const POSITION_ALIASES: &[&str] = &["position", "position_group", "pos"];
pub const TEAM_ALIASES: &[&str] = &["recent_team", "team", "club_code"];
pub const WEEK_ALIASES: &[&str] = &["week"];
pub const SEASON_ALIASES: &[&str] = &["season"];

/// Accepted source columns for a statistic, highest priority first
pub fn stat_aliases(stat: Stat) -> &'static [&'static str] {
    match stat {
        Stat::PassingAttempts => &["attempts", "pass_attempts", "att"],
        Stat::PassingCompletions => &["completions", "pass_completions", "cmp"],
        Stat::PassingYards => &["passing_yards", "pass_yards", "yds_pass", "pass_yds"],
        Stat::PassingTds => &["passing_tds", "pass_tds", "td_pass"],
        Stat::PassingInterceptions => &["interceptions", "int", "passing_interceptions"],
        Stat::Carries => &["carries", "rush_attempts", "rush_att"],
        Stat::RushingYards => &["rushing_yards", "rush_yards", "yds_rush", "rush_yds"],
        Stat::RushingTds => &["rushing_tds", "rush_tds", "td_rush"],
        Stat::Targets => &["targets", "rec_tgts"],
        Stat::Receptions => &["receptions", "rec"],
        Stat::ReceivingYards => &["receiving_yards", "rec_yards", "yds_rec", "rec_yds"],
        Stat::ReceivingTds => &["receiving_tds", "rec_tds", "td_rec"],
    }
}

/// Output of normalizing a batch of raw rows
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub observations: Vec<Observation>,
    /// Rows dropped because they belong to another season
    pub dropped_other_season: usize,
    /// Rows dropped because no player identifier resolved
    pub dropped_missing_id: usize,
}

/// Converts raw rows into [`Observation`]s for one target season
#[derive(Debug, Clone)]
pub struct Normalizer {
    season: i32,
}

impl Normalizer {
    pub fn new(season: i32) -> Self {
        Self { season }
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    /// Whether the row belongs to the target season.
    ///
    /// Rows without season metadata (absent, null or blank) are kept.
    pub fn in_season(&self, record: &RawRecord) -> bool {
        match record.resolve(SEASON_ALIASES) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) if s.trim().is_empty() => true,
            Some(value) => coerce::value_to_i64(Some(value)) == i64::from(self.season),
        }
    }

    /// Normalize a single row. Does not apply the season filter.
    pub fn normalize(&self, record: &RawRecord) -> Observation {
        let mut stats = StatLine::default();
        for stat in Stat::ALL {
            stats.set(stat, coerce::value_to_f64(record.resolve(stat_aliases(stat))));
        }

        Observation {
            player_id: coerce::value_to_string(record.resolve(PLAYER_ID_ALIASES)),
            player_name: coerce::value_to_string(record.resolve(PLAYER_NAME_ALIASES)),
            position: coerce::value_to_string(record.resolve(POSITION_ALIASES)),
            team: coerce::value_to_string(record.resolve(TEAM_ALIASES)),
            week: coerce::value_to_week(record.resolve(WEEK_ALIASES)),
            stats,
        }
    }

    /// Season-filter and normalize a batch of rows.
    ///
    /// Rows whose player identifier is empty after normalization are dropped.
    pub fn normalize_all(&self, records: &[RawRecord]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();

        for record in records {
            if !self.in_season(record) {
                batch.dropped_other_season += 1;
                continue;
            }

            let observation = self.normalize(record);
            if observation.player_id.is_empty() {
                batch.dropped_missing_id += 1;
                continue;
            }
            batch.observations.push(observation);
        }

        if batch.dropped_missing_id > 0 {
            warn!("Dropped {} rows without a player id", batch.dropped_missing_id);
        }

        debug!(
            "Normalized {} rows for season {} ({} from other seasons dropped, {} without player id)",
            batch.observations.len(),
            self.season,
            batch.dropped_other_season,
            batch.dropped_missing_id
        );

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_stats_default_to_zero() {
        let record = RawRecord::new()
            .with("player_id", "00-0034796")
            .with("player_name", "L.Jackson")
            .with("position", "QB")
            .with("recent_team", "BAL")
            .with("week", 3)
            .with("passing_yards", 182);

        let obs = Normalizer::new(2025).normalize(&record);

        assert_eq!(obs.player_id, "00-0034796");
        assert_eq!(obs.team, "BAL");
        assert_eq!(obs.week, 3);
        assert_eq!(obs.stats.passing_yards, 182.0);
        for stat in Stat::ALL {
            if stat != Stat::PassingYards {
                assert_eq!(obs.stats.get(stat), 0.0, "{} should default to 0", stat.column());
            }
        }
    }

    #[test]
    fn test_aliases_resolve_in_priority_order() {
        let record = RawRecord::new()
            .with("gsis_id", "G1")
            .with("player_display_name", "Someone")
            .with("pos", "wr")
            .with("team", "DET")
            .with("club_code", "XXX")
            .with("rec_tgts", "9")
            .with("rec", "7")
            .with("rec_yds", "88")
            .with("td_rec", 1);

        let obs = Normalizer::new(2025).normalize(&record);

        assert_eq!(obs.player_id, "G1");
        assert_eq!(obs.player_name, "Someone");
        assert_eq!(obs.position, "wr");
        assert_eq!(obs.team, "DET");
        assert_eq!(obs.stats.targets, 9.0);
        assert_eq!(obs.stats.receptions, 7.0);
        assert_eq!(obs.stats.receiving_yards, 88.0);
        assert_eq!(obs.stats.receiving_tds, 1.0);
    }

    #[test]
    fn test_garbage_values_fail_closed() {
        let record = RawRecord::new()
            .with("carries", "NA")
            .with("rushing_yards", Value::Null)
            .with("week", "wk");

        let normalizer = Normalizer::new(2025);
        let obs = normalizer.normalize(&record);

        assert_eq!(obs.player_id, "");
        assert_eq!(obs.week, 0);
        assert_eq!(obs.stats.carries, 0.0);
        assert_eq!(obs.stats.rushing_yards, 0.0);

        // Unidentifiable rows never leave the batch
        let batch = normalizer.normalize_all(&[record]);
        assert!(batch.observations.is_empty());
        assert_eq!(batch.dropped_missing_id, 1);
    }

    #[test]
    fn test_rows_without_player_id_dropped() {
        let normalizer = Normalizer::new(2025);

        let batch = normalizer.normalize_all(&[
            RawRecord::new().with("player_name", "No Id A").with("position", "QB").with("passing_yards", 300),
            RawRecord::new().with("player_id", " ").with("player_name", "No Id B").with("passing_yards", 250),
            RawRecord::new().with("player_id", "P1").with("player_name", "Has Id").with("passing_yards", 100),
        ]);

        assert_eq!(batch.observations.len(), 1);
        assert_eq!(batch.observations[0].player_id, "P1");
        assert_eq!(batch.dropped_missing_id, 2);
        assert_eq!(batch.dropped_other_season, 0);
    }

    #[test]
    fn test_season_filter() {
        let normalizer = Normalizer::new(2025);

        assert!(normalizer.in_season(&RawRecord::new().with("season", 2025)));
        assert!(normalizer.in_season(&RawRecord::new().with("season", "2025")));
        assert!(!normalizer.in_season(&RawRecord::new().with("season", 2024)));
        assert!(normalizer.in_season(&RawRecord::new()));
        assert!(normalizer.in_season(&RawRecord::new().with("season", Value::Null)));
        assert!(normalizer.in_season(&RawRecord::new().with("season", " ")));

        let batch = normalizer.normalize_all(&[
            RawRecord::new().with("player_id", "A").with("season", json!(2025)),
            RawRecord::new().with("player_id", "B").with("season", json!(2024)),
        ]);
        assert_eq!(batch.observations.len(), 1);
        assert_eq!(batch.observations[0].player_id, "A");
        assert_eq!(batch.dropped_other_season, 1);
    }
}
