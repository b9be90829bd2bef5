use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked per-week statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    PassingAttempts,
    PassingCompletions,
    PassingYards,
    PassingTds,
    PassingInterceptions,
    Carries,
    RushingYards,
    RushingTds,
    Targets,
    Receptions,
    ReceivingYards,
    ReceivingTds,
}

impl Stat {
    /// Every tracked statistic, in output column order
    pub const ALL: [Stat; 12] = [
        Stat::PassingAttempts,
        Stat::PassingCompletions,
        Stat::PassingYards,
        Stat::PassingTds,
        Stat::PassingInterceptions,
        Stat::Carries,
        Stat::RushingYards,
        Stat::RushingTds,
        Stat::Targets,
        Stat::Receptions,
        Stat::ReceivingYards,
        Stat::ReceivingTds,
    ];

    /// Canonical column name
    pub fn column(&self) -> &'static str {
        match self {
            Stat::PassingAttempts => "passing_attempts",
            Stat::PassingCompletions => "passing_completions",
            Stat::PassingYards => "passing_yards",
            Stat::PassingTds => "passing_tds",
            Stat::PassingInterceptions => "passing_interceptions",
            Stat::Carries => "carries",
            Stat::RushingYards => "rushing_yards",
            Stat::RushingTds => "rushing_tds",
            Stat::Targets => "targets",
            Stat::Receptions => "receptions",
            Stat::ReceivingYards => "receiving_yards",
            Stat::ReceivingTds => "receiving_tds",
        }
    }
}

/// One value per tracked statistic. Always fully populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub passing_attempts: f64,
    pub passing_completions: f64,
    pub passing_yards: f64,
    pub passing_tds: f64,
    pub passing_interceptions: f64,
    pub carries: f64,
    pub rushing_yards: f64,
    pub rushing_tds: f64,
    pub targets: f64,
    pub receptions: f64,
    pub receiving_yards: f64,
    pub receiving_tds: f64,
}

impl StatLine {
    /// Read one statistic
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::PassingAttempts => self.passing_attempts,
            Stat::PassingCompletions => self.passing_completions,
            Stat::PassingYards => self.passing_yards,
            Stat::PassingTds => self.passing_tds,
            Stat::PassingInterceptions => self.passing_interceptions,
            Stat::Carries => self.carries,
            Stat::RushingYards => self.rushing_yards,
            Stat::RushingTds => self.rushing_tds,
            Stat::Targets => self.targets,
            Stat::Receptions => self.receptions,
            Stat::ReceivingYards => self.receiving_yards,
            Stat::ReceivingTds => self.receiving_tds,
        }
    }

    /// Write one statistic
    pub fn set(&mut self, stat: Stat, value: f64) {
        let slot = match stat {
            Stat::PassingAttempts => &mut self.passing_attempts,
            Stat::PassingCompletions => &mut self.passing_completions,
            Stat::PassingYards => &mut self.passing_yards,
            Stat::PassingTds => &mut self.passing_tds,
            Stat::PassingInterceptions => &mut self.passing_interceptions,
            Stat::Carries => &mut self.carries,
            Stat::RushingYards => &mut self.rushing_yards,
            Stat::RushingTds => &mut self.rushing_tds,
            Stat::Targets => &mut self.targets,
            Stat::Receptions => &mut self.receptions,
            Stat::ReceivingYards => &mut self.receiving_yards,
            Stat::ReceivingTds => &mut self.receiving_tds,
        };
        *slot = value;
    }

    /// Add another line into this one, stat by stat
    pub fn accumulate(&mut self, other: &StatLine) {
        for stat in Stat::ALL {
            self.set(stat, self.get(stat) + other.get(stat));
        }
    }
}

/// Identity of an aggregated row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerKey {
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub team: String,
}

/// One player's statistics for one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Join key across stages (e.g. "00-0034796")
    pub player_id: String,
    /// Display name (e.g. "Lamar Jackson")
    pub player_name: String,
    /// Position as given by the source (QB, RB, WR, TE, K, ...)
    pub position: String,
    /// Team abbreviation (e.g. "BAL")
    pub team: String,
    /// Week index within the season
    pub week: u32,
    pub stats: StatLine,
}

impl Observation {
    /// Identity tuple used for season totals
    pub fn key(&self) -> PlayerKey {
        PlayerKey {
            player_id: self.player_id.clone(),
            player_name: self.player_name.clone(),
            position: self.position.clone(),
            team: self.team.clone(),
        }
    }
}

/// Season totals for one (id, name, position, team) tuple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPlayer {
    pub key: PlayerKey,
    pub totals: StatLine,
    /// Number of weekly rows that contributed
    pub games_played: u32,
    pub passing_yards_per_game: f64,
    pub rushing_yards_per_game: f64,
    pub receiving_yards_per_game: f64,
}

impl AggregatedPlayer {
    pub fn player_id(&self) -> &str {
        &self.key.player_id
    }

    /// RB ranking metric: carries + targets
    pub fn opportunities(&self) -> f64 {
        self.totals.carries + self.totals.targets
    }
}

/// Group a trailing average was computed over
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupId {
    Player(String),
    Identity(PlayerKey),
}

/// Mean of the most recent weeks for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailingAverage {
    pub group: GroupId,
    pub player_id: String,
    /// How many weeks the mean covers (at most the configured window)
    pub games: usize,
    pub passing_avg: f64,
    pub rushing_avg: f64,
    pub receiving_avg: f64,
}

/// Selectable position categories, in selection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    QB,
    RB,
    WR,
    TE,
}

impl Role {
    /// Processing order; earlier roles win deduplication
    pub const ALL: [Role; 4] = [Role::QB, Role::RB, Role::WR, Role::TE];

    /// Parse a position string (case-insensitive, trimmed). Other positions are not selectable.
    pub fn parse(position: &str) -> Option<Self> {
        match position.trim().to_uppercase().as_str() {
            "QB" => Some(Role::QB),
            "RB" => Some(Role::RB),
            "WR" => Some(Role::WR),
            "TE" => Some(Role::TE),
            _ => None,
        }
    }

    /// Ranking metric for this role
    pub fn metric(&self, player: &AggregatedPlayer) -> f64 {
        match self {
            Role::QB => player.totals.passing_yards,
            Role::RB => player.opportunities(),
            Role::WR | Role::TE => player.totals.targets,
        }
    }

    /// Human-readable metric name
    pub fn metric_name(&self) -> &'static str {
        match self {
            Role::QB => "passing yards",
            Role::RB => "opportunities",
            Role::WR | Role::TE => "targets",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::QB => "QB",
            Role::RB => "RB",
            Role::WR => "WR",
            Role::TE => "TE",
        };
        write!(f, "{name}")
    }
}

/// A player selected into a role's top-K
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub role: Role,
    /// 1-based rank within the role
    pub rank: usize,
    /// carries + targets
    pub opportunities: f64,
    pub player: AggregatedPlayer,
}

/// Final row handed to persistence. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub team: Option<String>,
    pub games_played: i64,
    pub passing_attempts: i64,
    pub passing_completions: i64,
    pub passing_yards: i64,
    pub passing_tds: i64,
    pub passing_interceptions: i64,
    pub carries: i64,
    pub rushing_yards: i64,
    pub rushing_tds: i64,
    pub targets: i64,
    pub receptions: i64,
    pub receiving_yards: i64,
    pub receiving_tds: i64,
    pub passing_yards_per_game: f64,
    pub rushing_yards_per_game: f64,
    pub receiving_yards_per_game: f64,
    pub last_3_games_rushing_avg: f64,
    pub last_3_games_receiving_avg: f64,
    pub last_3_games_passing_avg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_normalizes() {
        assert_eq!(Role::parse(" qb "), Some(Role::QB));
        assert_eq!(Role::parse("Te"), Some(Role::TE));
        assert_eq!(Role::parse("K"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_stat_line_accumulate() {
        let mut total = StatLine::default();
        let mut week = StatLine::default();
        week.set(Stat::Carries, 12.0);
        week.set(Stat::Targets, 3.0);

        total.accumulate(&week);
        total.accumulate(&week);

        assert_eq!(total.carries, 24.0);
        assert_eq!(total.targets, 6.0);
        assert_eq!(total.passing_yards, 0.0);
    }

    #[test]
    fn test_stat_columns_unique() {
        let mut columns: Vec<_> = Stat::ALL.iter().map(|s| s.column()).collect();
        columns.sort();
        columns.dedup();
        assert_eq!(columns.len(), Stat::ALL.len());
    }
}
