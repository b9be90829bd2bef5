use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::models::Role;

/// Season the pipeline targets when nothing else is configured
pub const DEFAULT_SEASON: i32 = 2025;

/// Number of most recent weeks averaged by the trailing-window stage
pub const DEFAULT_TRAILING_WINDOW: usize = 3;

/// Configuration for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Target season; rows tagged with any other season are dropped
    pub season: i32,

    /// How many trailing weeks to average
    pub trailing_window: usize,

    /// Key used to group observations for trailing averages
    pub trailing_grouping: GroupingKey,

    /// Per-role selection caps
    pub selection: SelectionConfig,
}

/// Grouping key for per-player stages.
///
/// Season totals always use [`GroupingKey::Identity`], so a mid-season trade
/// yields two aggregated rows. Trailing averages default to
/// [`GroupingKey::PlayerId`], which spans the trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingKey {
    /// Player identifier alone
    PlayerId,
    /// (player identifier, player name, position, team)
    Identity,
}

/// Top-K caps per role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub qb_cap: usize,
    pub rb_cap: usize,
    pub wr_cap: usize,
    pub te_cap: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            season: DEFAULT_SEASON,
            trailing_window: DEFAULT_TRAILING_WINDOW,
            trailing_grouping: GroupingKey::PlayerId,
            selection: SelectionConfig::default(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { qb_cap: 25, rb_cap: 30, wr_cap: 30, te_cap: 15 }
    }
}

impl SelectionConfig {
    /// Cap for a role
    pub fn cap_for(&self, role: Role) -> usize {
        match role {
            Role::QB => self.qb_cap,
            Role::RB => self.rb_cap,
            Role::WR => self.wr_cap,
            Role::TE => self.te_cap,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration for a specific season
    pub fn for_season(season: i32) -> Self {
        Self { season, ..Default::default() }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.trailing_window == 0 {
            return Err(PipelineError::config("trailing_window must be greater than 0"));
        }

        if self.season <= 0 {
            return Err(PipelineError::config(format!("Invalid season: {}", self.season)));
        }

        Ok(())
    }
}
