//! Trailing-window averages over the most recent weeks

use crate::coerce::round2;
use crate::config::GroupingKey;
use crate::models::{GroupId, Observation, TrailingAverage};
use std::collections::BTreeMap;
use tracing::debug;

impl GroupingKey {
    /// Group an observation belongs to under this key
    pub fn group_of(&self, obs: &Observation) -> GroupId {
        match self {
            GroupingKey::PlayerId => GroupId::Player(obs.player_id.clone()),
            GroupingKey::Identity => GroupId::Identity(obs.key()),
        }
    }
}

/// Mean passing/rushing/receiving yards over each group's last `window` weeks.
///
/// Weeks are ordered ascending with a stable sort, so duplicate week indexes
/// keep input order. Groups with fewer rows than the window average what
/// they have.
pub fn compute_trailing_averages(
    observations: &[Observation],
    window: usize,
    grouping: GroupingKey,
) -> Vec<TrailingAverage> {
    let mut groups: BTreeMap<GroupId, Vec<&Observation>> = BTreeMap::new();
    for obs in observations {
        groups.entry(grouping.group_of(obs)).or_default().push(obs);
    }

    let averages: Vec<TrailingAverage> = groups
        .into_iter()
        .map(|(group, mut rows)| {
            rows.sort_by_key(|obs| obs.week);
            let tail = &rows[rows.len().saturating_sub(window)..];
            let player_id = tail.first().map(|obs| obs.player_id.clone()).unwrap_or_default();
            trailing_mean(group, player_id, tail)
        })
        .collect();

    debug!("Computed {} trailing averages (window {}, {:?})", averages.len(), window, grouping);

    averages
}

fn trailing_mean(group: GroupId, player_id: String, tail: &[&Observation]) -> TrailingAverage {
    let games = tail.len();
    let mean = |value: fn(&Observation) -> f64| -> f64 {
        if games == 0 {
            return 0.0;
        }
        round2(tail.iter().map(|obs| value(obs)).sum::<f64>() / games as f64)
    };

    TrailingAverage {
        passing_avg: mean(|obs| obs.stats.passing_yards),
        rushing_avg: mean(|obs| obs.stats.rushing_yards),
        receiving_avg: mean(|obs| obs.stats.receiving_yards),
        group,
        player_id,
        games,
    }
}
