//! Role-based top-K selection

use crate::config::SelectionConfig;
use crate::models::{AggregatedPlayer, Role, SelectionResult};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Top-K players of one role by that role's metric.
///
/// Descending stable sort: equal metrics keep input order.
pub fn select_role(players: &[AggregatedPlayer], role: Role, cap: usize) -> Vec<SelectionResult> {
    let mut candidates: Vec<&AggregatedPlayer> =
        players.iter().filter(|p| Role::parse(&p.key.position) == Some(role)).collect();

    candidates.sort_by(|a, b| role.metric(b).total_cmp(&role.metric(a)));

    candidates
        .into_iter()
        .take(cap)
        .enumerate()
        .map(|(index, player)| SelectionResult {
            role,
            rank: index + 1,
            opportunities: player.opportunities(),
            player: player.clone(),
        })
        .collect()
}

/// Select every role in priority order (QB, RB, WR, TE) and concatenate.
///
/// A player id already selected under an earlier role is dropped from later
/// roles. The result is not re-sorted globally.
pub fn select_top_players(
    players: &[AggregatedPlayer],
    config: &SelectionConfig,
) -> Vec<SelectionResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut selected = Vec::new();

    for role in Role::ALL {
        let picks = select_role(players, role, config.cap_for(role));
        debug!("Selected {} {} candidates by {}", picks.len(), role, role.metric_name());

        for pick in picks {
            if seen.insert(pick.player.key.player_id.clone()) {
                selected.push(pick);
            } else {
                warn!(
                    "Dropping duplicate selection of {} ({}) under {}",
                    pick.player.key.player_name, pick.player.key.player_id, role
                );
            }
        }
    }

    selected
}
