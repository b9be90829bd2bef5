//! Console run report

use stats_pipeline::{PipelineOutput, Role, RunSummary};
use std::fmt::Write;

/// Selection counts and the top `top_n` players of each role
pub fn render_selection(output: &PipelineOutput, top_n: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "\n{} raw rows, {} in season ({} from other seasons, {} without player id), {} aggregated players",
        output.raw_rows,
        output.observations.len(),
        output.dropped_other_season,
        output.dropped_missing_id,
        output.aggregated.len()
    );

    for role in Role::ALL {
        let selected: Vec<_> = output.selection.iter().filter(|s| s.role == role).collect();
        let _ = writeln!(out, "\n{role} ({} selected, ranked by {})", selected.len(), role.metric_name());

        if selected.is_empty() {
            continue;
        }

        let _ = writeln!(out, "{:<4} {:<24} {:<4} {:>4} {:>8}", "Rank", "Name", "Team", "G", "Metric");
        let _ = writeln!(out, "{}", "-".repeat(48));

        for result in selected.iter().take(top_n) {
            let player = &result.player;
            let _ = writeln!(
                out,
                "{:<4} {:<24} {:<4} {:>4} {:>8.0}",
                result.rank,
                player.key.player_name,
                player.key.team,
                player.games_played,
                role.metric(player)
            );
        }
    }

    out
}

/// Rows and chunks written for a completed run
pub fn render_summary(summary: &RunSummary) -> String {
    format!(
        "\nUploaded {} rows to {} in {} chunks ({} players selected for {})",
        summary.rows_written, summary.table, summary.chunks_written, summary.selected_players, summary.season
    )
}
