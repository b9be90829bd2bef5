use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Conferences in table order
pub const CONFERENCES: [&str; 2] = ["AFC", "NFC"];

/// One team's row in its conference standings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    /// Team name without playoff markers (e.g., "Buffalo Bills")
    pub team_name: String,
    /// "AFC" or "NFC"
    pub conference: String,
    /// Division heading (e.g., "AFC East"), empty when the table had none
    pub division: String,
    pub season: i32,
    /// Marked with `*` on the standings page
    pub is_division_leader: bool,
    /// Marked with `+` on the standings page
    pub is_wildcard: bool,
    pub wins: i64,
    pub losses: i64,
    pub ties: i64,
    pub win_percentage: f64,
    pub points_for: i64,
    pub points_against: i64,
    pub point_differential: i64,
    pub margin_of_victory: f64,
    pub strength_of_schedule: f64,
    /// Simple Rating System (overall)
    pub srs: f64,
    pub offensive_srs: f64,
    pub defensive_srs: f64,
}

impl TeamStanding {
    /// Playoff marker shown next to the team name
    pub fn playoff_marker(&self) -> &'static str {
        if self.is_division_leader {
            "*"
        } else if self.is_wildcard {
            "+"
        } else {
            ""
        }
    }
}

/// Container for a season's scraped standings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsData {
    pub season: i32,
    /// When this data was scraped
    pub last_updated: DateTime<Utc>,
    /// Teams in page order, AFC first
    pub teams: Vec<TeamStanding>,
}

impl StandingsData {
    /// Create new standings container
    pub fn new(season: i32) -> Self {
        Self { season, last_updated: Utc::now(), teams: Vec::new() }
    }

    /// Teams of one conference in page order
    pub fn conference(&self, conference: &str) -> Vec<&TeamStanding> {
        self.teams.iter().filter(|t| t.conference == conference).collect()
    }

    /// Divisions of one conference, each with its teams, in page order
    pub fn divisions(&self, conference: &str) -> Vec<(&str, Vec<&TeamStanding>)> {
        let mut divisions: Vec<(&str, Vec<&TeamStanding>)> = Vec::new();

        for team in self.conference(conference) {
            match divisions.iter_mut().find(|(name, _)| *name == team.division) {
                Some((_, teams)) => teams.push(team),
                None => divisions.push((team.division.as_str(), vec![team])),
            }
        }

        divisions
    }

    /// Rows for the standings table upsert
    pub fn to_rows(&self) -> serde_json::Result<Vec<serde_json::Value>> {
        self.teams.iter().map(serde_json::to_value).collect()
    }

    /// Render the console table, grouped by conference then division
    pub fn render_table(&self) -> String {
        let mut out = String::new();

        for conference in CONFERENCES {
            let divisions = self.divisions(conference);
            let _ = writeln!(out, "\n{conference} STANDINGS");
            let _ = writeln!(out, "{}", "=".repeat(80));

            if divisions.is_empty() {
                let _ = writeln!(out, "No data to display");
                continue;
            }

            for (division, teams) in divisions {
                let heading = if division.is_empty() { "Unknown" } else { division };
                let _ = writeln!(out, "\n{heading}");
                let _ = writeln!(
                    out,
                    "{:<30} {:>3} {:>3} {:>3} {:>6} {:>4} {:>4} {:>5} {:>6} {:>6} {:>6} {:>6} {:>6}",
                    "Team", "W", "L", "T", "Pct", "PF", "PA", "PD", "MoV", "SoS", "SRS", "OSRS", "DSRS"
                );
                let _ = writeln!(out, "{}", "-".repeat(115));

                for team in teams {
                    let name: String = team.team_name.chars().take(28).collect();
                    let _ = writeln!(
                        out,
                        "{:<28}{:>2} {:>3} {:>3} {:>3} {:>6.3} {:>4} {:>4} {:>5} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1}",
                        name,
                        team.playoff_marker(),
                        team.wins,
                        team.losses,
                        team.ties,
                        team.win_percentage,
                        team.points_for,
                        team.points_against,
                        team.point_differential,
                        team.margin_of_victory,
                        team.strength_of_schedule,
                        team.srs,
                        team.offensive_srs,
                        team.defensive_srs
                    );
                }
            }
        }

        out
    }
}
