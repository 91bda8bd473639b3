use serde::{Deserialize, Serialize};

use super::Team;

/// One row of the league table.
///
/// Derived data: a pure function of the finalized match set, recomputed on
/// every read. Never authored or patched in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingsRow {
    pub team_id: String,
    pub team_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl StandingsRow {
    /// Zeroed row carrying the team's display fields.
    pub fn zeroed(team: &Team) -> Self {
        Self {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            logo_url: team.logo_url.clone(),
            group: team.group.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}
