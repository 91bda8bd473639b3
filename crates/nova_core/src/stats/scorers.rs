//! Top-scorers leaderboard.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Fixture, Player};

/// A top-scorers row: the player plus their resolved goal total and team for
/// display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScorerEntry {
    pub player_id: String,
    pub player_name: String,
    pub team_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shirt_number: Option<u8>,
    pub goals: u32,
}

/// Compute the top scorers from finalized match events.
///
/// Goal totals are derived from the per-match goal attributions. When the
/// finalized set carries no goal events at all (a store that never loaded
/// event detail), the players' stored counters are used instead; the two are
/// never mixed. Players without a goal are dropped, the rest sorted
/// descending by goals (stable) and truncated to `limit`.
pub fn top_scorers(players: &[Player], matches: &[Fixture], limit: usize) -> Vec<ScorerEntry> {
    let mut derived: HashMap<&str, u32> = HashMap::new();
    let mut any_events = false;

    for fixture in matches.iter().filter(|m| m.finalized) {
        for event in fixture.goal_events() {
            any_events = true;
            *derived.entry(event.player_id.as_str()).or_default() += event.count;
        }
    }

    let mut entries: Vec<ScorerEntry> = players
        .iter()
        .map(|p| {
            let goals = if any_events {
                derived.get(p.id.as_str()).copied().unwrap_or(0)
            } else {
                p.goals
            };
            ScorerEntry {
                player_id: p.id.clone(),
                player_name: p.full_name(),
                team_id: p.team_id.clone(),
                shirt_number: p.shirt_number,
                goals,
            }
        })
        .filter(|e| e.goals > 0)
        .collect();

    entries.sort_by(|a, b| b.goals.cmp(&a.goals));
    entries.truncate(limit);
    entries
}
