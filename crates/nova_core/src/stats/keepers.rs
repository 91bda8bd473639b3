//! Goalkeeper goals-conceded ranking.

use serde::{Deserialize, Serialize};

use crate::models::{Fixture, Player};

/// A goalkeeper row: matches covered, goals conceded, clean sheets and the
/// per-match average that ranks the table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeeperEntry {
    pub player_id: String,
    pub player_name: String,
    pub team_id: String,
    pub matches: u32,
    pub conceded: u32,
    pub clean_sheets: u32,
    pub average: f64,
}

/// Rank goalkeepers by goals conceded per match, best first.
///
/// There is no per-match goalkeeper attribution in the data, so a keeper is
/// credited with every finalized match their team played and with the team's
/// goals against over those matches. Keepers whose team has no finalized
/// match are excluded. Sorted ascending by average, then by total conceded,
/// then descending by clean sheets.
pub fn goalkeeper_ranking(players: &[Player], matches: &[Fixture]) -> Vec<KeeperEntry> {
    let finalized: Vec<&Fixture> = matches.iter().filter(|m| m.finalized).collect();

    let mut entries: Vec<KeeperEntry> = players
        .iter()
        .filter(|p| p.is_goalkeeper())
        .filter_map(|keeper| {
            let mut played = 0u32;
            let mut conceded = 0u32;
            let mut clean_sheets = 0u32;

            for fixture in &finalized {
                let Some(against) = fixture.goals_against(&keeper.team_id) else {
                    continue;
                };
                played += 1;
                conceded += against as u32;
                if against == 0 {
                    clean_sheets += 1;
                }
            }

            if played == 0 {
                return None;
            }
            Some(KeeperEntry {
                player_id: keeper.id.clone(),
                player_name: keeper.full_name(),
                team_id: keeper.team_id.clone(),
                matches: played,
                conceded,
                clean_sheets,
                average: conceded as f64 / played as f64,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.average
            .partial_cmp(&b.average)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.conceded.cmp(&b.conceded))
            .then(b.clean_sheets.cmp(&a.clean_sheets))
    });
    entries
}
