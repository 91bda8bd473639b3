//! Disciplinary (cards) leaderboard.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{EventKind, Fixture, Player};

/// A disciplinary row. `weighted` is `red*2 + yellow`, the ranking key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardEntry {
    pub player_id: String,
    pub player_name: String,
    pub team_id: String,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub weighted: u32,
}

#[derive(Default, Clone, Copy)]
struct CardCounts {
    yellow: u32,
    red: u32,
}

/// Rank players by card load across finalized matches.
///
/// Card totals come from the match event lists; duplicate entries for one
/// player are counted as separate bookings. The stored per-player counters
/// are only consulted when the finalized set has no card events at all.
/// Players with no card are dropped; the rest sort descending by weighted
/// score, then by red cards, stably, truncated to `limit`.
pub fn disciplinary(players: &[Player], matches: &[Fixture], limit: usize) -> Vec<CardEntry> {
    let mut derived: HashMap<&str, CardCounts> = HashMap::new();
    let mut any_events = false;

    for fixture in matches.iter().filter(|m| m.finalized) {
        for event in fixture.card_events() {
            any_events = true;
            let counts = derived.entry(event.player_id.as_str()).or_default();
            match event.kind {
                EventKind::YellowCard => counts.yellow += event.count,
                EventKind::RedCard => counts.red += event.count,
                EventKind::Goal => unreachable!("card_events filters goals"),
            }
        }
    }

    let mut entries: Vec<CardEntry> = players
        .iter()
        .map(|p| {
            let counts = if any_events {
                derived.get(p.id.as_str()).copied().unwrap_or_default()
            } else {
                CardCounts { yellow: p.yellow_cards, red: p.red_cards }
            };
            CardEntry {
                player_id: p.id.clone(),
                player_name: p.full_name(),
                team_id: p.team_id.clone(),
                yellow_cards: counts.yellow,
                red_cards: counts.red,
                weighted: counts.red * 2 + counts.yellow,
            }
        })
        .filter(|e| e.yellow_cards > 0 || e.red_cards > 0)
        .collect();

    entries.sort_by(|a, b| b.weighted.cmp(&a.weighted).then(b.red_cards.cmp(&a.red_cards)));
    entries.truncate(limit);
    entries
}
