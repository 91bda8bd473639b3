//! League table computation.
//!
//! The table is always a full recomputation over the committed finalized
//! match set. The original system also had an incremental SQL path that
//! patched a stored row per result; re-editing an already finalized score
//! double-counts under that scheme, so it is deliberately not reproduced.

use std::collections::HashMap;

use crate::models::{Fixture, Outcome, StandingsRow, Team};

/// Compute the sorted league table from `teams` and `matches`.
///
/// Unfinalized matches are ignored. A finalized match referencing a team
/// that is not present in `teams` is silently skipped rather than being an
/// error; a deleted team's history simply stops counting.
///
/// Rows are sorted descending by points, then goal difference, then goals
/// for. The sort is stable, so teams tied on all three keep their input
/// order.
pub fn compute_standings(teams: &[Team], matches: &[Fixture]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = teams.iter().map(StandingsRow::zeroed).collect();
    let index: HashMap<&str, usize> =
        teams.iter().enumerate().map(|(i, t)| (t.id.as_str(), i)).collect();

    for fixture in matches.iter().filter(|m| m.finalized) {
        let (Some(&home), Some(&away)) = (
            index.get(fixture.home_team_id.as_str()),
            index.get(fixture.away_team_id.as_str()),
        ) else {
            continue;
        };

        rows[home].played += 1;
        rows[away].played += 1;

        rows[home].goals_for += fixture.home_goals as u32;
        rows[home].goals_against += fixture.away_goals as u32;
        rows[away].goals_for += fixture.away_goals as u32;
        rows[away].goals_against += fixture.home_goals as u32;

        match fixture.outcome_for(&fixture.home_team_id) {
            Some(Outcome::Win) => {
                rows[home].won += 1;
                rows[home].points += 3;
                rows[away].lost += 1;
            }
            Some(Outcome::Loss) => {
                rows[away].won += 1;
                rows[away].points += 3;
                rows[home].lost += 1;
            }
            _ => {
                rows[home].drawn += 1;
                rows[home].points += 1;
                rows[away].drawn += 1;
                rows[away].points += 1;
            }
        }
    }

    // Recomputed from the final totals, never trusted incrementally.
    for row in &mut rows {
        row.goal_difference = row.goals_for as i64 - row.goals_against as i64;
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });

    rows
}
