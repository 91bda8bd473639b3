//! Match result recording.
//!
//! Validates a submitted final score plus its goal/card attributions and
//! commits everything onto the match in one atomic store operation, together
//! with the refreshed per-player counter caches.

use std::collections::HashMap;

use crate::error::{LeagueError, Result};
use crate::models::{EventKind, Fixture, MatchEventRecord, Player};
use crate::store::EntityStore;

/// A submitted result for one match.
#[derive(Debug, Clone, Default)]
pub struct ResultSubmission {
    pub home_goals: u8,
    pub away_goals: u8,
    pub finalized: bool,
    pub events: Vec<MatchEventRecord>,
}

impl ResultSubmission {
    /// Build a submission from the form-shaped inputs: scorer (player, count)
    /// pairs and card player-id lists. Repeated card ids mean repeated cards.
    pub fn from_parts(
        home_goals: u8,
        away_goals: u8,
        finalized: bool,
        scorers: Vec<(String, u32)>,
        yellow_cards: Vec<String>,
        red_cards: Vec<String>,
    ) -> Self {
        let mut events = Vec::new();
        for (player_id, count) in scorers {
            events.push(MatchEventRecord { player_id, kind: EventKind::Goal, count });
        }
        for player_id in yellow_cards {
            events.push(MatchEventRecord::yellow_card(player_id));
        }
        for player_id in red_cards {
            events.push(MatchEventRecord::red_card(player_id));
        }
        Self { home_goals, away_goals, finalized, events }
    }
}

/// Record a result for `match_id`.
///
/// Errors before touching the store: `NotFound` for an unknown match,
/// `Validation` for a zero-count event, `Referential` for an event player
/// that does not belong to either competing team. A scorer-count total that
/// disagrees with the team's score is only logged; the original authors left
/// that unenforced and so do we.
pub fn record_result(
    store: &dyn EntityStore,
    match_id: &str,
    submission: ResultSubmission,
) -> Result<Fixture> {
    let mut fixture = store.get_match(match_id)?;

    let mut roster = store.list_players(Some(&fixture.home_team_id))?;
    roster.extend(store.list_players(Some(&fixture.away_team_id))?);

    validate_events(&submission.events, &roster)?;

    fixture.home_goals = submission.home_goals;
    fixture.away_goals = submission.away_goals;
    fixture.finalized = submission.finalized;
    fixture.events = submission.events;

    if fixture.finalized {
        flag_scorer_mismatch(&fixture, &roster);
    }

    let refreshed = refresh_counters(store, &fixture, roster)?;
    store.commit_match_result(fixture, refreshed)
}

fn validate_events(events: &[MatchEventRecord], roster: &[Player]) -> Result<()> {
    for event in events {
        if event.count == 0 {
            return Err(LeagueError::validation(format!(
                "event for player {} has zero count",
                event.player_id
            )));
        }
        if !roster.iter().any(|p| p.id == event.player_id) {
            return Err(LeagueError::referential(format!(
                "event references player {} outside both rosters",
                event.player_id
            )));
        }
    }
    Ok(())
}

/// Data-quality check, not an invariant: attributed goals may legitimately
/// lag the official score (own goals, unattributed goals).
fn flag_scorer_mismatch(fixture: &Fixture, roster: &[Player]) {
    let side_of: HashMap<&str, &str> =
        roster.iter().map(|p| (p.id.as_str(), p.team_id.as_str())).collect();

    let mut home_attributed = 0u32;
    let mut away_attributed = 0u32;
    for event in fixture.goal_events() {
        match side_of.get(event.player_id.as_str()) {
            Some(team) if *team == fixture.home_team_id => home_attributed += event.count,
            Some(_) => away_attributed += event.count,
            None => {}
        }
    }

    if home_attributed != fixture.home_goals as u32 || away_attributed != fixture.away_goals as u32
    {
        log::warn!(
            "match {}: attributed goals ({home_attributed}-{away_attributed}) disagree with score ({}-{})",
            fixture.id,
            fixture.home_goals,
            fixture.away_goals
        );
    }
}

/// Recompute the counter caches of both rosters from the full finalized set,
/// with `updated` standing in for its stored version.
fn refresh_counters(
    store: &dyn EntityStore,
    updated: &Fixture,
    roster: Vec<Player>,
) -> Result<Vec<Player>> {
    let mut matches = store.list_matches()?;
    match matches.iter_mut().find(|m| m.id == updated.id) {
        Some(slot) => *slot = updated.clone(),
        None => matches.push(updated.clone()),
    }

    let mut goals: HashMap<&str, u32> = HashMap::new();
    let mut yellows: HashMap<&str, u32> = HashMap::new();
    let mut reds: HashMap<&str, u32> = HashMap::new();
    for fixture in matches.iter().filter(|m| m.finalized) {
        for event in &fixture.events {
            let bucket = match event.kind {
                EventKind::Goal => &mut goals,
                EventKind::YellowCard => &mut yellows,
                EventKind::RedCard => &mut reds,
            };
            *bucket.entry(event.player_id.as_str()).or_default() += event.count;
        }
    }

    Ok(roster
        .into_iter()
        .map(|mut player| {
            player.goals = goals.get(player.id.as_str()).copied().unwrap_or(0);
            player.yellow_cards = yellows.get(player.id.as_str()).copied().unwrap_or(0);
            player.red_cards = reds.get(player.id.as_str()).copied().unwrap_or(0);
            player
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, Team};
    use crate::store::MemoryStore;
    use chrono::Utc;

    struct Setup {
        store: MemoryStore,
        match_id: String,
        striker: Player,
        defender: Player,
    }

    fn setup() -> Setup {
        let store = MemoryStore::new();
        let home = store.insert_team(Team::new("Atlético Nova")).unwrap();
        let away = store.insert_team(Team::new("Racing Sur")).unwrap();
        let striker = store
            .insert_player(Player::new("Marta", "Vidal", home.id.clone()).with_position(Position::Forward))
            .unwrap();
        let defender = store
            .insert_player(Player::new("Bea", "Sanz", away.id.clone()).with_position(Position::Defender))
            .unwrap();
        let fixture =
            store.insert_match(Fixture::new(home.id, away.id, Utc::now(), 1)).unwrap();
        Setup { store, match_id: fixture.id, striker, defender }
    }

    #[test]
    fn commits_score_flag_and_events() {
        let s = setup();
        let submission = ResultSubmission::from_parts(
            2,
            1,
            true,
            vec![(s.striker.id.clone(), 2)],
            vec![s.defender.id.clone()],
            vec![],
        );

        let fixture = record_result(&s.store, &s.match_id, submission).unwrap();
        assert_eq!((fixture.home_goals, fixture.away_goals), (2, 1));
        assert!(fixture.finalized);
        assert_eq!(fixture.events.len(), 2);

        let stored = s.store.get_match(&s.match_id).unwrap();
        assert_eq!(stored, fixture);
    }

    #[test]
    fn refreshes_player_counter_caches() {
        let s = setup();
        let submission = ResultSubmission::from_parts(
            2,
            0,
            true,
            vec![(s.striker.id.clone(), 2)],
            vec![s.defender.id.clone(), s.defender.id.clone()],
            vec![s.defender.id.clone()],
        );
        record_result(&s.store, &s.match_id, submission).unwrap();

        assert_eq!(s.store.get_player(&s.striker.id).unwrap().goals, 2);
        let defender = s.store.get_player(&s.defender.id).unwrap();
        assert_eq!(defender.yellow_cards, 2);
        assert_eq!(defender.red_cards, 1);
    }

    #[test]
    fn re_recording_does_not_double_count() {
        let s = setup();
        let first = ResultSubmission::from_parts(
            3,
            0,
            true,
            vec![(s.striker.id.clone(), 3)],
            vec![],
            vec![],
        );
        record_result(&s.store, &s.match_id, first).unwrap();

        // Corrected result replaces the old contribution instead of adding.
        let corrected = ResultSubmission::from_parts(
            1,
            0,
            true,
            vec![(s.striker.id.clone(), 1)],
            vec![],
            vec![],
        );
        record_result(&s.store, &s.match_id, corrected).unwrap();

        assert_eq!(s.store.get_player(&s.striker.id).unwrap().goals, 1);
    }

    #[test]
    fn unknown_match_is_not_found() {
        let s = setup();
        let err = record_result(&s.store, "ghost", ResultSubmission::default()).unwrap_err();
        assert!(matches!(err, LeagueError::NotFound { entity: "match", .. }));
    }

    #[test]
    fn foreign_player_event_is_referential_and_leaves_store_untouched() {
        let s = setup();
        let submission = ResultSubmission::from_parts(
            1,
            0,
            true,
            vec![("someone-else".to_string(), 1)],
            vec![],
            vec![],
        );
        let err = record_result(&s.store, &s.match_id, submission).unwrap_err();
        assert!(matches!(err, LeagueError::Referential(_)));

        let stored = s.store.get_match(&s.match_id).unwrap();
        assert!(!stored.finalized);
        assert_eq!(stored.home_goals, 0);
    }

    #[test]
    fn zero_count_event_is_validation() {
        let s = setup();
        let submission = ResultSubmission::from_parts(
            1,
            0,
            true,
            vec![(s.striker.id.clone(), 0)],
            vec![],
            vec![],
        );
        let err = record_result(&s.store, &s.match_id, submission).unwrap_err();
        assert!(matches!(err, LeagueError::Validation(_)));
    }

    #[test]
    fn unfinalized_submission_keeps_events_out_of_caches() {
        let s = setup();
        let submission = ResultSubmission::from_parts(
            1,
            0,
            false,
            vec![(s.striker.id.clone(), 1)],
            vec![],
            vec![],
        );
        record_result(&s.store, &s.match_id, submission).unwrap();
        // The provisional score is stored but contributes to no aggregate.
        assert_eq!(s.store.get_player(&s.striker.id).unwrap().goals, 0);
        assert!(s.store.list_finalized_matches().unwrap().is_empty());
    }
}
