use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of per-player event attributed to a finalized result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
}

/// One attribution line of a match result: `count` events of `kind` credited
/// to `player_id`. Counts are ≥ 1; a player booked twice appears either as
/// one record with count 2 or as two records — both mean two cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEventRecord {
    pub player_id: String,
    pub kind: EventKind,
    pub count: u32,
}

impl MatchEventRecord {
    pub fn goal(player_id: impl Into<String>, count: u32) -> Self {
        Self { player_id: player_id.into(), kind: EventKind::Goal, count }
    }

    pub fn yellow_card(player_id: impl Into<String>) -> Self {
        Self { player_id: player_id.into(), kind: EventKind::YellowCard, count: 1 }
    }

    pub fn red_card(player_id: impl Into<String>) -> Self {
        Self { player_id: player_id.into(), kind: EventKind::RedCard, count: 1 }
    }
}

/// Outcome of a finalized fixture from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

/// A scheduled or played match.
///
/// Scores and the event list are only authoritative once `finalized` is set;
/// every aggregator ignores unfinalized fixtures regardless of their score
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixture {
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub kickoff: DateTime<Utc>,
    /// Round-robin matchday index ("jornada").
    pub round: u32,
    pub home_goals: u8,
    pub away_goals: u8,
    pub finalized: bool,
    #[serde(default)]
    pub events: Vec<MatchEventRecord>,
    pub created_at: DateTime<Utc>,
}

impl Fixture {
    /// Create an unfinalized 0-0 fixture. Home and away must differ; the
    /// store re-checks this against its team table on insert.
    pub fn new(
        home_team_id: impl Into<String>,
        away_team_id: impl Into<String>,
        kickoff: DateTime<Utc>,
        round: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            home_team_id: home_team_id.into(),
            away_team_id: away_team_id.into(),
            kickoff,
            round,
            home_goals: 0,
            away_goals: 0,
            finalized: false,
            events: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Goals scored by `team_id` in this fixture, if it took part.
    pub fn goals_for(&self, team_id: &str) -> Option<u8> {
        if self.home_team_id == team_id {
            Some(self.home_goals)
        } else if self.away_team_id == team_id {
            Some(self.away_goals)
        } else {
            None
        }
    }

    /// Goals conceded by `team_id` in this fixture, if it took part.
    pub fn goals_against(&self, team_id: &str) -> Option<u8> {
        if self.home_team_id == team_id {
            Some(self.away_goals)
        } else if self.away_team_id == team_id {
            Some(self.home_goals)
        } else {
            None
        }
    }

    /// Outcome for `team_id`, if it took part.
    pub fn outcome_for(&self, team_id: &str) -> Option<Outcome> {
        let scored = self.goals_for(team_id)?;
        let conceded = self.goals_against(team_id)?;
        Some(match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        })
    }

    pub fn goal_events(&self) -> impl Iterator<Item = &MatchEventRecord> {
        self.events.iter().filter(|e| e.kind == EventKind::Goal)
    }

    pub fn card_events(&self) -> impl Iterator<Item = &MatchEventRecord> {
        self.events.iter().filter(|e| matches!(e.kind, EventKind::YellowCard | EventKind::RedCard))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.home_team_id == self.away_team_id {
            return Err("a team cannot play against itself".to_string());
        }
        if let Some(event) = self.events.iter().find(|e| e.count == 0) {
            return Err(format!("event for player {} has zero count", event.player_id));
        }
        Ok(())
    }
}
