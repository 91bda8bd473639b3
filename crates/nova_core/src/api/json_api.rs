//! JSON API for the presentation layer.
//!
//! String-in/string-out entry points over an [`EntityStore`], shaped for a
//! thin HTTP (or FFI) adapter: every function returns a serialized
//! [`ApiResponse`], never an `Err`. Mutating endpoints take the calling
//! [`User`] and consult the access policy before touching the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::LeagueError;
use crate::models::{Fixture, Player, Position, StandingsRow, Team};
use crate::policy::{AccessPolicy, Resource, User};
use crate::recorder::{self, ResultSubmission};
use crate::stats::{self, CardEntry, KeeperEntry, ScorerEntry};
use crate::store::EntityStore;

/// API version for schema compatibility.
pub const API_VERSION: &str = "v1";

/// Default leaderboard truncation, matching the public views.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION: &str = "VALIDATION";
    pub const REFERENTIAL: &str = "REFERENTIAL";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const STORE: &str = "STORE";
}

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self { code: code.to_string(), message: message.into() }
    }
}

impl From<LeagueError> for ApiError {
    fn from(err: LeagueError) -> Self {
        let code = match &err {
            LeagueError::NotFound { .. } => error_codes::NOT_FOUND,
            LeagueError::Validation(_) => error_codes::VALIDATION,
            LeagueError::Referential(_) => error_codes::REFERENTIAL,
            LeagueError::Forbidden(_) => error_codes::FORBIDDEN,
            LeagueError::Store(_) => error_codes::STORE,
            LeagueError::Serialization(_) => error_codes::BAD_REQUEST,
        };
        ApiError::new(code, err.to_string())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

fn to_json<T: Serialize>(response: ApiResponse<T>) -> String {
    serde_json::to_string(&response)
        .unwrap_or_else(|e| format!(r#"{{"success":false,"error":{{"code":"BAD_REQUEST","message":"{e}"}}}}"#))
}

// ============================================================================
// Read endpoints
// ============================================================================

/// Current league table.
pub fn standings_json(store: &dyn EntityStore) -> String {
    let fetched = store.list_teams().and_then(|teams| {
        let matches = store.list_finalized_matches()?;
        Ok((teams, matches))
    });
    match fetched {
        Ok((teams, matches)) => {
            let rows: Vec<StandingsRow> = stats::compute_standings(&teams, &matches);
            to_json(ApiResponse::success(rows))
        }
        Err(err) => to_json::<Vec<StandingsRow>>(ApiResponse::error(err.into())),
    }
}

/// Top scorers, truncated to `limit`.
pub fn top_scorers_json(store: &dyn EntityStore, limit: usize) -> String {
    match roster_and_matches(store) {
        Ok((players, matches)) => {
            let rows: Vec<ScorerEntry> = stats::top_scorers(&players, &matches, limit);
            to_json(ApiResponse::success(rows))
        }
        Err(err) => to_json::<Vec<ScorerEntry>>(ApiResponse::error(err.into())),
    }
}

/// Card ranking, truncated to `limit`.
pub fn disciplinary_json(store: &dyn EntityStore, limit: usize) -> String {
    match roster_and_matches(store) {
        Ok((players, matches)) => {
            let rows: Vec<CardEntry> = stats::disciplinary(&players, &matches, limit);
            to_json(ApiResponse::success(rows))
        }
        Err(err) => to_json::<Vec<CardEntry>>(ApiResponse::error(err.into())),
    }
}

/// Goalkeeper goals-conceded ranking.
pub fn goalkeeper_ranking_json(store: &dyn EntityStore) -> String {
    match roster_and_matches(store) {
        Ok((players, matches)) => {
            let rows: Vec<KeeperEntry> = stats::goalkeeper_ranking(&players, &matches);
            to_json(ApiResponse::success(rows))
        }
        Err(err) => to_json::<Vec<KeeperEntry>>(ApiResponse::error(err.into())),
    }
}

fn roster_and_matches(
    store: &dyn EntityStore,
) -> Result<(Vec<Player>, Vec<Fixture>), LeagueError> {
    // No ordering dependency between the two fetches; a concurrent caller
    // may issue them in parallel.
    let players = store.list_players(None)?;
    let matches = store.list_finalized_matches()?;
    Ok((players, matches))
}

// ============================================================================
// Mutating endpoints
// ============================================================================

/// Result submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResultRequest {
    pub match_id: String,
    pub home_goals: u8,
    pub away_goals: u8,
    pub finalized: bool,
    /// (player id, goal count) attributions.
    #[serde(default)]
    pub scorers: Vec<ScorerEventDto>,
    #[serde(default)]
    pub yellow_cards: Vec<String>,
    #[serde(default)]
    pub red_cards: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerEventDto {
    pub player_id: String,
    pub count: u32,
}

/// Record a match result on behalf of `user`.
pub fn record_result_json(store: &dyn EntityStore, user: &User, request_json: &str) -> String {
    let request: RecordResultRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => {
            return to_json::<Fixture>(ApiResponse::error(ApiError::new(
                error_codes::BAD_REQUEST,
                e.to_string(),
            )))
        }
    };

    if !AccessPolicy::can_write(user, &Resource::MatchResult) {
        warn!(user = %user.name, match_id = %request.match_id, "result submission refused");
        return to_json::<Fixture>(ApiResponse::error(ApiError::new(
            error_codes::FORBIDDEN,
            format!("{} may not record match results", user.name),
        )));
    }

    let submission = ResultSubmission::from_parts(
        request.home_goals,
        request.away_goals,
        request.finalized,
        request.scorers.into_iter().map(|s| (s.player_id, s.count)).collect(),
        request.yellow_cards,
        request.red_cards,
    );

    match recorder::record_result(store, &request.match_id, submission) {
        Ok(fixture) => {
            info!(match_id = %fixture.id, home = fixture.home_goals, away = fixture.away_goals,
                  finalized = fixture.finalized, "result recorded");
            to_json(ApiResponse::success(fixture))
        }
        Err(err) => to_json::<Fixture>(ApiResponse::error(err.into())),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

pub fn create_team_json(store: &dyn EntityStore, user: &User, request_json: &str) -> String {
    let request: CreateTeamRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => {
            return to_json::<Team>(ApiResponse::error(ApiError::new(
                error_codes::BAD_REQUEST,
                e.to_string(),
            )))
        }
    };
    if !AccessPolicy::can_write(user, &Resource::Team) {
        return to_json::<Team>(ApiResponse::error(ApiError::new(
            error_codes::FORBIDDEN,
            format!("{} may not manage teams", user.name),
        )));
    }

    let mut team = Team::new(request.name);
    team.logo_url = request.logo_url;
    team.group = request.group;

    match store.insert_team(team) {
        Ok(team) => {
            info!(team = %team.name, "team created");
            to_json(ApiResponse::success(team))
        }
        Err(err) => to_json::<Team>(ApiResponse::error(err.into())),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    pub first_name: String,
    pub last_name: String,
    pub team_id: String,
    #[serde(default)]
    pub shirt_number: Option<u8>,
    #[serde(default)]
    pub position: Option<Position>,
}

/// Create a player; captains may only add to their own roster.
pub fn create_player_json(store: &dyn EntityStore, user: &User, request_json: &str) -> String {
    let request: CreatePlayerRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => {
            return to_json::<Player>(ApiResponse::error(ApiError::new(
                error_codes::BAD_REQUEST,
                e.to_string(),
            )))
        }
    };
    if !AccessPolicy::can_write(user, &Resource::Roster(&request.team_id)) {
        return to_json::<Player>(ApiResponse::error(ApiError::new(
            error_codes::FORBIDDEN,
            format!("{} may not manage that roster", user.name),
        )));
    }

    let mut player = Player::new(request.first_name, request.last_name, request.team_id);
    player.shirt_number = request.shirt_number;
    player.position = request.position;

    match store.insert_player(player) {
        Ok(player) => {
            info!(player = %player.full_name(), team = %player.team_id, "player created");
            to_json(ApiResponse::success(player))
        }
        Err(err) => to_json::<Player>(ApiResponse::error(err.into())),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMatchRequest {
    pub home_team_id: String,
    pub away_team_id: String,
    pub kickoff: DateTime<Utc>,
    pub round: u32,
}

pub fn schedule_match_json(store: &dyn EntityStore, user: &User, request_json: &str) -> String {
    let request: ScheduleMatchRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => {
            return to_json::<Fixture>(ApiResponse::error(ApiError::new(
                error_codes::BAD_REQUEST,
                e.to_string(),
            )))
        }
    };
    if !AccessPolicy::can_write(user, &Resource::Match) {
        return to_json::<Fixture>(ApiResponse::error(ApiError::new(
            error_codes::FORBIDDEN,
            format!("{} may not schedule matches", user.name),
        )));
    }

    let fixture =
        Fixture::new(request.home_team_id, request.away_team_id, request.kickoff, request.round);
    match store.insert_match(fixture) {
        Ok(fixture) => {
            info!(match_id = %fixture.id, round = fixture.round, "match scheduled");
            to_json(ApiResponse::success(fixture))
        }
        Err(err) => to_json::<Fixture>(ApiResponse::error(err.into())),
    }
}

/// Delete a team and everything that hangs off it.
pub fn delete_team_json(store: &dyn EntityStore, user: &User, team_id: &str) -> String {
    if !AccessPolicy::can_write(user, &Resource::Team) {
        return to_json::<()>(ApiResponse::error(ApiError::new(
            error_codes::FORBIDDEN,
            format!("{} may not manage teams", user.name),
        )));
    }
    match store.delete_team(team_id) {
        Ok(()) => {
            info!(team_id, "team deleted with roster and fixtures");
            to_json(ApiResponse::success(()))
        }
        Err(err) => to_json::<()>(ApiResponse::error(err.into())),
    }
}

/// Delete a player; captains may only remove from their own roster.
pub fn delete_player_json(store: &dyn EntityStore, user: &User, player_id: &str) -> String {
    let player = match store.get_player(player_id) {
        Ok(p) => p,
        Err(err) => return to_json::<()>(ApiResponse::error(err.into())),
    };
    if !AccessPolicy::can_write(user, &Resource::Roster(&player.team_id)) {
        return to_json::<()>(ApiResponse::error(ApiError::new(
            error_codes::FORBIDDEN,
            format!("{} may not manage that roster", user.name),
        )));
    }
    match store.delete_player(player_id) {
        Ok(()) => {
            info!(player_id, "player deleted");
            to_json(ApiResponse::success(()))
        }
        Err(err) => to_json::<()>(ApiResponse::error(err.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn seeded() -> (MemoryStore, Team, Team, Player, Fixture) {
        let store = MemoryStore::new();
        let home = store.insert_team(Team::new("Atlético Nova")).unwrap();
        let away = store.insert_team(Team::new("Racing Sur")).unwrap();
        let striker = store
            .insert_player(Player::new("Marta", "Vidal", home.id.clone()))
            .unwrap();
        let fixture = store
            .insert_match(Fixture::new(home.id.clone(), away.id.clone(), Utc::now(), 1))
            .unwrap();
        (store, home, away, striker, fixture)
    }

    fn parse<T: for<'de> Deserialize<'de>>(json: &str) -> ApiResponse<T> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn standings_endpoint_returns_rows_for_every_team() {
        let (store, ..) = seeded();
        let response: ApiResponse<Vec<StandingsRow>> = parse(&standings_json(&store));
        assert!(response.success);
        assert_eq!(response.data.unwrap().len(), 2);
    }

    #[test]
    fn record_result_as_admin_flows_into_standings() {
        let (store, home, _, striker, fixture) = seeded();
        let request = serde_json::to_string(&RecordResultRequest {
            match_id: fixture.id.clone(),
            home_goals: 2,
            away_goals: 0,
            finalized: true,
            scorers: vec![ScorerEventDto { player_id: striker.id.clone(), count: 2 }],
            yellow_cards: vec![],
            red_cards: vec![],
        })
        .unwrap();

        let response: ApiResponse<Fixture> =
            parse(&record_result_json(&store, &User::admin("root"), &request));
        assert!(response.success, "{:?}", response.error);

        let standings: ApiResponse<Vec<StandingsRow>> = parse(&standings_json(&store));
        let rows = standings.data.unwrap();
        assert_eq!(rows[0].team_id, home.id);
        assert_eq!(rows[0].points, 3);

        let scorers: ApiResponse<Vec<ScorerEntry>> =
            parse(&top_scorers_json(&store, DEFAULT_LEADERBOARD_LIMIT));
        assert_eq!(scorers.data.unwrap()[0].goals, 2);
    }

    #[test]
    fn visitor_cannot_record_results() {
        let (store, _, _, _, fixture) = seeded();
        let request = format!(
            r#"{{"match_id":"{}","home_goals":1,"away_goals":0,"finalized":true}}"#,
            fixture.id
        );
        let response: ApiResponse<Fixture> =
            parse(&record_result_json(&store, &User::visitor("guest"), &request));
        assert!(!response.success);
        assert_eq!(response.error.unwrap().code, error_codes::FORBIDDEN);
    }

    #[test]
    fn captain_adds_players_only_to_own_roster() {
        let (store, home, away, ..) = seeded();
        let captain = User::captain("cap", home.id.clone());

        let own = format!(
            r#"{{"first_name":"Nora","last_name":"Gil","team_id":"{}","position":"goalkeeper"}}"#,
            home.id
        );
        let response: ApiResponse<Player> = parse(&create_player_json(&store, &captain, &own));
        assert!(response.success);

        let foreign = format!(
            r#"{{"first_name":"Eli","last_name":"Paz","team_id":"{}"}}"#,
            away.id
        );
        let response: ApiResponse<Player> = parse(&create_player_json(&store, &captain, &foreign));
        assert_eq!(response.error.unwrap().code, error_codes::FORBIDDEN);
    }

    #[test]
    fn unknown_match_maps_to_not_found_code() {
        let (store, ..) = seeded();
        let request =
            r#"{"match_id":"ghost","home_goals":1,"away_goals":0,"finalized":true}"#.to_string();
        let response: ApiResponse<Fixture> =
            parse(&record_result_json(&store, &User::admin("root"), &request));
        assert_eq!(response.error.unwrap().code, error_codes::NOT_FOUND);
    }

    #[test]
    fn malformed_request_is_bad_request() {
        let (store, ..) = seeded();
        let response: ApiResponse<Fixture> =
            parse(&record_result_json(&store, &User::admin("root"), "{not json"));
        assert_eq!(response.error.unwrap().code, error_codes::BAD_REQUEST);
    }

    #[test]
    fn delete_team_cascades_and_is_admin_only() {
        let (store, home, _, striker, _) = seeded();

        let response: ApiResponse<()> =
            parse(&delete_team_json(&store, &User::visitor("guest"), &home.id));
        assert_eq!(response.error.unwrap().code, error_codes::FORBIDDEN);

        let response: ApiResponse<()> =
            parse(&delete_team_json(&store, &User::admin("root"), &home.id));
        assert!(response.success);
        assert!(store.get_player(&striker.id).is_err());
        assert!(store.list_matches().unwrap().is_empty());
    }

    #[test]
    fn captain_deletes_only_own_players() {
        let (store, home, _, striker, _) = seeded();

        let other_captain = User::captain("cap", "some-other-team");
        let response: ApiResponse<()> =
            parse(&delete_player_json(&store, &other_captain, &striker.id));
        assert_eq!(response.error.unwrap().code, error_codes::FORBIDDEN);

        let own_captain = User::captain("cap", home.id.clone());
        let response: ApiResponse<()> =
            parse(&delete_player_json(&store, &own_captain, &striker.id));
        assert!(response.success);
    }

    #[test]
    fn schedule_match_validates_team_references() {
        let (store, home, ..) = seeded();
        let request = serde_json::to_string(&ScheduleMatchRequest {
            home_team_id: home.id.clone(),
            away_team_id: "ghost".to_string(),
            kickoff: Utc::now(),
            round: 2,
        })
        .unwrap();
        let response: ApiResponse<Fixture> =
            parse(&schedule_match_json(&store, &User::admin("root"), &request));
        assert_eq!(response.error.unwrap().code, error_codes::REFERENTIAL);
    }
}
