//! In-memory entity store.

use std::sync::RwLock;

use super::format::LeagueSnapshot;
use super::EntityStore;
use crate::error::{LeagueError, Result};
use crate::models::{Fixture, Player, Team};

/// The collections behind the lock. Doubles as the snapshot payload shape.
#[derive(Debug, Clone, Default)]
pub struct LeagueData {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Fixture>,
}

/// `RwLock`-guarded store.
///
/// Every write takes the lock once for its whole mutation, so readers see
/// either the previous committed state or the full new one — never a match
/// with an updated score but a stale event list.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<LeagueData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: LeagueSnapshot) -> Self {
        Self {
            inner: RwLock::new(LeagueData {
                teams: snapshot.teams,
                players: snapshot.players,
                matches: snapshot.matches,
            }),
        }
    }

    /// Copy of the committed state, for persistence.
    pub fn snapshot(&self) -> LeagueSnapshot {
        let data = self.inner.read().expect("league store lock poisoned");
        LeagueSnapshot::new(data.teams.clone(), data.players.clone(), data.matches.clone())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, LeagueData> {
        self.inner.read().expect("league store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, LeagueData> {
        self.inner.write().expect("league store lock poisoned")
    }
}

fn check_team(team: &Team) -> Result<()> {
    team.validate().map_err(LeagueError::Validation)
}

fn check_player(player: &Player) -> Result<()> {
    player.validate().map_err(LeagueError::Validation)
}

impl EntityStore for MemoryStore {
    fn list_teams(&self) -> Result<Vec<Team>> {
        Ok(self.read().teams.clone())
    }

    fn get_team(&self, id: &str) -> Result<Team> {
        self.read()
            .teams
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| LeagueError::not_found("team", id))
    }

    fn insert_team(&self, team: Team) -> Result<Team> {
        check_team(&team)?;
        let mut data = self.write();
        if data.teams.iter().any(|t| t.name == team.name) {
            return Err(LeagueError::validation(format!("team name already taken: {}", team.name)));
        }
        data.teams.push(team.clone());
        Ok(team)
    }

    fn update_team(&self, team: Team) -> Result<Team> {
        check_team(&team)?;
        let mut data = self.write();
        if data.teams.iter().any(|t| t.id != team.id && t.name == team.name) {
            return Err(LeagueError::validation(format!("team name already taken: {}", team.name)));
        }
        let existing = data
            .teams
            .iter_mut()
            .find(|t| t.id == team.id)
            .ok_or_else(|| LeagueError::not_found("team", &team.id))?;
        *existing = team.clone();
        Ok(team)
    }

    fn delete_team(&self, id: &str) -> Result<()> {
        let mut data = self.write();
        let before = data.teams.len();
        data.teams.retain(|t| t.id != id);
        if data.teams.len() == before {
            return Err(LeagueError::not_found("team", id));
        }
        // Cascade: roster and fixtures of the deleted team go with it.
        data.players.retain(|p| p.team_id != id);
        data.matches.retain(|m| !m.involves(id));
        Ok(())
    }

    fn list_players(&self, team_id: Option<&str>) -> Result<Vec<Player>> {
        let data = self.read();
        Ok(match team_id {
            Some(team) => data.players.iter().filter(|p| p.team_id == team).cloned().collect(),
            None => data.players.clone(),
        })
    }

    fn get_player(&self, id: &str) -> Result<Player> {
        self.read()
            .players
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| LeagueError::not_found("player", id))
    }

    fn insert_player(&self, player: Player) -> Result<Player> {
        check_player(&player)?;
        let mut data = self.write();
        if !data.teams.iter().any(|t| t.id == player.team_id) {
            return Err(LeagueError::referential(format!(
                "player references unknown team: {}",
                player.team_id
            )));
        }
        data.players.push(player.clone());
        Ok(player)
    }

    fn update_player(&self, player: Player) -> Result<Player> {
        check_player(&player)?;
        let mut data = self.write();
        if !data.teams.iter().any(|t| t.id == player.team_id) {
            return Err(LeagueError::referential(format!(
                "player references unknown team: {}",
                player.team_id
            )));
        }
        let existing = data
            .players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or_else(|| LeagueError::not_found("player", &player.id))?;
        *existing = player.clone();
        Ok(player)
    }

    fn delete_player(&self, id: &str) -> Result<()> {
        let mut data = self.write();
        let before = data.players.len();
        data.players.retain(|p| p.id != id);
        if data.players.len() == before {
            return Err(LeagueError::not_found("player", id));
        }
        Ok(())
    }

    fn list_matches(&self) -> Result<Vec<Fixture>> {
        Ok(self.read().matches.clone())
    }

    fn list_finalized_matches(&self) -> Result<Vec<Fixture>> {
        Ok(self.read().matches.iter().filter(|m| m.finalized).cloned().collect())
    }

    fn get_match(&self, id: &str) -> Result<Fixture> {
        self.read()
            .matches
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| LeagueError::not_found("match", id))
    }

    fn insert_match(&self, fixture: Fixture) -> Result<Fixture> {
        fixture.validate().map_err(LeagueError::Validation)?;
        let mut data = self.write();
        for team_id in [&fixture.home_team_id, &fixture.away_team_id] {
            if !data.teams.iter().any(|t| &t.id == team_id) {
                return Err(LeagueError::referential(format!(
                    "match references unknown team: {team_id}"
                )));
            }
        }
        data.matches.push(fixture.clone());
        Ok(fixture)
    }

    fn update_match(&self, fixture: Fixture) -> Result<Fixture> {
        fixture.validate().map_err(LeagueError::Validation)?;
        let mut data = self.write();
        for team_id in [&fixture.home_team_id, &fixture.away_team_id] {
            if !data.teams.iter().any(|t| &t.id == team_id) {
                return Err(LeagueError::referential(format!(
                    "match references unknown team: {team_id}"
                )));
            }
        }
        let existing = data
            .matches
            .iter_mut()
            .find(|m| m.id == fixture.id)
            .ok_or_else(|| LeagueError::not_found("match", &fixture.id))?;
        *existing = fixture.clone();
        Ok(fixture)
    }

    fn delete_match(&self, id: &str) -> Result<()> {
        let mut data = self.write();
        let before = data.matches.len();
        data.matches.retain(|m| m.id != id);
        if data.matches.len() == before {
            return Err(LeagueError::not_found("match", id));
        }
        Ok(())
    }

    fn commit_match_result(&self, fixture: Fixture, players: Vec<Player>) -> Result<Fixture> {
        let mut data = self.write();
        let slot = data
            .matches
            .iter_mut()
            .find(|m| m.id == fixture.id)
            .ok_or_else(|| LeagueError::not_found("match", &fixture.id))?;
        *slot = fixture.clone();
        for updated in players {
            if let Some(existing) = data.players.iter_mut().find(|p| p.id == updated.id) {
                *existing = updated;
            }
        }
        Ok(fixture)
    }
}
