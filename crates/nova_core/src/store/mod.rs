//! Entity storage.
//!
//! `EntityStore` is the seam between the aggregation core and whatever holds
//! the data. The bundled [`MemoryStore`] keeps everything behind one
//! `RwLock`; [`manager::StoreManager`] persists its contents as a checksummed
//! binary snapshot file.

pub mod error;
pub mod format;
pub mod manager;
pub mod memory;

pub use error::StoreError;
pub use format::{LeagueSnapshot, SNAPSHOT_VERSION};
pub use manager::StoreManager;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{Fixture, Player, Team};

/// Storage operations the core needs.
///
/// All reads return owned copies of committed state (read-committed: a
/// concurrent writer's half-applied changes are never observable). Writes
/// validate before mutating, so an `Err` means the store is unchanged.
pub trait EntityStore: Send + Sync {
    fn list_teams(&self) -> Result<Vec<Team>>;
    fn get_team(&self, id: &str) -> Result<Team>;
    /// Insert a team; names are unique within the league.
    fn insert_team(&self, team: Team) -> Result<Team>;
    fn update_team(&self, team: Team) -> Result<Team>;
    /// Delete a team, cascading to its players and matches.
    fn delete_team(&self, id: &str) -> Result<()>;

    fn list_players(&self, team_id: Option<&str>) -> Result<Vec<Player>>;
    fn get_player(&self, id: &str) -> Result<Player>;
    fn insert_player(&self, player: Player) -> Result<Player>;
    fn update_player(&self, player: Player) -> Result<Player>;
    fn delete_player(&self, id: &str) -> Result<()>;

    fn list_matches(&self) -> Result<Vec<Fixture>>;
    /// Finalized matches only, event detail included.
    fn list_finalized_matches(&self) -> Result<Vec<Fixture>>;
    fn get_match(&self, id: &str) -> Result<Fixture>;
    fn insert_match(&self, fixture: Fixture) -> Result<Fixture>;
    /// Update schedule fields of an existing match.
    fn update_match(&self, fixture: Fixture) -> Result<Fixture>;
    fn delete_match(&self, id: &str) -> Result<()>;

    /// Commit one match result atomically: the fixture's new score, flag and
    /// event list plus the refreshed counter caches of `players` become
    /// visible together or not at all.
    fn commit_match_result(&self, fixture: Fixture, players: Vec<Player>) -> Result<Fixture>;
}
