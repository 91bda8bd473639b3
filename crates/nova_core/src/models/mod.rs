pub mod fixture;
pub mod player;
pub mod standings;
pub mod team;

pub use fixture::{EventKind, Fixture, MatchEventRecord, Outcome};
pub use player::{Player, Position};
pub use standings::StandingsRow;
pub use team::Team;
