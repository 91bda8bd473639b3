//! Derived, read-only views over the committed match set.
//!
//! Everything here is a pure function of (roster, matches): no persisted
//! derived state, recomputed on every request. Unfinalized matches are
//! always excluded, whatever their score fields say.

pub mod discipline;
pub mod keepers;
pub mod scorers;
pub mod standings;

pub use discipline::{disciplinary, CardEntry};
pub use keepers::{goalkeeper_ranking, KeeperEntry};
pub use scorers::{top_scorers, ScorerEntry};
pub use standings::compute_standings;
