//! Binary snapshot codec for the league store.
//!
//! Layout: LZ4-compressed MessagePack payload (size-prepended) followed by a
//! 32-byte SHA-256 checksum of the compressed bytes.

use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

use super::error::StoreError;
use crate::models::{Fixture, Player, Team};

/// Bumped whenever the snapshot layout changes incompatibly.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything the league persists, in one document.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LeagueSnapshot {
    /// Snapshot format version for migration checks.
    pub version: u32,

    /// Snapshot timestamp (unix milliseconds).
    pub timestamp: u64,

    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<Fixture>,
}

impl LeagueSnapshot {
    pub fn new(teams: Vec<Team>, players: Vec<Player>, matches: Vec<Fixture>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
            teams,
            players,
            matches,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let mut ids = std::collections::HashSet::new();
        for team in &self.teams {
            if !ids.insert(team.id.as_str()) {
                return Err(StoreError::Corrupted);
            }
        }
        ids.clear();
        for player in &self.players {
            if !ids.insert(player.id.as_str()) {
                return Err(StoreError::Corrupted);
            }
        }
        ids.clear();
        for fixture in &self.matches {
            if !ids.insert(fixture.id.as_str()) {
                return Err(StoreError::Corrupted);
            }
        }
        Ok(())
    }
}

/// Serialize and compress a snapshot.
pub fn serialize_and_compress(snapshot: &LeagueSnapshot) -> Result<Vec<u8>, StoreError> {
    snapshot.validate()?;

    let msgpack = to_vec_named(snapshot).map_err(StoreError::Serialization)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a snapshot.
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<LeagueSnapshot, StoreError> {
    // Minimum: size header + checksum.
    if bytes.len() < 4 + 32 {
        return Err(StoreError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated = hasher.finalize();
    if &calculated[..] != checksum_bytes {
        return Err(StoreError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| StoreError::Decompression)?;
    let snapshot: LeagueSnapshot = from_slice(&msgpack).map_err(StoreError::Deserialization)?;

    if snapshot.version > SNAPSHOT_VERSION {
        return Err(StoreError::VersionMismatch {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    snapshot.validate()?;
    Ok(snapshot)
}
