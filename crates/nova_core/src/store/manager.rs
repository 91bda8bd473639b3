//! League snapshot file persistence.

use std::fs::{rename, File};
use std::io::{Read, Write};
use std::path::Path;

use super::error::StoreError;
use super::format::{decompress_and_deserialize, serialize_and_compress, LeagueSnapshot};
use super::memory::MemoryStore;

pub struct StoreManager;

impl StoreManager {
    /// Load a store from a snapshot file.
    pub fn load(path: &Path) -> Result<MemoryStore, StoreError> {
        let snapshot = Self::load_snapshot(path)?;
        log::info!(
            "league loaded from {} ({} teams, {} players, {} matches)",
            path.display(),
            snapshot.teams.len(),
            snapshot.players.len(),
            snapshot.matches.len()
        );
        Ok(MemoryStore::from_snapshot(snapshot))
    }

    /// Load a store, or start empty when the file does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<MemoryStore, StoreError> {
        if !path.exists() {
            log::info!("no league file at {}, starting empty", path.display());
            return Ok(MemoryStore::new());
        }
        Self::load(path)
    }

    /// Persist the store's committed state.
    ///
    /// Writes to a sibling temp file first and renames over the target, so a
    /// failed save leaves the previous snapshot intact.
    pub fn save(path: &Path, store: &MemoryStore) -> Result<(), StoreError> {
        let snapshot = store.snapshot();
        let bytes = serialize_and_compress(&snapshot)?;

        let tmp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        rename(&tmp_path, path)?;

        log::info!("league saved to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn load_snapshot(path: &Path) -> Result<LeagueSnapshot, StoreError> {
        if !path.exists() {
            return Err(StoreError::FileNotFound { path: path.display().to_string() });
        }
        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;
        decompress_and_deserialize(&bytes)
    }
}
