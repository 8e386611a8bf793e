//! Snapshot-file backed store
//!
//! The tables are held in memory and written as one MessagePack + zstd
//! snapshot on [`EntryStore::flush`]. The snapshot is replaced atomically
//! (write to a temp file, then rename), so a reader sees either the previous
//! or the new state.

use super::{EntryCommit, EntryStore, StoreStats, StoreTables};
use crate::error::StoreError;
use jdict_api::models::{EntryId, StoredEntry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CURRENT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    tables: &'a StoreTables,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    tables: StoreTables,
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    tables: StoreTables,
    dirty: bool,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tables = if path.exists() {
            let tables = Self::load(&path)?;
            tracing::info!("Loaded entry store from {}", path.display());
            tables
        } else {
            tracing::debug!("No entry store at {}, starting empty", path.display());
            StoreTables::default()
        };

        Ok(Self {
            path,
            tables,
            dirty: false,
        })
    }

    /// Start an empty store at `path`.
    ///
    /// An existing snapshot stays on disk until the first successful
    /// [`EntryStore::flush`] replaces it.
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tables: StoreTables::default(),
            dirty: true,
        }
    }

    /// Delete the snapshot file. Returns whether one existed.
    pub fn remove(path: &Path) -> Result<bool, StoreError> {
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<StoreTables, StoreError> {
        let bytes = std::fs::read(path)?;

        let decompressed = zstd::decode_all(&bytes[..])
            .map_err(|e| StoreError::Decode(format!("Zstd decompression failed: {}", e)))?;

        let snapshot: Snapshot = rmp_serde::from_slice(&decompressed)
            .map_err(|e| StoreError::Decode(format!("MSGPACK error: {}", e)))?;

        if snapshot.version != CURRENT_VERSION {
            return Err(StoreError::VersionMismatch {
                found: snapshot.version,
                expected: CURRENT_VERSION,
            });
        }
        Ok(snapshot.tables)
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let snapshot = SnapshotRef {
            version: CURRENT_VERSION,
            tables: &self.tables,
        };
        let bytes = rmp_serde::to_vec_named(&snapshot)
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        let compressed = zstd::encode_all(&bytes[..], 0)?;

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, compressed)?;
        std::fs::rename(temp_path, &self.path)?;

        tracing::info!("Saved entry store to {}", self.path.display());
        Ok(())
    }
}

impl EntryStore for FileStore {
    fn put_entry(&mut self, entry: StoredEntry) -> Result<EntryId, StoreError> {
        self.dirty = true;
        Ok(self.tables.put_entry(entry))
    }

    fn register_key(&mut self, key: &str, id: EntryId) -> Result<(), StoreError> {
        self.tables.register_key(key, id)?;
        self.dirty = true;
        Ok(())
    }

    fn commit(&mut self, commit: EntryCommit) -> Result<EntryId, StoreError> {
        self.dirty = true;
        Ok(self.tables.commit(commit))
    }

    fn lookup_entry_ids(&self, key: &str) -> Result<Vec<EntryId>, StoreError> {
        Ok(self.tables.lookup(key))
    }

    fn get_entry(&self, id: EntryId) -> Result<Option<StoredEntry>, StoreError> {
        Ok(self.tables.get(id))
    }

    fn stats(&self) -> StoreStats {
        self.tables.stats()
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if self.dirty {
            self.save()?;
            self.dirty = false;
        }
        Ok(())
    }
}
