//! Entry storage
//!
//! Two logical tables: stored entries by id, and lookup key → entry ids.
//! [`EntryStore::commit`] writes one entry together with all of its keys, so
//! a store never holds a partially indexed entry.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use jdict_api::models::{EntryId, StoredEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry's complete write set.
#[derive(Debug, Clone)]
pub struct EntryCommit {
    pub entry: StoredEntry,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub entries: usize,
    pub keys: usize,
}

pub trait EntryStore: Send + Sync {
    /// Persist `entry` under a fresh, monotonically increasing id.
    fn put_entry(&mut self, entry: StoredEntry) -> Result<EntryId, StoreError>;

    /// Append `id` to the entries reachable under `key`.
    fn register_key(&mut self, key: &str, id: EntryId) -> Result<(), StoreError>;

    /// `put_entry` plus `register_key` for every key, all or nothing.
    fn commit(&mut self, commit: EntryCommit) -> Result<EntryId, StoreError>;

    fn lookup_entry_ids(&self, key: &str) -> Result<Vec<EntryId>, StoreError>;

    fn get_entry(&self, id: EntryId) -> Result<Option<StoredEntry>, StoreError>;

    fn stats(&self) -> StoreStats;

    /// Make committed writes durable.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory tables shared by the store implementations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoreTables {
    next_id: EntryId,
    entries: BTreeMap<EntryId, StoredEntry>,
    index: BTreeMap<String, Vec<EntryId>>,
}

impl StoreTables {
    pub(crate) fn put_entry(&mut self, mut entry: StoredEntry) -> EntryId {
        self.next_id += 1;
        let id = self.next_id;
        entry.id = id;
        self.entries.insert(id, entry);
        id
    }

    pub(crate) fn register_key(&mut self, key: &str, id: EntryId) -> Result<(), StoreError> {
        if !self.entries.contains_key(&id) {
            return Err(StoreError::UnknownEntry(id));
        }
        self.append_key(key, id);
        Ok(())
    }

    fn append_key(&mut self, key: &str, id: EntryId) {
        let ids = self.index.entry(key.to_string()).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// Nothing in here can fail once the id is assigned.
    pub(crate) fn commit(&mut self, commit: EntryCommit) -> EntryId {
        let id = self.put_entry(commit.entry);
        for key in &commit.keys {
            self.append_key(key, id);
        }
        id
    }

    pub(crate) fn lookup(&self, key: &str) -> Vec<EntryId> {
        self.index.get(key).cloned().unwrap_or_default()
    }

    pub(crate) fn get(&self, id: EntryId) -> Option<StoredEntry> {
        self.entries.get(&id).cloned()
    }

    pub(crate) fn stats(&self) -> StoreStats {
        StoreStats {
            entries: self.entries.len(),
            keys: self.index.len(),
        }
    }
}
