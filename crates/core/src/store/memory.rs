use super::{EntryCommit, EntryStore, StoreStats, StoreTables};
use crate::error::StoreError;
use jdict_api::models::{EntryId, StoredEntry};

/// Volatile store, mostly for tests and one-shot lookups.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: StoreTables,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryStore {
    fn put_entry(&mut self, entry: StoredEntry) -> Result<EntryId, StoreError> {
        Ok(self.tables.put_entry(entry))
    }

    fn register_key(&mut self, key: &str, id: EntryId) -> Result<(), StoreError> {
        self.tables.register_key(key, id)
    }

    fn commit(&mut self, commit: EntryCommit) -> Result<EntryId, StoreError> {
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
}
