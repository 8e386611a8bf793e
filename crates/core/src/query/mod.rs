pub mod resolver;

pub use resolver::{resolve, resolve_entry};

use crate::error::{Result, StoreError};
use crate::store::EntryStore;
use jdict_api::models::{QueryResult, StoredEntry};

/// Look `key` up in `store` and expand every matching entry.
pub fn query<S>(store: &S, key: &str) -> Result<QueryResult>
where
    S: EntryStore + ?Sized,
{
    let ids = store.lookup_entry_ids(key)?;
    let entries = ids
        .into_iter()
        .map(|id| store.get_entry(id)?.ok_or(StoreError::UnknownEntry(id)))
        .collect::<std::result::Result<Vec<StoredEntry>, StoreError>>()?;

    tracing::debug!(key, matches = entries.len(), "query");
    resolve(key, &entries)
}
