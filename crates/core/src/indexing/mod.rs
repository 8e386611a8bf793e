//! Indexing pipeline: assemble each entry and commit it to a store.

use crate::engine::{EntryIndex, build_index_for_entry};
use crate::error::{IndexError, Result};
use crate::store::{EntryCommit, EntryStore};
use jdict_api::models::{DictEntry, EntryId};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Entries between progress log lines during `populate`.
pub const PROGRESS_INTERVAL: usize = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulateStats {
    pub indexed: usize,
    pub skipped: usize,
    pub keys: usize,
}

/// Index one entry and commit it, with all of its keys, in one transaction.
pub fn index_entry<S>(store: &mut S, entry: &DictEntry) -> Result<EntryId>
where
    S: EntryStore + ?Sized,
{
    commit_entry(store, entry).map(|(id, _)| id)
}

/// Commit `entry` and return its id with the number of keys registered.
fn commit_entry<S>(store: &mut S, entry: &DictEntry) -> Result<(EntryId, usize)>
where
    S: EntryStore + ?Sized,
{
    let EntryIndex { keys, entry: stored } = build_index_for_entry(entry)?;
    let key_count = keys.len();
    let id = store.commit(EntryCommit {
        entry: stored,
        keys,
    })?;
    debug!(sequence = entry.sequence, id, keys = key_count, "entry committed");
    Ok((id, key_count))
}

/// Index a stream of entries.
///
/// Malformed entries are logged and skipped; source and storage failures
/// stop the run. The store is flushed once at the end.
pub fn populate<S, I, E>(store: &mut S, entries: I) -> Result<PopulateStats>
where
    S: EntryStore + ?Sized,
    I: IntoIterator<Item = std::result::Result<DictEntry, E>>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let start = Instant::now();
    let mut stats = PopulateStats::default();

    for item in entries {
        let entry = item.map_err(|e| IndexError::from(e.into()))?;
        match commit_entry(store, &entry) {
            Ok((_, key_count)) => {
                stats.indexed += 1;
                stats.keys += key_count;
            }
            Err(e @ IndexError::MalformedEntry { .. }) => {
                warn!("Skipping entry: {}", e);
                stats.skipped += 1;
            }
            Err(e) => return Err(e),
        }

        if stats.indexed > 0 && stats.indexed % PROGRESS_INTERVAL == 0 {
            info!("Indexed {} entries...", stats.indexed);
        }
    }

    store.flush()?;
    info!(
        "Indexed {} entries ({} skipped) in {:?}",
        stats.indexed,
        stats.skipped,
        start.elapsed()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::{meaning, phonetic, phonetic_for, written};
    use std::convert::Infallible;

    #[test]
    fn test_index_entry_registers_all_keys() {
        let mut store = MemoryStore::new();
        let entry = DictEntry {
            sequence: 1,
            written: vec![written("日")],
            phonetic: vec![phonetic("ひ")],
            meanings: vec![meaning(&["day"])],
        };
        let id = index_entry(&mut store, &entry).unwrap();

        for key in ["日", "ひ", "1#s000"] {
            assert_eq!(store.lookup_entry_ids(key).unwrap(), vec![id]);
        }
    }

    #[test]
    fn test_populate_skips_malformed_entries() {
        let mut store = MemoryStore::new();
        let good = DictEntry {
            sequence: 1,
            written: vec![written("日")],
            phonetic: vec![phonetic("ひ")],
            meanings: vec![meaning(&["day"])],
        };
        let bad = DictEntry {
            sequence: 2,
            written: vec![written("火")],
            phonetic: vec![phonetic_for("ひ", &["灯"])],
            meanings: vec![],
        };

        let stats = populate(
            &mut store,
            vec![Ok::<_, Infallible>(good), Ok(bad)],
        )
        .unwrap();

        assert_eq!(stats.indexed, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.keys, 3);
        assert_eq!(store.stats().entries, 1);
        assert!(store.lookup_entry_ids("火").unwrap().is_empty());
    }

    #[test]
    fn test_populate_counts_registered_keys() {
        let mut store = MemoryStore::new();
        // The kana reading shares its text with the written form.
        let entry = DictEntry {
            sequence: 7,
            written: vec![written("すし")],
            phonetic: vec![phonetic("すし")],
            meanings: vec![meaning(&["sushi"])],
        };

        let stats = populate(&mut store, vec![Ok::<_, Infallible>(entry)]).unwrap();

        assert_eq!(stats.keys, 2);
        assert_eq!(store.stats().keys, 2);
    }

    #[test]
    fn test_populate_stops_on_source_error() {
        let mut store = MemoryStore::new();
        let items: Vec<std::result::Result<DictEntry, std::io::Error>> =
            vec![Err(std::io::Error::other("truncated input"))];

        let err = populate(&mut store, items).unwrap_err();
        assert!(matches!(err, IndexError::Source(msg) if msg.contains("truncated")));
    }
}
