use crate::error::{IndexError, Result};
use jdict_api::models::{
    EntryResult, PhoneticRecord, QueryResult, Slot, StoredEntry, WrittenRecord,
};

/// Expand `key` against every stored entry registered under it.
///
/// Entries contribute one row each, in the order given.
pub fn resolve(key: &str, entries: &[StoredEntry]) -> Result<QueryResult> {
    let mut result = QueryResult::new(key);
    for stored in entries {
        result.entries.push(resolve_entry(key, stored)?);
    }
    Ok(result)
}

pub fn resolve_entry(key: &str, stored: &StoredEntry) -> Result<EntryResult> {
    let row = stored.keys.get(key).ok_or_else(|| {
        IndexError::inconsistency(
            stored.sequence,
            format!("key '{key}' is registered but has no index row"),
        )
    })?;

    let written = match row.written {
        Slot::Itself => vec![WrittenRecord::bare(key)],
        Slot::Set(idx) => lookup(stored, &stored.written_sets, idx, "written")?.to_vec(),
    };
    let phonetic = match row.phonetic {
        Slot::Itself => vec![PhoneticRecord::bare(key)],
        Slot::Set(idx) => lookup(stored, &stored.phonetic_sets, idx, "phonetic")?.to_vec(),
    };
    // Meaning blocks are only queried by their generated ids and carry no self-record.
    let meanings = match row.meaning {
        Slot::Itself => Vec::new(),
        Slot::Set(idx) => lookup(stored, &stored.meaning_sets, idx, "meaning")?.to_vec(),
    };

    Ok(EntryResult {
        sequence: stored.sequence,
        written,
        phonetic,
        meanings,
    })
}

fn lookup<'a, T>(
    stored: &StoredEntry,
    sets: &'a [Vec<T>],
    idx: u32,
    category: &str,
) -> Result<&'a [T]> {
    sets.get(idx as usize).map(Vec::as_slice).ok_or_else(|| {
        let err = IndexError::inconsistency(
            stored.sequence,
            format!("{category} set {idx} out of bounds ({} sets)", sets.len()),
        );
        tracing::error!("{}", err);
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdict_api::models::{IndexRow, MeaningRecord};
    use std::collections::BTreeMap;

    fn stored() -> StoredEntry {
        let mut keys = BTreeMap::new();
        keys.insert(
            "日".to_string(),
            IndexRow {
                written: Slot::Itself,
                phonetic: Slot::Set(0),
                meaning: Slot::Set(0),
            },
        );
        keys.insert(
            "ひ".to_string(),
            IndexRow {
                written: Slot::Set(0),
                phonetic: Slot::Itself,
                meaning: Slot::Set(0),
            },
        );
        keys.insert(
            "broken".to_string(),
            IndexRow {
                written: Slot::Itself,
                phonetic: Slot::Set(3),
                meaning: Slot::Set(0),
            },
        );
        keys.insert(
            "1#s000".to_string(),
            IndexRow {
                written: Slot::Set(0),
                phonetic: Slot::Set(0),
                meaning: Slot::Itself,
            },
        );
        StoredEntry {
            id: 1,
            sequence: 1,
            keys,
            written_sets: vec![vec![WrittenRecord {
                text: "日".to_string(),
                priority: vec!["news1".to_string()],
                info: vec![],
            }]],
            phonetic_sets: vec![vec![PhoneticRecord::bare("ひ")]],
            meaning_sets: vec![vec![MeaningRecord {
                gloss: vec!["day".to_string()],
                meta: BTreeMap::new(),
            }]],
        }
    }

    #[test]
    fn test_self_sentinel_yields_the_key() {
        let result = resolve("日", &[stored()]).unwrap();
        assert_eq!(result.key, "日");
        let entry = &result.entries[0];
        assert_eq!(entry.written, vec![WrittenRecord::bare("日")]);
        assert_eq!(entry.phonetic_texts(), vec!["ひ"]);
        assert_eq!(entry.glosses(), vec![vec!["day"]]);
    }

    #[test]
    fn test_set_slot_returns_full_records() {
        let entry = resolve_entry("ひ", &stored()).unwrap();
        assert_eq!(entry.written[0].priority, vec!["news1"]);
        assert_eq!(entry.phonetic, vec![PhoneticRecord::bare("ひ")]);
    }

    #[test]
    fn test_meaning_key_contributes_no_meaning() {
        let entry = resolve_entry("1#s000", &stored()).unwrap();
        assert!(entry.meanings.is_empty());
        assert_eq!(entry.written_texts(), vec!["日"]);
    }

    #[test]
    fn test_out_of_bounds_slot_is_inconsistency() {
        let err = resolve("broken", &[stored()]).unwrap_err();
        assert!(matches!(err, IndexError::InternalInconsistency { sequence: 1, .. }));
    }

    #[test]
    fn test_missing_row_is_inconsistency() {
        assert!(matches!(
            resolve_entry("火", &stored()),
            Err(IndexError::InternalInconsistency { .. })
        ));
    }

    #[test]
    fn test_homographs_keep_storage_order() {
        let first = stored();
        let mut second = stored();
        second.id = 2;
        second.sequence = 2;

        let result = resolve("日", &[second, first]).unwrap();
        let sequences: Vec<u64> = result.entries.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![2, 1]);
    }

    #[test]
    fn test_no_entries_is_empty_result() {
        let result = resolve("日", &[]).unwrap();
        assert!(result.is_empty());
    }
}
