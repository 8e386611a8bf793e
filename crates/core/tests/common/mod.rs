#![allow(dead_code)]

use jdict_api::models::{DictEntry, MeaningBlock, PhoneticForm, QueryResult, WrittenForm};
use jdict_core::{MemoryStore, index_entry, query};

pub struct EntryFixture {
    entry: DictEntry,
}

impl EntryFixture {
    pub fn new(sequence: u64) -> Self {
        Self {
            entry: DictEntry {
                sequence,
                ..Default::default()
            },
        }
    }

    pub fn written(mut self, text: &str) -> Self {
        self.entry.written.push(WrittenForm {
            text: text.to_string(),
            ..Default::default()
        });
        self
    }

    pub fn phonetic(self, text: &str) -> Self {
        self.phonetic_for(text, &[])
    }

    pub fn phonetic_for(mut self, text: &str, written: &[&str]) -> Self {
        self.entry.phonetic.push(PhoneticForm {
            text: text.to_string(),
            restricted_to: strings(written),
            ..Default::default()
        });
        self
    }

    pub fn meaning(self, glosses: &[&str]) -> Self {
        self.meaning_with(glosses, &[], &[])
    }

    pub fn meaning_with(mut self, glosses: &[&str], written: &[&str], phonetic: &[&str]) -> Self {
        self.entry.meanings.push(MeaningBlock {
            glosses: strings(glosses),
            restricted_to_written: strings(written),
            restricted_to_phonetic: strings(phonetic),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> DictEntry {
        self.entry
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A store holding exactly the given entries, in order.
pub fn store_with(entries: &[DictEntry]) -> MemoryStore {
    let mut store = MemoryStore::new();
    for entry in entries {
        index_entry(&mut store, entry).expect("entry should index");
    }
    store
}

pub fn lookup(store: &MemoryStore, key: &str) -> QueryResult {
    query(store, key).expect("query should succeed")
}

pub fn sorted(mut items: Vec<&str>) -> Vec<&str> {
    items.sort();
    items
}
