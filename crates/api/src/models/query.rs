use super::record::{MeaningRecord, PhoneticRecord, WrittenRecord};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The result of looking up one key
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub struct QueryResult {
    pub key: String,
    /// One row per stored entry registered under the key, in storage order.
    pub entries: Vec<EntryResult>,
}

impl QueryResult {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Forms and meanings that co-occur with the key inside one entry
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, JsonSchema)]
pub struct EntryResult {
    pub sequence: u64,
    pub written: Vec<WrittenRecord>,
    pub phonetic: Vec<PhoneticRecord>,
    pub meanings: Vec<MeaningRecord>,
}

impl EntryResult {
    pub fn written_texts(&self) -> Vec<&str> {
        self.written.iter().map(|w| w.text.as_str()).collect()
    }

    pub fn phonetic_texts(&self) -> Vec<&str> {
        self.phonetic.iter().map(|p| p.text.as_str()).collect()
    }

    pub fn glosses(&self) -> Vec<Vec<&str>> {
        self.meanings
            .iter()
            .map(|m| m.gloss.iter().map(String::as_str).collect())
            .collect()
    }
}
