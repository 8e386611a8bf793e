//! Storage representation of an indexed entry.
//!
//! A `StoredEntry` keeps every distinct combination set of the entry once and
//! maps each lookup key to a triple of set references.

use crate::error::ApiError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier assigned by the entry store.
pub type EntryId = u64;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash, JsonSchema)]
pub struct WrittenRecord {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
}

impl WrittenRecord {
    /// Record carrying only the text, used when a query key stands for itself.
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash, JsonSchema)]
pub struct PhoneticRecord {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_kanji: bool,
}

impl PhoneticRecord {
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Glosses of a meaning block plus every other field flattened into `meta`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash, JsonSchema)]
pub struct MeaningRecord {
    pub gloss: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, Vec<String>>,
}

/// Reference from an index row to one category's members.
///
/// Encoded as `-1` for [`Slot::Itself`] and as the set index otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub enum Slot {
    /// The lookup key is the sole member of this category.
    Itself,
    /// Index into the category's set table.
    Set(u32),
}

impl Slot {
    pub const SELF_SENTINEL: i64 = -1;

    pub fn set_index(self) -> Option<usize> {
        match self {
            Slot::Itself => None,
            Slot::Set(idx) => Some(idx as usize),
        }
    }
}

impl From<Slot> for i64 {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Itself => Slot::SELF_SENTINEL,
            Slot::Set(idx) => i64::from(idx),
        }
    }
}

impl TryFrom<i64> for Slot {
    type Error = ApiError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw == Slot::SELF_SENTINEL {
            return Ok(Slot::Itself);
        }
        u32::try_from(raw)
            .map(Slot::Set)
            .map_err(|_| ApiError::InvalidSlot(raw))
    }
}

/// Written / phonetic / meaning set references of one lookup key.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRow {
    pub written: Slot,
    pub phonetic: Slot,
    pub meaning: Slot,
}

/// Everything persisted for one dictionary entry.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredEntry {
    /// Assigned by the store on insertion, zero before that.
    #[serde(default)]
    pub id: EntryId,
    pub sequence: u64,
    pub keys: BTreeMap<String, IndexRow>,
    #[serde(default)]
    pub written_sets: Vec<Vec<WrittenRecord>>,
    #[serde(default)]
    pub phonetic_sets: Vec<Vec<PhoneticRecord>>,
    #[serde(default)]
    pub meaning_sets: Vec<Vec<MeaningRecord>>,
}
