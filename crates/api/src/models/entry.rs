//! Dictionary entry records as produced by ingestion.
//!
//! One `DictEntry` is the unit of indexing: its written forms, phonetic forms
//! and meaning blocks are only ever associated with each other, never with
//! forms of another entry.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single dictionary entry (`<entry>` in JMdict).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DictEntry {
    /// Sequence number from the source dictionary (`ent_seq`).
    pub sequence: u64,
    #[serde(default)]
    pub written: Vec<WrittenForm>,
    #[serde(default)]
    pub phonetic: Vec<PhoneticForm>,
    #[serde(default)]
    pub meanings: Vec<MeaningBlock>,
}

/// Graphical rendition of an entry (`k_ele`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenForm {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<String>,
}

/// Phonetic rendition of an entry (`r_ele`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneticForm {
    pub text: String,
    /// The reading cannot be regarded as a true reading of the written forms.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_kanji: bool,
    /// Written forms this reading applies to. Empty means all of them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restricted_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<String>,
}

/// One sense of an entry (`sense`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MeaningBlock {
    /// `stagk`: written forms this sense is limited to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restricted_to_written: Vec<String>,
    /// `stagr`: phonetic forms this sense is limited to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restricted_to_phonetic: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts_of_speech: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cross_references: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub misc: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dialects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loan_sources: Vec<LoanSource>,
    #[serde(default)]
    pub glosses: Vec<String>,
}

/// Source language information for a loan word (`lsource`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash, JsonSchema)]
pub struct LoanSource {
    /// ISO 639-2 language code, `eng` when the source omits it.
    pub lang: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// `part` when the source word only partially describes the loan word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Constructed from the source language's words rather than borrowed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wasei: bool,
}

impl LoanSource {
    pub const DEFAULT_LANG: &'static str = "eng";
}
