use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    /// The entry refers to forms it does not contain, or repeats a form.
    #[error("Malformed entry {sequence}: {reason}")]
    MalformedEntry { sequence: u64, reason: String },
    /// An index row points outside its set table. Never expected; callers must abort.
    #[error("Internal inconsistency in entry {sequence}: {reason}")]
    InternalInconsistency { sequence: u64, reason: String },
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Source error: {0}")]
    Source(String),
}

impl IndexError {
    pub fn malformed(sequence: u64, reason: impl Into<String>) -> Self {
        IndexError::MalformedEntry {
            sequence,
            reason: reason.into(),
        }
    }

    pub fn inconsistency(sequence: u64, reason: impl Into<String>) -> Self {
        IndexError::InternalInconsistency {
            sequence,
            reason: reason.into(),
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for IndexError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        IndexError::Source(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("MSGPACK encode error: {0}")]
    Encode(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Store format version mismatch (found {found}, expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("Unknown entry id: {0}")]
    UnknownEntry(u64),
}

pub type Result<T> = std::result::Result<T, IndexError>;
