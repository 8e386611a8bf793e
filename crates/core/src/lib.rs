pub mod config;
pub mod engine;
pub mod error;
pub mod indexing;
pub mod logging;
pub mod query;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{EntryIndex, build_index_for_entry};
pub use error::{IndexError, Result, StoreError};
pub use indexing::{PopulateStats, index_entry, populate};
pub use query::{query, resolve};
pub use store::{EntryCommit, EntryStore, FileStore, MemoryStore, StoreStats};
