//! Entry indexing engine
//!
//! Turns one dictionary entry into its stored representation:
//!
//! - **graph / builder**: written, phonetic and meaning nodes connected
//!   according to the entry's restriction lists
//! - **traversal**: reachable nodes per category from one origin
//! - **interner**: entry-scoped deduplication of combination sets
//! - **assembler**: index rows and storage records for the whole entry

pub mod assembler;
pub mod builder;
pub mod graph;
pub mod interner;
pub mod traversal;

pub use assembler::{EntryIndex, build_index_for_entry};
pub use builder::{EntryGraphBuilder, meaning_id};
pub use graph::{EntryGraph, EntryNode, Level, NodePayload};
pub use interner::CombinationInterner;
pub use traversal::{LevelSets, reachable_by_level};
