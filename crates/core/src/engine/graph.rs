//! Per-entry association graph
//!
//! Every written form, phonetic form and meaning block of one dictionary entry
//! becomes a node. Forward edges run written → phonetic → meaning (plus
//! written → meaning for senses tied to specific written forms); walking them
//! against their direction gives the reverse graph. The graph borrows the
//! entry and lives only as long as indexing that entry.

use jdict_api::models::{MeaningBlock, PhoneticForm, WrittenForm};
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::HashMap;

/// Category of a node, ordered the way the layers are traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Written = 1,
    Phonetic = 2,
    Meaning = 3,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Written, Level::Phonetic, Level::Meaning];
}

#[derive(Debug, Clone, Copy)]
pub enum NodePayload<'e> {
    Written(&'e WrittenForm),
    Phonetic(&'e PhoneticForm),
    Meaning(&'e MeaningBlock),
}

impl NodePayload<'_> {
    pub fn level(&self) -> Level {
        match self {
            NodePayload::Written(_) => Level::Written,
            NodePayload::Phonetic(_) => Level::Phonetic,
            NodePayload::Meaning(_) => Level::Meaning,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EntryNode<'e> {
    /// Form text, or the generated identifier of a meaning block.
    pub id: String,
    pub payload: NodePayload<'e>,
    /// Written forms a meaning block is explicitly limited to.
    pub restricted_to: Vec<NodeIndex>,
}

impl<'e> EntryNode<'e> {
    pub fn new(id: String, payload: NodePayload<'e>) -> Self {
        Self {
            id,
            payload,
            restricted_to: Vec::new(),
        }
    }

    pub fn level(&self) -> Level {
        self.payload.level()
    }

    pub fn is_restricted(&self) -> bool {
        !self.restricted_to.is_empty()
    }

    /// The single written form this node is tied to, if there is exactly one.
    pub fn marked_written(&self) -> Option<NodeIndex> {
        match self.restricted_to.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// Immutable graph of one entry, produced by [`super::EntryGraphBuilder`].
#[derive(Debug, Clone)]
pub struct EntryGraph<'e> {
    pub(crate) sequence: u64,
    pub(crate) topology: StableDiGraph<EntryNode<'e>, ()>,
    pub(crate) id_index: HashMap<(Level, String), NodeIndex>,
    pub(crate) written: Vec<NodeIndex>,
    pub(crate) phonetic: Vec<NodeIndex>,
    pub(crate) meanings: Vec<NodeIndex>,
}

impl<'e> EntryGraph<'e> {
    pub(crate) fn empty(sequence: u64) -> Self {
        Self {
            sequence,
            topology: StableDiGraph::new(),
            id_index: HashMap::new(),
            written: Vec::new(),
            phonetic: Vec::new(),
            meanings: Vec::new(),
        }
    }

    // ---- Read-only accessors ----

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn topology(&self) -> &StableDiGraph<EntryNode<'e>, ()> {
        &self.topology
    }

    pub fn node(&self, idx: NodeIndex) -> &EntryNode<'e> {
        &self.topology[idx]
    }

    pub fn find(&self, level: Level, id: &str) -> Option<NodeIndex> {
        self.id_index.get(&(level, id.to_string())).copied()
    }

    /// Origins in entry order for one category
    pub fn nodes_at(&self, level: Level) -> &[NodeIndex] {
        match level {
            Level::Written => &self.written,
            Level::Phonetic => &self.phonetic,
            Level::Meaning => &self.meanings,
        }
    }

    /// Directly connected nodes; `Incoming` walks the reverse graph.
    pub fn neighbors(
        &self,
        idx: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.topology.neighbors_directed(idx, direction)
    }

    pub fn is_connected(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.topology.find_edge(from, to).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    // ---- Construction helpers used by the builder ----

    pub(crate) fn insert_node(&mut self, node: EntryNode<'e>) -> NodeIndex {
        let key = (node.level(), node.id.clone());
        let level = node.level();
        let idx = self.topology.add_node(node);
        self.id_index.insert(key, idx);
        match level {
            Level::Written => self.written.push(idx),
            Level::Phonetic => self.phonetic.push(idx),
            Level::Meaning => self.meanings.push(idx),
        }
        idx
    }

    /// Add a forward edge; the reverse edge is implied by the direction walked.
    pub(crate) fn connect(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.is_connected(from, to) {
            self.topology.add_edge(from, to, ());
        }
    }
}
