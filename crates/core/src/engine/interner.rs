use super::graph::EntryGraph;
use indexmap::IndexSet;
use petgraph::stable_graph::NodeIndex;

/// Entry-scoped table of distinct combination sets for one category.
///
/// Sets are keyed by their canonical form (members sorted by identifier), so
/// the same members discovered in any order intern to the same index.
#[derive(Debug, Default, Clone)]
pub struct CombinationInterner {
    sets: IndexSet<Vec<NodeIndex>>,
}

impl CombinationInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `nodes` if no equal set exists yet. Returns the set index.
    pub fn intern(&mut self, graph: &EntryGraph<'_>, mut nodes: Vec<NodeIndex>) -> usize {
        nodes.sort_by(|a, b| graph.node(*a).id.cmp(&graph.node(*b).id));
        nodes.dedup();
        self.sets.insert_full(nodes).0
    }

    pub fn get(&self, idx: usize) -> Option<&[NodeIndex]> {
        self.sets.get_index(idx).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[NodeIndex]> {
        self.sets.iter().map(Vec::as_slice)
    }
}
