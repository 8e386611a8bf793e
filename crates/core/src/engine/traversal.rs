//! Level-constrained reachability
//!
//! A depth-first walk from one origin, in either direction of the entry graph,
//! partitioned by node category. Every reachable node is visited; the filter
//! only decides which of them end up in the origin's combination.

use super::graph::{EntryGraph, Level};
use petgraph::Direction;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::{Dfs, IntoNeighbors, Reversed, Visitable};
use std::collections::BTreeMap;

/// Reachable nodes per category, in discovery order.
pub type LevelSets = BTreeMap<Level, Vec<NodeIndex>>;

pub fn reachable_by_level(
    graph: &EntryGraph<'_>,
    origin: NodeIndex,
    direction: Direction,
) -> LevelSets {
    let visited = match direction {
        Direction::Outgoing => depth_first(graph.topology(), origin),
        Direction::Incoming => depth_first(Reversed(graph.topology()), origin),
    };

    let mut sets = LevelSets::new();
    for x in visited {
        if x != origin && admits(graph, origin, x, direction) {
            sets.entry(graph.node(x).level()).or_default().push(x);
        }
    }
    sets
}

fn depth_first<G>(g: G, origin: NodeIndex) -> Vec<NodeIndex>
where
    G: IntoNeighbors<NodeId = NodeIndex> + Visitable<NodeId = NodeIndex>,
{
    let mut dfs = Dfs::new(g, origin);
    let mut order = Vec::new();
    while let Some(n) = dfs.next(g) {
        order.push(n);
    }
    order
}

/// Disambiguation filter for a visited node `x`.
fn admits(graph: &EntryGraph<'_>, origin: NodeIndex, x: NodeIndex, direction: Direction) -> bool {
    let origin_node = graph.node(origin);
    let node = graph.node(x);

    // A block tied to one written form is never associated with another one.
    if let Some(marked) = origin_node.marked_written() {
        if node.level() == Level::Written && x != marked {
            return false;
        }
    }

    // `x` also belongs to a competing origin of the same category.
    let shared = graph
        .neighbors(x, direction)
        .any(|n| n != origin && graph.node(n).level() == origin_node.level());
    !shared
}
