//! Graph builder for one dictionary entry
//!
//! Unrestricted ("common") meaning blocks fan out to every phonetic form and
//! unrestricted phonetic forms fan out to every written form. Restricted
//! blocks only get edges from the forms they name, which turns the
//! dictionary's restriction lists into plain connectivity.

use super::graph::{EntryGraph, EntryNode, Level, NodePayload};
use crate::error::{IndexError, Result};
use jdict_api::models::DictEntry;
use petgraph::stable_graph::NodeIndex;
use tracing::trace;

/// Identifier of the `n`-th meaning block of entry `sequence`.
///
/// Zero padding keeps ordinal order equal to entry order for the first 1000
/// blocks of an entry. JMdict entries stay far below that.
pub fn meaning_id(sequence: u64, n: usize) -> String {
    format!("{sequence}#s{n:03}")
}

pub struct EntryGraphBuilder<'e> {
    entry: &'e DictEntry,
    graph: EntryGraph<'e>,
}

impl<'e> EntryGraphBuilder<'e> {
    pub fn new(entry: &'e DictEntry) -> Self {
        Self {
            entry,
            graph: EntryGraph::empty(entry.sequence),
        }
    }

    /// Build the immutable graph
    pub fn build(mut self) -> Result<EntryGraph<'e>> {
        let entry = self.entry;

        for form in &entry.written {
            self.add_form(&form.text, NodePayload::Written(form))?;
        }
        for form in &entry.phonetic {
            self.add_form(&form.text, NodePayload::Phonetic(form))?;
        }

        let common_meanings = self.add_meanings()?;
        let common_phonetic = self.connect_phonetic(&common_meanings)?;

        for w in self.graph.written.clone() {
            for &p in &common_phonetic {
                self.graph.connect(w, p);
            }
        }

        trace!(
            sequence = entry.sequence,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "entry graph built"
        );
        Ok(self.graph)
    }

    fn add_form(&mut self, text: &str, payload: NodePayload<'e>) -> Result<NodeIndex> {
        let level = payload.level();
        if self.graph.find(level, text).is_some() {
            return Err(IndexError::malformed(
                self.entry.sequence,
                format!("duplicate {level:?} form '{text}'"),
            ));
        }
        Ok(self
            .graph
            .insert_node(EntryNode::new(text.to_string(), payload)))
    }

    /// Meaning nodes and their restricted edges. Returns the unrestricted blocks.
    fn add_meanings(&mut self) -> Result<Vec<NodeIndex>> {
        let entry = self.entry;
        let mut common = Vec::new();

        for (n, block) in entry.meanings.iter().enumerate() {
            let written_targets = self.resolve_all(&block.restricted_to_written, Level::Written)?;
            let phonetic_targets =
                self.resolve_all(&block.restricted_to_phonetic, Level::Phonetic)?;

            let mut node = EntryNode::new(meaning_id(entry.sequence, n), NodePayload::Meaning(block));
            node.restricted_to = written_targets.clone();
            let idx = self.graph.insert_node(node);

            // Written restriction wins over a phonetic one on the same block.
            let sources = if !written_targets.is_empty() {
                written_targets
            } else if !phonetic_targets.is_empty() {
                phonetic_targets
            } else {
                common.push(idx);
                continue;
            };
            for source in sources {
                self.graph.connect(source, idx);
            }
        }

        Ok(common)
    }

    /// Phonetic → common meaning edges and restricted written → phonetic
    /// edges. Returns the unrestricted phonetic forms.
    fn connect_phonetic(&mut self, common_meanings: &[NodeIndex]) -> Result<Vec<NodeIndex>> {
        let entry = self.entry;
        let mut common = Vec::new();

        for (form, p) in entry.phonetic.iter().zip(self.graph.phonetic.clone()) {
            for &m in common_meanings {
                self.graph.connect(p, m);
            }

            if form.restricted_to.is_empty() {
                common.push(p);
                continue;
            }
            for w in self.resolve_all(&form.restricted_to, Level::Written)? {
                self.graph.connect(w, p);
            }
        }

        Ok(common)
    }

    fn resolve_all(&self, names: &[String], level: Level) -> Result<Vec<NodeIndex>> {
        names
            .iter()
            .map(|name| {
                self.graph.find(level, name).ok_or_else(|| {
                    IndexError::malformed(
                        self.entry.sequence,
                        format!("restriction names unknown {level:?} form '{name}'"),
                    )
                })
            })
            .collect()
    }
}

impl<'e> EntryGraph<'e> {
    /// Build the graph of `entry`, rejecting restrictions to absent forms.
    pub fn build(entry: &'e DictEntry) -> Result<Self> {
        EntryGraphBuilder::new(entry).build()
    }
}
