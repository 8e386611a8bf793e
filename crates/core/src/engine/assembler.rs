//! Entry assembler
//!
//! Runs the traversal from every node of an entry, interns the reachable sets
//! and converts the interned node sets into storage records. The result no
//! longer refers to graph nodes, so the graph can be dropped right after.

use super::graph::{EntryGraph, EntryNode, Level, NodePayload};
use super::interner::CombinationInterner;
use super::traversal::reachable_by_level;
use crate::error::{IndexError, Result};
use jdict_api::models::{
    DictEntry, IndexRow, MeaningBlock, MeaningRecord, PhoneticRecord, Slot, StoredEntry,
    WrittenRecord,
};
use petgraph::Direction;
use petgraph::stable_graph::NodeIndex;
use std::collections::BTreeMap;
use tracing::debug;

/// Storable form of one entry plus the keys to register for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIndex {
    pub keys: Vec<String>,
    pub entry: StoredEntry,
}

pub fn build_index_for_entry(entry: &DictEntry) -> Result<EntryIndex> {
    let graph = EntryGraph::build(entry)?;
    let mut tables = SetTables::default();
    let mut rows = BTreeMap::new();
    let mut keys = Vec::new();

    for level in Level::ALL {
        for &origin in graph.nodes_at(level) {
            let id = &graph.node(origin).id;
            if rows.contains_key(id) {
                // Same text as an earlier written form; the first row wins.
                debug!(sequence = entry.sequence, key = %id, "lookup key already taken");
                continue;
            }
            let row = tables.row_for(&graph, origin)?;
            rows.insert(id.clone(), row);
            keys.push(id.clone());
        }
    }

    let stored = tables.into_stored(&graph, rows)?;
    debug!(
        sequence = entry.sequence,
        keys = keys.len(),
        written_sets = stored.written_sets.len(),
        phonetic_sets = stored.phonetic_sets.len(),
        meaning_sets = stored.meaning_sets.len(),
        "entry assembled"
    );
    Ok(EntryIndex {
        keys,
        entry: stored,
    })
}

/// Directions whose traversal yields the other two categories.
fn directions_for(level: Level) -> &'static [Direction] {
    match level {
        Level::Written => &[Direction::Outgoing],
        Level::Phonetic => &[Direction::Outgoing, Direction::Incoming],
        Level::Meaning => &[Direction::Incoming],
    }
}

#[derive(Default)]
struct SetTables {
    written: CombinationInterner,
    phonetic: CombinationInterner,
    meaning: CombinationInterner,
}

impl SetTables {
    fn table_mut(&mut self, level: Level) -> &mut CombinationInterner {
        match level {
            Level::Written => &mut self.written,
            Level::Phonetic => &mut self.phonetic,
            Level::Meaning => &mut self.meaning,
        }
    }

    fn row_for(&mut self, graph: &EntryGraph<'_>, origin: NodeIndex) -> Result<IndexRow> {
        let origin_level = graph.node(origin).level();

        let mut reached: BTreeMap<Level, Vec<NodeIndex>> = BTreeMap::new();
        for &direction in directions_for(origin_level) {
            for (level, nodes) in reachable_by_level(graph, origin, direction) {
                reached.entry(level).or_default().extend(nodes);
            }
        }

        let mut slot = |level: Level| -> Result<Slot> {
            if level == origin_level {
                return Ok(Slot::Itself);
            }
            let nodes = reached.remove(&level).unwrap_or_default();
            let idx = self.table_mut(level).intern(graph, nodes);
            u32::try_from(idx).map(Slot::Set).map_err(|_| {
                IndexError::inconsistency(graph.sequence(), format!("set index {idx} overflows"))
            })
        };

        Ok(IndexRow {
            written: slot(Level::Written)?,
            phonetic: slot(Level::Phonetic)?,
            meaning: slot(Level::Meaning)?,
        })
    }

    fn into_stored(
        self,
        graph: &EntryGraph<'_>,
        keys: BTreeMap<String, IndexRow>,
    ) -> Result<StoredEntry> {
        let sequence = graph.sequence();

        let written_sets = convert(graph, &self.written, |node| match node.payload {
            NodePayload::Written(form) => Ok(WrittenRecord {
                text: form.text.clone(),
                priority: form.priority.clone(),
                info: form.info.clone(),
            }),
            _ => Err(mismatch(sequence, node, Level::Written)),
        })?;

        let phonetic_sets = convert(graph, &self.phonetic, |node| match node.payload {
            NodePayload::Phonetic(form) => Ok(PhoneticRecord {
                text: form.text.clone(),
                priority: form.priority.clone(),
                info: form.info.clone(),
                no_kanji: form.no_kanji,
            }),
            _ => Err(mismatch(sequence, node, Level::Phonetic)),
        })?;

        let meaning_sets = convert(graph, &self.meaning, |node| match node.payload {
            NodePayload::Meaning(block) => meaning_record(block),
            _ => Err(mismatch(sequence, node, Level::Meaning)),
        })?;

        Ok(StoredEntry {
            id: 0,
            sequence,
            keys,
            written_sets,
            phonetic_sets,
            meaning_sets,
        })
    }
}

fn mismatch(sequence: u64, node: &EntryNode<'_>, expected: Level) -> IndexError {
    IndexError::inconsistency(
        sequence,
        format!("node '{}' is not a {expected:?} node", node.id),
    )
}

fn convert<T>(
    graph: &EntryGraph<'_>,
    table: &CombinationInterner,
    to_record: impl Fn(&EntryNode<'_>) -> Result<T>,
) -> Result<Vec<Vec<T>>> {
    table
        .iter()
        .map(|set| {
            set.iter()
                .map(|&n| to_record(graph.node(n)))
                .collect::<Result<Vec<T>>>()
        })
        .collect()
}

/// Glosses plus every other field of the block flattened into string lists.
pub fn meaning_record(block: &MeaningBlock) -> Result<MeaningRecord> {
    let mut meta = BTreeMap::new();
    let mut put = |key: &str, values: &[String]| {
        if !values.is_empty() {
            meta.insert(key.to_string(), values.to_vec());
        }
    };
    put("pos", &block.parts_of_speech);
    put("xref", &block.cross_references);
    put("ant", &block.antonyms);
    put("field", &block.fields);
    put("misc", &block.misc);
    put("s_info", &block.info);
    put("dial", &block.dialects);

    if !block.loan_sources.is_empty() {
        let encoded = block
            .loan_sources
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        meta.insert("lsource".to_string(), encoded);
    }

    Ok(MeaningRecord {
        gloss: block.glosses.clone(),
        meta,
    })
}
