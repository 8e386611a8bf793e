use jdict_api::models::{EntryResult, QueryResult};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Terminal view of one matching entry
#[derive(Tabled)]
pub struct EntryRow {
    #[tabled(rename = "Seq")]
    pub sequence: u64,
    #[tabled(rename = "Written")]
    pub written: String,
    #[tabled(rename = "Reading")]
    pub reading: String,
    #[tabled(rename = "Meanings")]
    pub meanings: String,
}

impl EntryRow {
    pub fn from_entry(entry: &EntryResult) -> Self {
        let meanings = entry
            .meanings
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let pos = m
                    .meta
                    .get("pos")
                    .map(|tags| format!("({}) ", tags.join(",")))
                    .unwrap_or_default();
                format!("{}. {}{}", i + 1, pos, m.gloss.join("; "))
            })
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            sequence: entry.sequence,
            written: or_dash(entry.written_texts().join("、")),
            reading: or_dash(entry.phonetic_texts().join("、")),
            meanings: or_dash(meanings),
        }
    }
}

fn or_dash(s: String) -> String {
    if s.is_empty() { "-".to_string() } else { s }
}

pub fn render(result: &QueryResult) -> String {
    let rows: Vec<EntryRow> = result.entries.iter().map(EntryRow::from_entry).collect();
    Table::new(rows).with(Style::psql()).to_string()
}
