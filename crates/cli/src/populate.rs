use jdict_core::{FileStore, PopulateStats};
use jdict_ingest::JmdictReader;
use std::path::Path;
use tracing::info;

/// Rebuild the store at `db_path` from the JMdict document at `xml`.
pub fn run(db_path: &Path, xml: &Path) -> Result<PopulateStats, Box<dyn std::error::Error>> {
    let reader = JmdictReader::open(xml)?;
    info!("Populating {} from {}...", db_path.display(), xml.display());

    let mut store = FileStore::create(db_path);
    let stats = jdict_core::populate(&mut store, reader)?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdict_core::EntryStore;

    const XML: &str = "<JMdict>\
        <entry><ent_seq>1</ent_seq><k_ele><keb>日</keb></k_ele>\
        <r_ele><reb>ひ</reb></r_ele><sense><gloss>day</gloss></sense></entry>\
        <entry><ent_seq>2</ent_seq><r_ele><reb>ひ</reb></r_ele>\
        <sense><stagk>火</stagk><gloss>fire</gloss></sense></entry>\
        </JMdict>";

    #[test]
    fn test_populate_skips_malformed_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let xml = dir.path().join("JMdict.xml");
        std::fs::write(&xml, XML).unwrap();
        let db = dir.path().join("nested").join("jdict.db");

        let stats = run(&db, &xml).unwrap();
        assert_eq!(stats.indexed, 1);
        assert_eq!(stats.skipped, 1);

        let store = FileStore::open(&db).unwrap();
        assert_eq!(store.stats().entries, 1);
        let result = jdict_core::query(&store, "ひ").unwrap();
        assert_eq!(result.entries[0].written_texts(), vec!["日"]);
    }

    #[test]
    fn test_truncated_xml_keeps_previous_store() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.xml");
        let truncated = dir.path().join("truncated.xml");
        std::fs::write(&good, XML).unwrap();
        std::fs::write(
            &truncated,
            "<JMdict><entry><ent_seq>3</ent_seq><k_ele><keb>月</keb>",
        )
        .unwrap();
        let db = dir.path().join("jdict.db");

        run(&db, &good).unwrap();
        assert!(run(&db, &truncated).is_err());

        let store = FileStore::open(&db).unwrap();
        assert_eq!(store.stats().entries, 1);
        let result = jdict_core::query(&store, "日").unwrap();
        assert_eq!(result.entries[0].glosses(), vec![vec!["day"]]);
        assert!(jdict_core::query(&store, "月").unwrap().is_empty());
    }

    #[test]
    fn test_missing_xml_leaves_store_alone() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("jdict.db");
        std::fs::write(&db, b"keep").unwrap();

        assert!(run(&db, &dir.path().join("missing.xml")).is_err());
        assert_eq!(std::fs::read(&db).unwrap(), b"keep");
    }
}
