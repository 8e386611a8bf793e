use crate::view;
use jdict_core::FileStore;
use std::path::Path;

pub fn run(db_path: &Path, key: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !db_path.exists() {
        eprintln!(
            "No entry store at {}. Run `jdict populate <XML_PATH>` first.",
            db_path.display()
        );
    }
    let store = FileStore::open(db_path)?;
    let result = jdict_core::query(&store, key)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_empty() {
        println!("No entries found for '{}'.", key);
    } else {
        println!("{}", view::render(&result));
    }
    Ok(())
}
