use jdict_core::{EntryStore, FileStore};
use std::path::Path;
use tracing::info;

pub fn stats(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !db_path.exists() {
        println!("No entry store at {}", db_path.display());
        return Ok(());
    }
    let store = FileStore::open(db_path)?;
    let stats = store.stats();
    println!("Store:   {}", db_path.display());
    println!("Entries: {}", stats.entries);
    println!("Keys:    {}", stats.keys);
    Ok(())
}

pub fn clear(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!("Clearing entry store at: {}...", db_path.display());
    if FileStore::remove(db_path)? {
        println!("Entry store removed.");
    } else {
        println!("No entry store at {}", db_path.display());
    }
    Ok(())
}
