use jdict_core::{EntryStore, FileStore};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub fn run(db_path: &Path, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    if !db_path.exists() {
        warn!("No entry store at {}, every lookup will be empty", db_path.display());
    }
    let store = FileStore::open(db_path)?;
    let stats = store.stats();
    info!("Serving {} entries / {} keys", stats.entries, stats.keys);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(jdict_server::serve(addr, Arc::new(store)))?;
    Ok(())
}
