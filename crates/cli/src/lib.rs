mod populate;
mod search;
mod serve;
mod store;
mod view;

use clap::{Parser, Subcommand};
use jdict_core::config::Settings;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jdict",
    version,
    about = "Japanese-English dictionary lookup",
    long_about = "jdict indexes a JMdict XML dump into a local entry store. Any written form, \
                  reading or sense of an entry is a lookup key, and a lookup returns the forms \
                  and senses that co-occur with the key inside each matching entry."
)]
pub struct Cli {
    /// Entry store file. Defaults to $JDICT_DB, then ~/.jdict/jdict.db
    #[arg(long, global = true, value_name = "DB_PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a JMdict XML file and rebuild the entry store from it
    Populate {
        /// Path to the JMdict XML document
        #[arg(value_name = "XML_PATH")]
        xml: PathBuf,
    },
    /// Look a key up and print the matching entries
    Search {
        /// Written form, reading or sense id
        key: String,
        /// Print the raw JSON result instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Serve lookups over HTTP (GET /query/{key})
    Serve {
        #[arg(long, default_value = jdict_server::DEFAULT_ADDR)]
        addr: SocketAddr,
    },
    /// Show entry store statistics
    Stats,
    /// Delete the entry store
    Clear,
    /// Print the JSON schema of a lookup result
    Schema,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.db.clone());

    let (component, to_stderr) = match &cli.command {
        Commands::Serve { .. } => ("server", true),
        Commands::Populate { .. } => ("cli", true),
        _ => ("cli", false),
    };
    let _guard = jdict_core::logging::init_logging(component, &settings.log_dir, to_stderr);

    match cli.command {
        Commands::Populate { xml } => {
            let stats = populate::run(&settings.db_path, &xml)?;
            println!(
                "Indexed {} entries ({} skipped, {} keys) into {}",
                stats.indexed,
                stats.skipped,
                stats.keys,
                settings.db_path.display()
            );
            Ok(())
        }
        Commands::Search { key, json } => search::run(&settings.db_path, &key, json),
        Commands::Serve { addr } => serve::run(&settings.db_path, addr),
        Commands::Stats => store::stats(&settings.db_path),
        Commands::Clear => store::clear(&settings.db_path),
        Commands::Schema => {
            let schema = schemars::schema_for!(jdict_api::models::QueryResult);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}
