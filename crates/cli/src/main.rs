fn main() {
    if let Err(e) = jdict_cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
