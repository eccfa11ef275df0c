//! Bulk-load a word file into the dictionary
//! Usage: cargo run --bin load_words -- <file> [first_id]

use std::fs::File;
use std::io::BufReader;

use wordstore::config::StoreConfig;
use wordstore::{Logger, WordStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let path = match args.get(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: load_words <file> [first_id]");
            std::process::exit(2);
        }
    };
    let first_id: i64 = match args.get(2) {
        Some(id) => id.parse()?,
        None => 1,
    };

    let config = StoreConfig::from_env();
    let logger = Logger::new(&config.log)?;
    let store = WordStore::in_dir(&config.data_dir, &config.db_file, logger);
    println!("Database: {}", store.target());

    let reader = BufReader::new(File::open(path)?);
    let report = store.load_valid_words(reader, first_id);

    println!("Inserted: {}", report.inserted);
    println!("Rejected: {}", report.rejected);
    println!("Failed:   {}", report.failed);
    match report.next_id {
        Some(id) => println!("Next id:  {}", id),
        None => println!("Next id:  none (ids exhausted)"),
    }

    Ok(())
}
