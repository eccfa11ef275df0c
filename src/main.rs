//! WordStore command-line front end
//!
//! Usage: wordstore <create|init|add <id> <word>|check <guess>|status>

use serde::Serialize;

use wordstore::build_info::{self, BuildInfo};
use wordstore::config::StoreConfig;
use wordstore::{Logger, Outcome, WordStore, WordTable};

const USAGE: &str = "usage: wordstore <create | init | add <id> <word> | check <guess> | status>";

#[derive(Debug, Serialize)]
struct StatusReport {
    build: BuildInfo,
    target: String,
    reachable: bool,
    schema_present: bool,
    secret_words: Option<i64>,
    valid_words: Option<i64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env();
    let logger = Logger::new(&config.log)?;

    let store = WordStore::in_dir(&config.data_dir, &config.db_file, logger);
    build_info::print_startup_banner(store.target());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["create"] => report(store.create_database()),
        ["init"] => {
            if store.initialize_schema() {
                println!("Tables reset");
            } else {
                return Err("failed to reset tables".into());
            }
        }
        ["add", id, word] => {
            let id: i64 = id.parse()?;
            report(store.add_valid_word(id, word));
        }
        ["check", guess] => {
            let valid = store.is_valid_word(guess);
            println!("{}: {}", guess, if valid { "valid" } else { "not in dictionary" });
        }
        ["status"] => {
            let status = StatusReport {
                build: BuildInfo::current(),
                target: store.target().to_string(),
                reachable: store.is_reachable(),
                schema_present: store.schema_present(),
                secret_words: store.word_count(WordTable::SecretWords),
                valid_words: store.word_count(WordTable::ValidWords),
            };
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Ok => println!("ok"),
        other => println!("{:?}", other),
    }
}
