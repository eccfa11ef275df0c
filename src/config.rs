//! Runtime configuration
//!
//! Read from environment variables by the binaries.

use std::path::PathBuf;

use tracing_subscriber::filter::LevelFilter;

use crate::db::DEFAULT_DATA_DIR;
use crate::logging::{LogConfig, DEFAULT_LOG_FILE};

pub const DEFAULT_DB_FILE: &str = "words.db";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub db_file: String,
    pub log: LogConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            db_file: DEFAULT_DB_FILE.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Build from `WORDSTORE_*` environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("WORDSTORE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let db_file = lookup("WORDSTORE_DB").unwrap_or(defaults.db_file);

        // An empty value switches the file sink off
        let file = match lookup("WORDSTORE_LOG_FILE") {
            Some(path) if path.is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        };
        let console = lookup("WORDSTORE_LOG").or(defaults.log.console);

        Self {
            data_dir,
            db_file,
            log: LogConfig {
                file,
                file_level: LevelFilter::TRACE,
                console,
            },
        }
    }
}
