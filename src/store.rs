//! Word store
//!
//! The public face of the crate. Each operation opens its own connection,
//! contains every failure, logs it, and hands back a plain value.

use std::io::BufRead;
use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::db::{schema, Database, DbError};
use crate::logging::Logger;
use crate::models::{is_acceptable_word, WordRow, WordTable};

/// How an operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    /// No database target was set
    NotConfigured,
    /// The database could not be opened
    ConnectionFailed,
    /// A statement failed (bad SQL, constraint violation, I/O)
    StatementFailed,
    /// Input failed validation and never reached the database
    Rejected,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }
}

impl From<&DbError> for Outcome {
    fn from(err: &DbError) -> Self {
        match err {
            DbError::NotConfigured => Outcome::NotConfigured,
            DbError::Connection(_) => Outcome::ConnectionFailed,
            DbError::Statement(_) | DbError::Io(_) => Outcome::StatementFailed,
        }
    }
}

/// Tally from [`WordStore::load_valid_words`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub inserted: usize,
    pub rejected: usize,
    pub failed: usize,
    /// Id the next load should start from, `None` once ids are exhausted
    pub next_id: Option<i64>,
}

/// Manages the word tables of one SQLite file
#[derive(Debug, Clone)]
pub struct WordStore {
    database: Database,
    logger: Logger,
}

impl WordStore {
    /// Bind to `file_name` in the default `sqlite/` directory. No I/O.
    pub fn new(file_name: &str, logger: Logger) -> Self {
        Self {
            database: Database::new(file_name),
            logger,
        }
    }

    /// Bind to `file_name` in `dir`. No I/O.
    pub fn in_dir<P: AsRef<Path>>(dir: P, file_name: &str, logger: Logger) -> Self {
        Self {
            database: Database::in_dir(dir, file_name),
            logger,
        }
    }

    pub fn target(&self) -> &str {
        self.database.target()
    }

    /// Make sure the database file exists. Safe to call repeatedly.
    pub fn create_database(&self) -> Outcome {
        self.logger.in_scope(|| {
            let result = self.database.ensure_parent_dir().and_then(|()| {
                self.database.with_conn(|conn| {
                    let version: String =
                        conn.query_row("SELECT sqlite_version()", [], |row| row.get(0))?;
                    Ok(version)
                })
            });

            match result {
                Ok(version) => {
                    info!("The driver name is SQLite {}", version);
                    info!(path = %self.database.target(), "A new database has been created.");
                    Outcome::Ok
                }
                Err(e) => {
                    error!(error = %e, "Failed to create new database.");
                    Outcome::from(&e)
                }
            }
        })
    }

    /// Whether a connection to the target can be opened
    pub fn is_reachable(&self) -> bool {
        if !self.database.is_configured() {
            return false;
        }
        self.logger.in_scope(|| match self.database.open() {
            Ok(conn) => {
                drop(conn);
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to establish a database connection.");
                false
            }
        })
    }

    /// Drop and recreate both word tables, leaving them empty
    pub fn initialize_schema(&self) -> bool {
        if !self.database.is_configured() {
            return false;
        }
        self.logger.in_scope(|| {
            match self.database.with_conn(schema::reset_tables) {
                Ok(()) => {
                    info!("Tables created successfully.");
                    true
                }
                Err(e) => {
                    error!(error = %e, "Failed to create tables.");
                    false
                }
            }
        })
    }

    /// Store `word` in the dictionary under `id`.
    ///
    /// Anything other than four lowercase ASCII letters is rejected before
    /// the database is touched. A duplicate id fails as a statement error.
    pub fn add_valid_word(&self, id: i64, word: &str) -> Outcome {
        self.logger.in_scope(|| {
            if !is_acceptable_word(word) {
                warn!("Invalid input attempt: {}", word);
                println!("Ignoring unacceptable input: {}", word);
                return Outcome::Rejected;
            }

            let result = self
                .database
                .with_conn(|conn| WordRow::insert(conn, WordTable::ValidWords, id, word));

            match result {
                Ok(()) => {
                    info!(id, "Added valid word to database: {}", word);
                    Outcome::Ok
                }
                Err(e) => {
                    error!(id, word, error = %e, "SQL error when trying to add a valid word");
                    Outcome::from(&e)
                }
            }
        })
    }

    /// Whether `guess` matches a dictionary word.
    ///
    /// Matching uses SQLite `LIKE`: `%` and `_` are wildcards and ASCII case
    /// is ignored. Validate the guess first if exact matching matters.
    pub fn is_valid_word(&self, guess: &str) -> bool {
        let result = self
            .database
            .with_conn(|conn| WordRow::count_like(conn, WordTable::ValidWords, guess));

        match result {
            Ok(Some(total)) => total >= 1,
            Ok(None) => false,
            Err(e) => {
                println!("{}", e);
                false
            }
        }
    }

    /// Number of rows in `table`, or `None` if it could not be counted
    pub fn word_count(&self, table: WordTable) -> Option<i64> {
        self.logger.in_scope(|| {
            match self.database.with_conn(|conn| WordRow::count(conn, table)) {
                Ok(count) => Some(count),
                Err(e) => {
                    error!(table = table.as_str(), error = %e, "Failed to count words");
                    None
                }
            }
        })
    }

    /// Whether both word tables exist
    pub fn schema_present(&self) -> bool {
        self.logger.in_scope(|| {
            let result = self.database.with_conn(|conn| {
                Ok(schema::table_exists(conn, WordTable::SecretWords.as_str())?
                    && schema::table_exists(conn, WordTable::ValidWords.as_str())?)
            });
            match result {
                Ok(present) => present,
                Err(e) => {
                    error!(error = %e, "Failed to inspect schema");
                    false
                }
            }
        })
    }

    /// Feed every non-blank line of `reader` through [`Self::add_valid_word`]
    /// with consecutive ids starting at `first_id`
    pub fn load_valid_words<R: BufRead>(&self, reader: R, first_id: i64) -> LoadReport {
        let mut report = LoadReport {
            next_id: Some(first_id),
            ..LoadReport::default()
        };

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    self.logger
                        .in_scope(|| error!(error = %e, "Failed to read word list"));
                    report.failed += 1;
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }

            let id = match report.next_id {
                Some(id) => id,
                None => {
                    report.failed += 1;
                    continue;
                }
            };

            match self.add_valid_word(id, word) {
                Outcome::Ok => report.inserted += 1,
                Outcome::Rejected => {
                    report.rejected += 1;
                    continue;
                }
                _ => report.failed += 1,
            }

            report.next_id = id.checked_add(1);
            if report.next_id.is_none() {
                self.logger
                    .in_scope(|| error!(last_id = id, "Word ids exhausted, skipping remaining lines"));
            }
        }

        self.logger.in_scope(|| {
            info!(
                inserted = report.inserted,
                rejected = report.rejected,
                failed = report.failed,
                "Finished loading valid words"
            )
        });
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (WordStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::in_dir(dir.path(), "words.db", Logger::disabled());
        (store, dir)
    }

    #[test]
    fn test_outcome_from_error() {
        assert_eq!(Outcome::from(&DbError::NotConfigured), Outcome::NotConfigured);
        assert_eq!(
            Outcome::from(&DbError::Statement(rusqlite::Error::QueryReturnedNoRows)),
            Outcome::StatementFailed
        );
        assert!(Outcome::Ok.is_ok());
        assert!(!Outcome::Rejected.is_ok());
    }

    #[test]
    fn test_target_in_dir() {
        let (store, dir) = test_store();
        assert_eq!(
            store.target(),
            dir.path().join("words.db").to_string_lossy()
        );
    }

    #[test]
    fn test_new_uses_sqlite_dir() {
        let store = WordStore::new("game.db", Logger::disabled());
        assert_eq!(
            Path::new(store.target()),
            Path::new("sqlite").join("game.db")
        );
    }

    #[test]
    fn test_create_database_is_idempotent() {
        let (store, dir) = test_store();
        assert_eq!(store.create_database(), Outcome::Ok);
        assert!(dir.path().join("words.db").exists());
        assert_eq!(store.create_database(), Outcome::Ok);
    }

    #[test]
    fn test_create_database_makes_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sqlite");
        let store = WordStore::in_dir(&nested, "words.db", Logger::disabled());
        assert_eq!(store.create_database(), Outcome::Ok);
        assert!(nested.join("words.db").exists());
    }

    #[test]
    fn test_create_database_unconfigured() {
        let store = WordStore::new("", Logger::disabled());
        assert_eq!(store.create_database(), Outcome::NotConfigured);
    }

    #[test]
    fn test_unconfigured_store() {
        let store = WordStore::new("", Logger::disabled());
        assert_eq!(store.target(), "");
        assert!(!store.is_reachable());
        assert!(!store.initialize_schema());
        assert_eq!(store.add_valid_word(1, "wind"), Outcome::NotConfigured);
        assert!(!store.is_valid_word("wind"));
    }

    #[test]
    fn test_unreachable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::in_dir(dir.path().join("absent"), "words.db", Logger::disabled());
        assert!(!store.is_reachable());
        assert!(!store.initialize_schema());
        assert_eq!(store.add_valid_word(1, "wind"), Outcome::ConnectionFailed);
        assert!(!store.is_valid_word("wind"));
    }

    #[test]
    fn test_add_before_schema_fails() {
        let (store, _dir) = test_store();
        assert_eq!(store.add_valid_word(1, "wind"), Outcome::StatementFailed);
        assert!(!store.is_valid_word("wind"));
        assert_eq!(store.word_count(WordTable::ValidWords), None);
    }

    #[test]
    fn test_rejected_word_not_inserted() {
        let (store, _dir) = test_store();
        assert!(store.initialize_schema());
        for word in ["GUST", "win", "winds", "w1nd", "%%%%", "wi d", ""] {
            assert_eq!(store.add_valid_word(1, word), Outcome::Rejected, "{:?}", word);
        }
        assert_eq!(store.word_count(WordTable::ValidWords), Some(0));
    }

    #[test]
    fn test_load_valid_words() {
        let (store, _dir) = test_store();
        assert!(store.initialize_schema());

        let input = "wind\n\n  gust  \nGALE\nrain\n";
        let report = store.load_valid_words(input.as_bytes(), 10);
        assert_eq!(
            report,
            LoadReport {
                inserted: 3,
                rejected: 1,
                failed: 0,
                next_id: Some(13),
            }
        );

        let row = store
            .database
            .with_conn(|conn| WordRow::get_by_id(conn, WordTable::ValidWords, 11))
            .unwrap();
        assert_eq!(row.map(|r| r.word), Some("gust".to_string()));
    }

    #[test]
    fn test_load_skips_taken_ids() {
        let (store, _dir) = test_store();
        assert!(store.initialize_schema());
        assert_eq!(store.add_valid_word(2, "wind"), Outcome::Ok);

        let report = store.load_valid_words("gust\nrain\nhail\n".as_bytes(), 1);
        assert_eq!(report.inserted, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(store.word_count(WordTable::ValidWords), Some(3));
        assert!(store.is_valid_word("wind"));
        assert!(!store.is_valid_word("rain"));
    }

    #[test]
    fn test_load_at_max_id_does_not_overflow() {
        let (store, _dir) = test_store();
        assert!(store.initialize_schema());

        let report = store.load_valid_words("wind
gust

GALE
rain
".as_bytes(), i64::MAX);
        assert_eq!(
            report,
            LoadReport {
                inserted: 1,
                rejected: 0,
                failed: 3,
                next_id: None,
            }
        );
        assert!(store.is_valid_word("wind"));
        assert_eq!(store.word_count(WordTable::ValidWords), Some(1));
    }

    #[test]
    fn test_schema_present() {
        let (store, _dir) = test_store();
        assert!(!store.schema_present());
        assert!(store.initialize_schema());
        assert!(store.schema_present());

        let unconfigured = WordStore::new("", Logger::disabled());
        assert!(!unconfigured.schema_present());
    }
}
