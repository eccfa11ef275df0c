//! Word model
//!
//! Rows of the `wordlist` and `validWords` tables share one shape.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// Exactly four lowercase ASCII letters
static ACCEPTABLE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{4}$").expect("Invalid word regex"));

/// Whether `word` may be stored in the dictionary
pub fn is_acceptable_word(word: &str) -> bool {
    ACCEPTABLE_WORD.is_match(word)
}

/// Which of the two word tables to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordTable {
    /// Candidate answers (`wordlist`)
    SecretWords,
    /// Accepted guesses (`validWords`)
    ValidWords,
}

impl WordTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordTable::SecretWords => "wordlist",
            WordTable::ValidWords => "validWords",
        }
    }
}

/// A single stored word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRow {
    pub id: i64,
    pub word: String,
}

impl WordRow {
    #[cfg(test)]
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            word: row.get("word")?,
        })
    }

    /// Insert a row. A duplicate id fails with a constraint error.
    pub fn insert(conn: &Connection, table: WordTable, id: i64, word: &str) -> DbResult<()> {
        let sql = format!("INSERT INTO {}(id, word) VALUES (?1, ?2)", table.as_str());
        conn.execute(&sql, params![id, word])?;
        Ok(())
    }

    /// Get a row by ID
    #[cfg(test)]
    pub fn get_by_id(conn: &Connection, table: WordTable, id: i64) -> DbResult<Option<Self>> {
        let sql = format!("SELECT id, word FROM {} WHERE id = ?1", table.as_str());
        let mut stmt = conn.prepare(&sql)?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Count rows whose word matches `pattern` under SQLite `LIKE`.
    ///
    /// `%` and `_` in the pattern act as wildcards and ASCII case is folded.
    /// Returns `None` if the query yields no row at all.
    pub fn count_like(conn: &Connection, table: WordTable, pattern: &str) -> DbResult<Option<i64>> {
        let sql = format!(
            "SELECT count(id) AS total FROM {} WHERE word LIKE ?1",
            table.as_str()
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([pattern])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get("total")?)),
            None => Ok(None),
        }
    }

    /// Count all rows in a table
    pub fn count(conn: &Connection, table: WordTable) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }
}
