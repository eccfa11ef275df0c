//! Table definitions
//!
//! The two word tables are never migrated, only dropped and recreated.

use rusqlite::Connection;

use super::connection::DbResult;

pub const WORDLIST_DROP: &str = "DROP TABLE IF EXISTS wordlist;";
pub const WORDLIST_CREATE: &str = "CREATE TABLE wordlist (
 id integer PRIMARY KEY,
 word text NOT NULL
);";

pub const VALID_WORDS_DROP: &str = "DROP TABLE IF EXISTS validWords;";
pub const VALID_WORDS_CREATE: &str = "CREATE TABLE validWords (
 id integer PRIMARY KEY,
 word text NOT NULL
);";

/// Statements run by [`reset_tables`], in execution order
pub const RESET_SEQUENCE: [&str; 4] = [
    WORDLIST_DROP,
    WORDLIST_CREATE,
    VALID_WORDS_DROP,
    VALID_WORDS_CREATE,
];

/// Drop and recreate both word tables.
///
/// Statements run one at a time with no enclosing transaction, so a failure
/// partway leaves whatever the earlier statements produced.
pub fn reset_tables(conn: &Connection) -> DbResult<()> {
    for sql in RESET_SEQUENCE {
        tracing::trace!(sql, "executing schema statement");
        conn.execute(sql, [])?;
    }
    Ok(())
}

/// Whether a table with this exact name exists
pub fn table_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
