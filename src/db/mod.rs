//! Database module
//!
//! Handles SQLite connections and the table definitions.

pub mod connection;
pub mod schema;

pub use connection::{Database, DbError, DbResult, DEFAULT_DATA_DIR};
