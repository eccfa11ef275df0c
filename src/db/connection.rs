//! Database connection management
//!
//! Every operation opens its own SQLite connection and drops it before
//! returning. Nothing is pooled or cached between calls.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

/// Directory the database file lives in unless told otherwise
pub const DEFAULT_DATA_DIR: &str = "sqlite";

/// Database error types
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database target not configured")]
    NotConfigured,

    #[error("Database connection error: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("SQLite error: {0}")]
    Statement(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Identity of a single database file
#[derive(Debug, Clone, Default)]
pub struct Database {
    target: String,
}

impl Database {
    /// Bind to `file_name` inside the default data directory
    pub fn new(file_name: &str) -> Self {
        Self::in_dir(DEFAULT_DATA_DIR, file_name)
    }

    /// Bind to `file_name` inside `dir`. An empty file name leaves the
    /// target unconfigured.
    pub fn in_dir<P: AsRef<Path>>(dir: P, file_name: &str) -> Self {
        if file_name.is_empty() {
            return Self::unconfigured();
        }
        Self {
            target: dir.as_ref().join(file_name).to_string_lossy().into_owned(),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            target: String::new(),
        }
    }

    /// The connection target (path of the database file)
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_configured(&self) -> bool {
        !self.target.is_empty()
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.is_configured().then(|| PathBuf::from(&self.target))
    }

    /// Create the directory holding the database file if it is missing
    pub fn ensure_parent_dir(&self) -> DbResult<()> {
        let path = self.path().ok_or(DbError::NotConfigured)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Open a fresh connection. SQLite creates the file if it does not exist.
    pub fn open(&self) -> DbResult<Connection> {
        if !self.is_configured() {
            return Err(DbError::NotConfigured);
        }
        Connection::open_with_flags(
            &self.target,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(DbError::Connection)
    }

    /// Execute a closure with a connection that is closed when the closure
    /// returns, whether it succeeded or not
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.open()?;
        f(&conn)
    }
}
