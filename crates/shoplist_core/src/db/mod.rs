//! SQLite storage bootstrap, schema migrations and the shared database handle.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Apply schema migrations in deterministic order.
//! - Serialize statement execution and publish table invalidations.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No application data is read/written before migrations succeed.
//! - Invalidation is published only for writes that returned `Ok`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

pub mod invalidation;
pub mod migrations;
mod open;

pub use invalidation::{InvalidationTracker, Table};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Cloneable handle to the one migrated connection plus its invalidation tracker.
///
/// Every statement runs under the async lock, so reads and writes issued from
/// different tasks are serialized by the store.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    tracker: Arc<InvalidationTracker>,
}

impl Database {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            tracker: Arc::new(InvalidationTracker::new()),
        }
    }

    pub fn tracker(&self) -> &InvalidationTracker {
        &self.tracker
    }

    /// Runs a read-only closure against the connection.
    ///
    /// The closure runs on the calling async worker while the lock is held;
    /// statements here are short single-table queries.
    pub async fn read<T, E, F>(&self, query: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E> + Send,
    {
        let conn = self.conn.lock().await;
        query(&conn)
    }

    /// Runs a mutating closure, then invalidates `tables` if it succeeded.
    pub async fn write<T, E, F>(&self, tables: &[Table], mutation: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E> + Send,
    {
        let result = {
            let mut conn = self.conn.lock().await;
            mutation(&mut conn)
        };
        if result.is_ok() {
            self.tracker.notify(tables);
        }
        result
    }
}
