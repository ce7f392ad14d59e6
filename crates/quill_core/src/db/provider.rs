//! Connection acquisition as a scoped resource.
//!
//! # Responsibility
//! - Abstract "give me a ready connection" behind `ConnectionProvider`.
//! - Guarantee release of an acquired connection on every exit path.
//!
//! # Invariants
//! - `with_connection` drops the connection before returning, on success
//!   and on error alike.

use super::{open_db, DbError, DbResult};
use log::{debug, warn};
use rusqlite::Connection;
use std::path::PathBuf;

/// Supplies a ready-to-use, schema-bootstrapped connection per call.
pub trait ConnectionProvider {
    fn acquire(&self) -> DbResult<Connection>;
}

/// Opens a fresh connection to one SQLite file on every `acquire`.
#[derive(Debug, Clone)]
pub struct SqliteFileProvider {
    path: PathBuf,
}

impl SqliteFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConnectionProvider for SqliteFileProvider {
    fn acquire(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }
}

/// Acquires a connection, runs `work` on it and releases it.
///
/// The error type of `work` only needs to absorb `DbError`, so entity-level
/// `RepoError` flows through unchanged.
pub fn with_connection<P, T, E, F>(provider: &P, work: F) -> Result<T, E>
where
    P: ConnectionProvider + ?Sized,
    E: From<DbError>,
    F: FnOnce(&Connection) -> Result<T, E>,
{
    let conn = provider.acquire()?;
    debug!("event=conn_acquire module=db status=ok");
    let result = work(&conn);

    if let Err((_, err)) = conn.close() {
        warn!("event=conn_release module=db status=error error={err}");
    } else {
        debug!("event=conn_release module=db status=ok");
    }

    result
}
