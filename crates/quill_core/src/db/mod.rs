//! SQLite storage bootstrap and connection scoping.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the quill core.
//! - Bootstrap the `authors` / `magazines` / `articles` schema.
//! - Hand connections to callers as scoped resources.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Entity code must not read/write rows before the schema is bootstrapped.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod provider;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use provider::{with_connection, ConnectionProvider, SqliteFileProvider};

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
