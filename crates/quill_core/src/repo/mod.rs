//! Storage-backed entity operations.
//!
//! # Responsibility
//! - Lazy field loads, inserts, the category update and relationship
//!   queries for the three entities.
//! - Map rows back into validated entity instances.
//!
//! # Invariants
//! - Every operation runs exactly one statement on the borrowed connection.
//! - Lookups that yield no row return `RepoError::NotFound` carrying the
//!   entity, field and id; they never fall back to defaults.
//! - Rows that fail entity validation are rejected as `InvalidData`
//!   instead of being masked.

use crate::db::DbError;
use crate::model::validation::{FieldError, ImmutableFieldError, ValidationError};
use rusqlite::{Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article_repo;
pub mod author_repo;
pub mod magazine_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by every storage-touching entity operation.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Immutable(ImmutableFieldError),
    /// A lookup or join by id yielded no row. `id` is `None` for an entity
    /// that was never saved.
    NotFound {
        entity: &'static str,
        field: &'static str,
        id: Option<i64>,
    },
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Immutable(err) => write!(f, "{err}"),
            Self::NotFound {
                entity,
                field,
                id: Some(id),
            } => write!(f, "{entity} {field} not found for id {id}"),
            Self::NotFound {
                entity,
                field,
                id: None,
            } => write!(f, "{entity} {field} not found: {entity} has no id"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Immutable(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ImmutableFieldError> for RepoError {
    fn from(value: ImmutableFieldError) -> Self {
        Self::Immutable(value)
    }
}

impl From<FieldError> for RepoError {
    fn from(value: FieldError) -> Self {
        match value {
            FieldError::Validation(err) => Self::Validation(err),
            FieldError::Immutable(err) => Self::Immutable(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Runs one query and parses every row, in the order storage returns them.
pub(crate) fn query_all<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut parsed = Vec::new();

    while let Some(row) = rows.next()? {
        parsed.push(parse(row)?);
    }

    Ok(parsed)
}

/// Converts a validation failure on a hydrated row into `InvalidData`.
pub(crate) fn invalid_row(table: &str, id: i64, err: ValidationError) -> RepoError {
    RepoError::InvalidData(format!("{table} row {id}: {err}"))
}
