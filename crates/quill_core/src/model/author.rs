//! Author entity.
//!
//! # Invariants
//! - `id` never changes after construction.
//! - `name` is non-empty whenever resident; writes always re-validate and
//!   are never locked.

use super::field::LazyField;
use super::validation::{validate_non_empty, ValidationError};
use super::AuthorId;
use std::fmt::{Display, Formatter};

/// In-memory view of one `authors` row.
#[derive(Debug, Clone)]
pub struct Author {
    pub(crate) id: AuthorId,
    pub(crate) name: LazyField<String>,
}

impl Author {
    /// Creates an author with a known name.
    ///
    /// # Errors
    /// - `ValidationError` when `name` is empty.
    pub fn new(id: AuthorId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id,
            name: LazyField::loaded(name),
        })
    }

    /// Creates a handle to a stored author; `name` loads on first read.
    pub fn reference(id: AuthorId) -> Self {
        Self {
            id,
            name: LazyField::unloaded(),
        }
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn loaded_name(&self) -> Option<&str> {
        self.name.get().map(String::as_str)
    }

    /// Replaces the name after validation. A rejected value leaves the
    /// current name untouched.
    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validate_name(&value)?;
        self.name.set(value);
        Ok(())
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.loaded_name() {
            Some(name) => write!(f, "<Author {name}>"),
            None => write!(f, "<Author #{}>", self.id),
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    validate_non_empty("name", name)
}
