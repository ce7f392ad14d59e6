//! Magazine entity.
//!
//! # Responsibility
//! - Hold one `magazines` row with validated `name` and `category`.
//! - Split the category write into a local step and a persistence step
//!   (`crate::repo::magazine_repo` composes them).
//!
//! # Invariants
//! - `name` is 2..=16 characters; `category` is non-empty.
//! - Both fields are always resident and may be reassigned.
//! - Construction never touches storage.

use super::validation::{
    validate_char_length, validate_non_empty, ValidationError, MAGAZINE_NAME_MAX_CHARS,
    MAGAZINE_NAME_MIN_CHARS,
};
use super::MagazineId;
use std::fmt::{Display, Formatter};

/// In-memory view of one `magazines` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magazine {
    pub(crate) id: MagazineId,
    pub(crate) name: String,
    pub(crate) category: String,
}

impl Magazine {
    /// Creates a magazine after validating `name` and `category`.
    ///
    /// Nothing is written to storage; use `save` to insert the row.
    pub fn new(
        id: MagazineId,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let category = category.into();
        validate_name(&name)?;
        validate_category(&category)?;
        Ok(Self { id, name, category })
    }

    pub fn id(&self) -> MagazineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Replaces the in-memory name. No storage side effect.
    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validate_name(&value)?;
        self.name = value;
        Ok(())
    }

    /// Validates `value` and assigns it as the in-memory category.
    ///
    /// This is only the local half of a category write; see
    /// `Magazine::set_category` for the persisting setter.
    pub fn store_category_locally(
        &mut self,
        value: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let value = value.into();
        validate_category(&value)?;
        self.category = value;
        Ok(())
    }
}

impl Display for Magazine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Magazine {}>", self.name)
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    validate_char_length("name", name, MAGAZINE_NAME_MIN_CHARS, MAGAZINE_NAME_MAX_CHARS)
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    validate_non_empty("category", category)
}
