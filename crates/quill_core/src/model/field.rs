//! Lazy, memoized field wrappers.
//!
//! # Responsibility
//! - Model the unloaded / loaded lifecycle of a persisted column.
//! - Enforce one-time assignment where the entity requires it.
//!
//! # Invariants
//! - A loader runs only while the field is unloaded; a loaded value
//!   short-circuits every later read.
//! - A failed load or a rejected write leaves the field unloaded, so the
//!   next read retries storage.
//! - `OnceField` never transitions out of loaded.

use super::validation::{FieldError, ImmutableFieldError, ValidationError};
use once_cell::unsync::OnceCell;

/// One-time-settable field: the first write or load wins.
#[derive(Debug, Clone)]
pub struct OnceField<T> {
    name: &'static str,
    cell: OnceCell<T>,
}

impl<T> OnceField<T> {
    /// Creates an unloaded field.
    pub fn unloaded(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    /// Creates a field already locked to `value`.
    pub fn loaded(name: &'static str, value: T) -> Self {
        Self {
            name,
            cell: OnceCell::from(value),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Locks the field to `value`.
    ///
    /// # Errors
    /// - `ImmutableFieldError` when the field was already set or loaded.
    pub fn set_once(&self, value: T) -> Result<(), ImmutableFieldError> {
        self.cell
            .set(value)
            .map_err(|_| ImmutableFieldError { field: self.name })
    }

    /// Validates `value` and locks the field to it.
    ///
    /// The lock is checked before validation, so a second write reports
    /// `Immutable` even when the new value is also invalid.
    pub fn set_once_validated(
        &self,
        value: T,
        validate: impl FnOnce(&T) -> Result<(), ValidationError>,
    ) -> Result<(), FieldError> {
        if self.is_loaded() {
            return Err(ImmutableFieldError { field: self.name }.into());
        }
        validate(&value)?;
        self.set_once(value)?;
        Ok(())
    }

    /// Returns the resident value, running `load` first when unloaded.
    pub fn get_or_try_load<E>(&self, load: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        self.cell.get_or_try_init(load)
    }
}

/// Re-assignable lazy field: loaded on first read, overwritten by `set`.
#[derive(Debug, Clone)]
pub struct LazyField<T> {
    cell: OnceCell<T>,
}

impl<T> LazyField<T> {
    pub fn unloaded() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn loaded(value: T) -> Self {
        Self {
            cell: OnceCell::from(value),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn set(&mut self, value: T) {
        self.cell = OnceCell::from(value);
    }

    pub fn get_or_try_load<E>(&self, load: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        self.cell.get_or_try_init(load)
    }
}
