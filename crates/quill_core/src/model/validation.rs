//! Field validators and validation/immutability errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Article title bounds, in characters.
pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 50;
/// Magazine name bounds, in characters.
pub const MAGAZINE_NAME_MIN_CHARS: usize = 2;
pub const MAGAZINE_NAME_MAX_CHARS: usize = 16;

/// Constraint a field value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value must contain at least one character.
    NonEmpty,
    /// Value length must fall in `min..=max` characters.
    CharLength { min: usize, max: usize },
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonEmpty => write!(f, "must not be empty"),
            Self::CharLength { min, max } => {
                write!(f, "must be between {min} and {max} characters")
            }
        }
    }
}

/// A field value rejected on assignment or construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub constraint: Constraint,
    /// Length of the rejected value, in characters.
    pub actual_len: usize,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (got {} characters)",
            self.field, self.constraint, self.actual_len
        )
    }
}

impl Error for ValidationError {}

/// A second write to a one-time-settable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutableFieldError {
    pub field: &'static str,
}

impl Display for ImmutableFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} cannot be changed after it is set", self.field)
    }
}

impl Error for ImmutableFieldError {}

/// Failure of a one-time setter: bad value, or field already set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Validation(ValidationError),
    Immutable(ImmutableFieldError),
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Immutable(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Immutable(err) => Some(err),
        }
    }
}

impl From<ValidationError> for FieldError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ImmutableFieldError> for FieldError {
    fn from(value: ImmutableFieldError) -> Self {
        Self::Immutable(value)
    }
}

/// Rejects empty strings.
pub fn validate_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError {
            field,
            constraint: Constraint::NonEmpty,
            actual_len: 0,
        });
    }
    Ok(())
}

/// Rejects strings whose character count falls outside `min..=max`.
pub fn validate_char_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if !(min..=max).contains(&len) {
        return Err(ValidationError {
            field,
            constraint: Constraint::CharLength { min, max },
            actual_len: len,
        });
    }
    Ok(())
}
