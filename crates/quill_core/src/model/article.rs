//! Article entity.
//!
//! # Responsibility
//! - Hold one `articles` row with lazily loaded `title` / `content`.
//! - Cache the derived author and magazine names once resolved.
//!
//! # Invariants
//! - `title` and `content` are one-time-settable: the first write or the
//!   first successful load wins for the lifetime of the instance.
//! - `title` is 5..=50 characters; `content` is unconstrained.
//! - `id` is `None` until the row is inserted by `save`.

use super::field::OnceField;
use super::validation::{
    validate_char_length, FieldError, ValidationError, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
use super::{ArticleId, AuthorId, MagazineId};
use std::fmt::{Display, Formatter};

/// In-memory view of one `articles` row.
#[derive(Debug, Clone)]
pub struct Article {
    pub(crate) id: Option<ArticleId>,
    pub(crate) title: OnceField<String>,
    pub(crate) content: OnceField<String>,
    pub(crate) author_id: AuthorId,
    pub(crate) magazine_id: MagazineId,
    pub(crate) author_name: OnceField<String>,
    pub(crate) magazine_name: OnceField<String>,
}

impl Article {
    /// Creates an unsaved article. `save` assigns the id.
    ///
    /// # Errors
    /// - `ValidationError` when `title` is not 5..=50 characters.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: AuthorId,
        magazine_id: MagazineId,
    ) -> Result<Self, ValidationError> {
        Self::build(None, title.into(), content.into(), author_id, magazine_id)
    }

    /// Creates an article for a row whose id is already known.
    pub fn with_id(
        id: ArticleId,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: AuthorId,
        magazine_id: MagazineId,
    ) -> Result<Self, ValidationError> {
        Self::build(
            Some(id),
            title.into(),
            content.into(),
            author_id,
            magazine_id,
        )
    }

    /// Creates a handle to a stored row; `title` and `content` load on
    /// first read.
    pub fn reference(id: ArticleId, author_id: AuthorId, magazine_id: MagazineId) -> Self {
        Self {
            id: Some(id),
            title: OnceField::unloaded("title"),
            content: OnceField::unloaded("content"),
            author_id,
            magazine_id,
            author_name: OnceField::unloaded("author"),
            magazine_name: OnceField::unloaded("magazine"),
        }
    }

    fn build(
        id: Option<ArticleId>,
        title: String,
        content: String,
        author_id: AuthorId,
        magazine_id: MagazineId,
    ) -> Result<Self, ValidationError> {
        validate_title(&title)?;
        Ok(Self {
            id,
            title: OnceField::loaded("title", title),
            content: OnceField::loaded("content", content),
            author_id,
            magazine_id,
            author_name: OnceField::unloaded("author"),
            magazine_name: OnceField::unloaded("magazine"),
        })
    }

    pub fn id(&self) -> Option<ArticleId> {
        self.id
    }

    pub fn author_id(&self) -> AuthorId {
        self.author_id
    }

    pub fn magazine_id(&self) -> MagazineId {
        self.magazine_id
    }

    /// Returns the title when it is resident, without touching storage.
    pub fn loaded_title(&self) -> Option<&str> {
        self.title.get().map(String::as_str)
    }

    /// Returns the content when it is resident, without touching storage.
    pub fn loaded_content(&self) -> Option<&str> {
        self.content.get().map(String::as_str)
    }

    /// Sets the title if it has never been set or loaded.
    ///
    /// # Errors
    /// - `FieldError::Immutable` on any second write.
    /// - `FieldError::Validation` when the value is not 5..=50 characters;
    ///   the field stays unset.
    pub fn set_title(&mut self, value: impl Into<String>) -> Result<(), FieldError> {
        self.title
            .set_once_validated(value.into(), |title| validate_title(title))
    }

    /// Sets the content if it has never been set or loaded.
    pub fn set_content(&mut self, value: impl Into<String>) -> Result<(), FieldError> {
        self.content.set_once_validated(value.into(), |_| Ok(()))
    }
}

impl Display for Article {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.loaded_title(), self.id) {
            (Some(title), _) => write!(f, "<Article {title}>"),
            (None, Some(id)) => write!(f, "<Article #{id}>"),
            (None, None) => write!(f, "<Article unsaved>"),
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    validate_char_length("title", title, TITLE_MIN_CHARS, TITLE_MAX_CHARS)
}
