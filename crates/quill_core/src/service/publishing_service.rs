//! Publishing use-case service.
//!
//! # Responsibility
//! - Give callers connection-free entry points for the common entity flows.
//! - Acquire one connection per call and release it before returning.
//!
//! # Invariants
//! - Every method delegates to the entity operations; no SQL lives here.
//! - Errors from the entity layer are returned unchanged.

use crate::db::{with_connection, ConnectionProvider};
use crate::model::article::Article;
use crate::model::author::Author;
use crate::model::magazine::Magazine;
use crate::model::{ArticleId, AuthorId, MagazineId};
use crate::repo::magazine_repo::MagazineSummary;
use crate::repo::{RepoError, RepoResult};

/// Use-case wrapper that scopes a connection around each operation.
pub struct PublishingService<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> PublishingService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Inserts an author row.
    pub fn register_author(&self, author: &Author) -> RepoResult<()> {
        with_connection(&self.provider, |conn| author.save(conn))
    }

    /// Inserts a magazine row.
    pub fn register_magazine(&self, magazine: &Magazine) -> RepoResult<()> {
        with_connection(&self.provider, |conn| magazine.save(conn))
    }

    /// Saves `article` and returns the id the store assigned.
    pub fn publish(&self, article: &mut Article) -> RepoResult<ArticleId> {
        with_connection(&self.provider, |conn| {
            article.save(conn)?;
            article.id().ok_or(RepoError::NotFound {
                entity: "article",
                field: "id",
                id: None,
            })
        })
    }

    /// Changes a stored magazine's category.
    ///
    /// # Errors
    /// - `NotFound` when no magazine has `magazine_id`.
    /// - `Validation` when `category` is empty; storage is left untouched.
    pub fn recategorize(
        &self,
        magazine_id: MagazineId,
        category: impl Into<String>,
    ) -> RepoResult<Magazine> {
        with_connection(&self.provider, |conn| {
            let mut magazine = Magazine::find(conn, magazine_id)?.ok_or(RepoError::NotFound {
                entity: "magazine",
                field: "category",
                id: Some(magazine_id),
            })?;
            magazine.set_category(conn, category)?;
            Ok(magazine)
        })
    }

    /// Builds the summary of one magazine, or `None` when it does not exist.
    pub fn magazine_summary(&self, magazine_id: MagazineId) -> RepoResult<Option<MagazineSummary>> {
        with_connection(&self.provider, |conn| {
            Magazine::find(conn, magazine_id)?
                .map(|magazine| magazine.summary(conn))
                .transpose()
        })
    }

    /// Lists the magazines an author has written for.
    pub fn author_magazines(&self, author_id: AuthorId) -> RepoResult<Vec<Magazine>> {
        with_connection(&self.provider, |conn| {
            Author::reference(author_id).magazines(conn)
        })
    }
}
