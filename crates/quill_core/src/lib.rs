//! Data-access core for articles, authors and magazines.
//! Entities carry their own validation; storage access borrows a
//! caller-provided SQLite connection.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, ConnectionProvider, DbError, SqliteFileProvider};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::article::Article;
pub use model::author::Author;
pub use model::magazine::Magazine;
pub use model::validation::{Constraint, FieldError, ImmutableFieldError, ValidationError};
pub use model::{ArticleId, AuthorId, MagazineId};
pub use repo::magazine_repo::{AuthorRef, MagazineSummary};
pub use repo::{RepoError, RepoResult};
pub use service::publishing_service::PublishingService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
