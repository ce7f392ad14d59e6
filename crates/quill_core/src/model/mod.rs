//! Entity model for articles, authors and magazines.
//!
//! # Responsibility
//! - Define the in-memory shape of each entity row.
//! - Enforce field-level validation and one-time-set rules.
//!
//! # Invariants
//! - Every constructor validates eagerly and fails atomically.
//! - Storage access lives in `crate::repo`; model code never touches SQL.

pub mod article;
pub mod author;
pub mod field;
pub mod magazine;
pub mod validation;

/// Store-assigned identifier of an `authors` row.
pub type AuthorId = i64;
/// Store-assigned identifier of a `magazines` row.
pub type MagazineId = i64;
/// Store-assigned identifier of an `articles` row.
pub type ArticleId = i64;
