//! Magazine persistence, the persisting category setter and
//! magazine-side aggregate queries.
//!
//! # Invariants
//! - A category write is validated before storage is touched.
//! - The in-memory category only keeps a new value once it is persisted.
//! - "Heavy contributors" are authors with strictly more than
//!   `HEAVY_CONTRIBUTOR_MIN_EXCLUSIVE` articles in the magazine.

use super::article_repo::{parse_article_row, ARTICLE_SELECT_SQL};
use super::author_repo::parse_author_row;
use super::{invalid_row, query_all, RepoError, RepoResult};
use crate::model::article::Article;
use crate::model::author::Author;
use crate::model::magazine::Magazine;
use crate::model::{AuthorId, MagazineId};
use log::{debug, info, warn};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

/// Article count an author must exceed to count as a heavy contributor.
pub const HEAVY_CONTRIBUTOR_MIN_EXCLUSIVE: i64 = 2;

const MAGAZINE_SELECT_SQL: &str = "SELECT id, name, category FROM magazines";

/// Author identity as it appears in a magazine summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: AuthorId,
    pub name: String,
}

/// Read model of one magazine together with its relationship queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagazineSummary {
    pub id: MagazineId,
    pub name: String,
    pub category: String,
    /// Titles in row order.
    pub article_titles: Vec<String>,
    /// Distinct authors with at least one article.
    pub contributors: Vec<AuthorRef>,
    /// Authors with more than two articles.
    pub heavy_contributors: Vec<AuthorRef>,
}

impl Magazine {
    /// Loads one magazine row.
    pub fn find(conn: &Connection, id: MagazineId) -> RepoResult<Option<Magazine>> {
        let mut stmt = conn.prepare(&format!("{MAGAZINE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_magazine_row(row)?));
        }

        Ok(None)
    }

    /// Inserts this magazine under its own id.
    pub fn save(&self, conn: &Connection) -> RepoResult<()> {
        conn.execute(
            "INSERT INTO magazines (id, name, category) VALUES (?1, ?2, ?3);",
            params![self.id, self.name, self.category],
        )?;
        info!("event=magazine_save module=repo status=ok magazine_id={}", self.id);
        Ok(())
    }

    /// Writes the current in-memory category to the stored row.
    ///
    /// # Errors
    /// - `NotFound` when no magazine row has this id.
    pub fn persist_category(&self, conn: &Connection) -> RepoResult<()> {
        let changed = conn.execute(
            "UPDATE magazines SET category = ?1 WHERE id = ?2;",
            params![self.category, self.id],
        )?;

        if changed == 0 {
            warn!(
                "event=magazine_category module=repo status=not_found magazine_id={}",
                self.id
            );
            return Err(RepoError::NotFound {
                entity: "magazine",
                field: "category",
                id: Some(self.id),
            });
        }

        info!(
            "event=magazine_category module=repo status=ok magazine_id={}",
            self.id
        );
        Ok(())
    }

    /// Validates, assigns and persists a new category.
    ///
    /// Composes `store_category_locally` and `persist_category`; when the
    /// update fails the previous in-memory category is restored.
    pub fn set_category(
        &mut self,
        conn: &Connection,
        value: impl Into<String>,
    ) -> RepoResult<()> {
        let previous = self.category.clone();
        self.store_category_locally(value)?;
        if let Err(err) = self.persist_category(conn) {
            self.category = previous;
            return Err(err);
        }

        Ok(())
    }

    /// Lists every article published in this magazine, in row order.
    pub fn articles(&self, conn: &Connection) -> RepoResult<Vec<Article>> {
        let articles = query_all(
            conn,
            &format!(
                "{ARTICLE_SELECT_SQL} WHERE articles.magazine_id = ?1 ORDER BY articles.id;"
            ),
            [self.id],
            parse_article_row,
        )?;
        debug!(
            "event=magazine_articles module=repo status=ok magazine_id={} count={}",
            self.id,
            articles.len()
        );
        Ok(articles)
    }

    /// Lists the distinct authors with at least one article here.
    pub fn contributors(&self, conn: &Connection) -> RepoResult<Vec<Author>> {
        let authors = query_all(
            conn,
            "SELECT DISTINCT authors.id, authors.name
             FROM authors
             INNER JOIN articles ON authors.id = articles.author_id
             WHERE articles.magazine_id = ?1
             ORDER BY authors.id;",
            [self.id],
            parse_author_row,
        )?;
        debug!(
            "event=magazine_contributors module=repo status=ok magazine_id={} count={}",
            self.id,
            authors.len()
        );
        Ok(authors)
    }

    /// Lists the titles of this magazine's articles, in row order.
    pub fn article_titles(&self, conn: &Connection) -> RepoResult<Vec<String>> {
        let titles = query_all(
            conn,
            "SELECT title FROM articles WHERE magazine_id = ?1 ORDER BY id;",
            [self.id],
            parse_title_row,
        )?;
        debug!(
            "event=magazine_titles module=repo status=ok magazine_id={} count={}",
            self.id,
            titles.len()
        );
        Ok(titles)
    }

    /// Lists authors with more than two articles in this magazine.
    pub fn contributing_authors(&self, conn: &Connection) -> RepoResult<Vec<Author>> {
        let authors = query_all(
            conn,
            "SELECT authors.id, authors.name, COUNT(articles.id) AS article_count
             FROM authors
             INNER JOIN articles ON authors.id = articles.author_id
             WHERE articles.magazine_id = ?1
             GROUP BY authors.id, authors.name
             HAVING COUNT(articles.id) > ?2
             ORDER BY authors.id;",
            params![self.id, HEAVY_CONTRIBUTOR_MIN_EXCLUSIVE],
            parse_author_row,
        )?;
        debug!(
            "event=magazine_heavy_contributors module=repo status=ok magazine_id={} count={}",
            self.id,
            authors.len()
        );
        Ok(authors)
    }

    /// Collects this magazine's fields and relationship queries into one
    /// serializable read model.
    pub fn summary(&self, conn: &Connection) -> RepoResult<MagazineSummary> {
        Ok(MagazineSummary {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
            article_titles: self.article_titles(conn)?,
            contributors: author_refs(self.contributors(conn)?)?,
            heavy_contributors: author_refs(self.contributing_authors(conn)?)?,
        })
    }
}

/// Converts hydrated authors into summary refs. Every author must carry a
/// resident name; an unloaded one is reported instead of dropped.
fn author_refs(authors: Vec<Author>) -> RepoResult<Vec<AuthorRef>> {
    authors
        .iter()
        .map(|author| {
            let name = author.loaded_name().ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "authors row {}: name not loaded for summary",
                    author.id()
                ))
            })?;
            Ok(AuthorRef {
                id: author.id(),
                name: name.to_owned(),
            })
        })
        .collect()
}

fn parse_title_row(row: &Row<'_>) -> RepoResult<String> {
    Ok(row.get("title")?)
}

pub(crate) fn parse_magazine_row(row: &Row<'_>) -> RepoResult<Magazine> {
    let id: MagazineId = row.get("id")?;
    Magazine::new(
        id,
        row.get::<_, String>("name")?,
        row.get::<_, String>("category")?,
    )
    .map_err(|err| invalid_row("magazines", id, err))
}
