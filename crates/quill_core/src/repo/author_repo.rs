//! Author persistence and author-side relationship queries.

use super::article_repo::{parse_article_row, ARTICLE_SELECT_SQL};
use super::magazine_repo::parse_magazine_row;
use super::{invalid_row, query_all, RepoError, RepoResult};
use crate::model::article::Article;
use crate::model::author::Author;
use crate::model::magazine::Magazine;
use crate::model::AuthorId;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

impl Author {
    /// Loads one author with the name resident.
    pub fn find(conn: &Connection, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = conn.prepare("SELECT id, name FROM authors WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    /// Inserts this author under its own id.
    ///
    /// # Errors
    /// - `Db` when a row with the same id already exists.
    pub fn save(&self, conn: &Connection) -> RepoResult<()> {
        let name = self.name(conn)?;
        conn.execute(
            "INSERT INTO authors (id, name) VALUES (?1, ?2);",
            params![self.id, name],
        )?;
        info!("event=author_save module=repo status=ok author_id={}", self.id);
        Ok(())
    }

    /// Returns the name, loading it by id on first read.
    ///
    /// # Errors
    /// - `NotFound` when no author row has this id.
    pub fn name(&self, conn: &Connection) -> RepoResult<&str> {
        self.name
            .get_or_try_load(|| -> RepoResult<String> {
                conn.query_row(
                    "SELECT name FROM authors WHERE id = ?1;",
                    [self.id],
                    |row| row.get::<_, String>("name"),
                )
                .optional()?
                .ok_or(RepoError::NotFound {
                    entity: "author",
                    field: "name",
                    id: Some(self.id),
                })
            })
            .map(String::as_str)
    }

    /// Lists every article written by this author, in row order.
    pub fn articles(&self, conn: &Connection) -> RepoResult<Vec<Article>> {
        let articles = query_all(
            conn,
            &format!("{ARTICLE_SELECT_SQL} WHERE articles.author_id = ?1 ORDER BY articles.id;"),
            [self.id],
            parse_article_row,
        )?;
        debug!(
            "event=author_articles module=repo status=ok author_id={} count={}",
            self.id,
            articles.len()
        );
        Ok(articles)
    }

    /// Lists the distinct magazines this author has written for.
    pub fn magazines(&self, conn: &Connection) -> RepoResult<Vec<Magazine>> {
        let magazines = query_all(
            conn,
            "SELECT DISTINCT magazines.id, magazines.name, magazines.category
             FROM magazines
             INNER JOIN articles ON magazines.id = articles.magazine_id
             WHERE articles.author_id = ?1
             ORDER BY magazines.id;",
            [self.id],
            parse_magazine_row,
        )?;
        debug!(
            "event=author_magazines module=repo status=ok author_id={} count={}",
            self.id,
            magazines.len()
        );
        Ok(magazines)
    }
}

pub(crate) fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id: AuthorId = row.get("id")?;
    Author::new(id, row.get::<_, String>("name")?).map_err(|err| invalid_row("authors", id, err))
}
