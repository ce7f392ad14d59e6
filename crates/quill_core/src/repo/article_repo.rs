//! Article persistence: insert, lazy column loads and name joins.
//!
//! # Invariants
//! - `save` is not idempotent; each call inserts a new row.
//! - Loaded values are cached on the instance and never re-fetched.

use super::{invalid_row, RepoError, RepoResult};
use crate::model::article::Article;
use crate::model::ArticleId;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const ARTICLE_SELECT_SQL: &str = "SELECT
    articles.id,
    articles.title,
    articles.content,
    articles.author_id,
    articles.magazine_id
FROM articles";

const TITLE_SQL: &str = "SELECT title FROM articles WHERE id = ?1;";
const CONTENT_SQL: &str = "SELECT content FROM articles WHERE id = ?1;";
const AUTHOR_NAME_SQL: &str = "SELECT authors.name AS author
    FROM articles
    INNER JOIN authors ON articles.author_id = authors.id
    WHERE articles.id = ?1;";
const MAGAZINE_NAME_SQL: &str = "SELECT magazines.name AS magazine
    FROM articles
    INNER JOIN magazines ON articles.magazine_id = magazines.id
    WHERE articles.id = ?1;";

impl Article {
    /// Loads one article with every column resident.
    pub fn find(conn: &Connection, id: ArticleId) -> RepoResult<Option<Article>> {
        let mut stmt = conn.prepare(&format!("{ARTICLE_SELECT_SQL} WHERE articles.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_article_row(row)?));
        }

        Ok(None)
    }

    /// Inserts this article as a new row and adopts the generated id.
    ///
    /// Unloaded `title` / `content` are loaded first, so saving a reference
    /// duplicates the stored row.
    pub fn save(&mut self, conn: &Connection) -> RepoResult<()> {
        let title = self.title(conn)?.to_owned();
        let content = self.content(conn)?.to_owned();

        conn.execute(
            "INSERT INTO articles (title, content, author_id, magazine_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![title, content, self.author_id, self.magazine_id],
        )?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);

        info!(
            "event=article_save module=repo status=ok article_id={id} author_id={} magazine_id={}",
            self.author_id, self.magazine_id
        );
        Ok(())
    }

    /// Returns the title, loading it by id on first read.
    ///
    /// # Errors
    /// - `NotFound` when the article has no id or no row matches it.
    pub fn title(&self, conn: &Connection) -> RepoResult<&str> {
        self.title
            .get_or_try_load(|| fetch_text(conn, self.id, TITLE_SQL, "title"))
            .map(String::as_str)
    }

    /// Returns the content, loading it by id on first read.
    pub fn content(&self, conn: &Connection) -> RepoResult<&str> {
        self.content
            .get_or_try_load(|| fetch_text(conn, self.id, CONTENT_SQL, "content"))
            .map(String::as_str)
    }

    /// Returns the name of the referenced author, resolved through a join.
    pub fn author(&self, conn: &Connection) -> RepoResult<&str> {
        self.author_name
            .get_or_try_load(|| fetch_text(conn, self.id, AUTHOR_NAME_SQL, "author"))
            .map(String::as_str)
    }

    /// Returns the name of the referenced magazine, resolved through a join.
    pub fn magazine(&self, conn: &Connection) -> RepoResult<&str> {
        self.magazine_name
            .get_or_try_load(|| fetch_text(conn, self.id, MAGAZINE_NAME_SQL, "magazine"))
            .map(String::as_str)
    }
}

/// Fetches one text column of the article row; the selected column must be
/// named after `field`.
fn fetch_text(
    conn: &Connection,
    id: Option<ArticleId>,
    sql: &str,
    field: &'static str,
) -> RepoResult<String> {
    let not_found = RepoError::NotFound {
        entity: "article",
        field,
        id,
    };
    let Some(id) = id else {
        debug!("event=article_load module=repo status=not_found field={field} reason=unsaved");
        return Err(not_found);
    };

    let value = conn
        .query_row(sql, [id], |row| row.get::<_, String>(field))
        .optional()?;
    match value {
        Some(value) => {
            debug!("event=article_load module=repo status=ok field={field} article_id={id}");
            Ok(value)
        }
        None => {
            debug!(
                "event=article_load module=repo status=not_found field={field} article_id={id}"
            );
            Err(not_found)
        }
    }
}

pub(crate) fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    let id: ArticleId = row.get("id")?;
    let title: String = row.get("title")?;
    let content: String = row.get("content")?;
    Article::with_id(
        id,
        title,
        content,
        row.get("author_id")?,
        row.get("magazine_id")?,
    )
    .map_err(|err| invalid_row("articles", id, err))
}
