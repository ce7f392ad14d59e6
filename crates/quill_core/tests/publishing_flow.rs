use quill_core::db::{open_db_in_memory, with_connection, ConnectionProvider, DbResult};
use quill_core::{
    Article, Author, Magazine, PublishingService, RepoError, SqliteFileProvider,
};
use rusqlite::Connection;
use std::cell::Cell;

#[test]
fn article_saved_for_author_and_magazine_is_reachable_from_both() {
    let conn = open_db_in_memory().unwrap();
    let author = Author::new(1, "Ada").unwrap();
    let magazine = Magazine::new(1, "Tech", "Science").unwrap();
    author.save(&conn).unwrap();
    magazine.save(&conn).unwrap();

    let mut article = Article::new("Hello World", "...", 1, 1).unwrap();
    article.save(&conn).unwrap();
    let id = article.id().unwrap();

    let in_magazine = Magazine::find(&conn, 1).unwrap().unwrap().articles(&conn).unwrap();
    assert!(in_magazine
        .iter()
        .any(|a| a.id() == Some(id) && a.loaded_title() == Some("Hello World")));

    let by_author = Author::reference(1).articles(&conn).unwrap();
    assert!(by_author.iter().any(|a| a.id() == Some(id)));

    assert_eq!(article.author(&conn).unwrap(), "Ada");
    assert_eq!(article.magazine(&conn).unwrap(), "Tech");
}

#[test]
fn service_runs_each_call_on_a_fresh_connection() {
    let dir = tempfile::tempdir().unwrap();
    let service = PublishingService::new(SqliteFileProvider::new(dir.path().join("quill.db")));

    service
        .register_author(&Author::new(1, "Ada").unwrap())
        .unwrap();
    service
        .register_magazine(&Magazine::new(1, "Tech", "Science").unwrap())
        .unwrap();
    for title in ["Part One Here", "Part Two Here", "Part Three Here"] {
        let mut article = Article::new(title, "body", 1, 1).unwrap();
        let id = service.publish(&mut article).unwrap();
        assert_eq!(article.id(), Some(id));
    }

    let magazine = service.recategorize(1, "Engineering").unwrap();
    assert_eq!(magazine.category(), "Engineering");

    let summary = service.magazine_summary(1).unwrap().unwrap();
    assert_eq!(summary.category, "Engineering");
    assert_eq!(summary.article_titles.len(), 3);
    assert_eq!(summary.heavy_contributors.len(), 1);

    let magazines = service.author_magazines(1).unwrap();
    assert_eq!(magazines.len(), 1);
    assert!(service.magazine_summary(2).unwrap().is_none());
}

#[test]
fn recategorize_missing_magazine_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = PublishingService::new(SqliteFileProvider::new(dir.path().join("quill.db")));

    let err = service.recategorize(5, "Anything").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn with_connection_releases_on_error_paths() {
    let provider = CountingProvider::default();

    let result: Result<(), RepoError> = with_connection(&provider, |conn| {
        Article::reference(1, 1, 1).title(conn).map(|_| ())
    });
    assert!(result.unwrap_err().is_not_found());

    let value: Result<i64, RepoError> = with_connection(&provider, |conn| {
        Ok(conn.query_row("SELECT 41 + 1;", [], |row| row.get(0))?)
    });
    assert_eq!(value.unwrap(), 42);
    assert_eq!(provider.acquired.get(), 2);
}

#[derive(Default)]
struct CountingProvider {
    acquired: Cell<u32>,
}

impl ConnectionProvider for CountingProvider {
    fn acquire(&self) -> DbResult<Connection> {
        self.acquired.set(self.acquired.get() + 1);
        open_db_in_memory()
    }
}
