use quill_core::db::open_db_in_memory;
use quill_core::{Article, Author, AuthorRef, Magazine, RepoError};
use rusqlite::Connection;

#[test]
fn set_category_round_trips_through_storage() {
    let conn = seeded_conn();
    let mut magazine = Magazine::find(&conn, 10).unwrap().unwrap();

    magazine.set_category(&conn, "Engineering").unwrap();
    assert_eq!(magazine.category(), "Engineering");

    let fresh = Magazine::find(&conn, 10).unwrap().unwrap();
    assert_eq!(fresh.category(), "Engineering");
}

#[test]
fn set_category_rejects_empty_without_touching_storage() {
    let conn = seeded_conn();
    let mut magazine = Magazine::find(&conn, 10).unwrap().unwrap();

    let err = magazine.set_category(&conn, "").unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref e) if e.field == "category"));
    assert_eq!(magazine.category(), "Science");
    assert_eq!(stored_category(&conn, 10), "Science");
}

#[test]
fn set_category_on_unsaved_magazine_reports_not_found_and_reverts() {
    let conn = seeded_conn();
    let mut magazine = Magazine::new(99, "Draft", "Unsorted").unwrap();

    let err = magazine.set_category(&conn, "Sorted").unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "magazine",
            field: "category",
            id: Some(99),
        }
    ));
    assert_eq!(magazine.category(), "Unsorted");
}

#[test]
fn construction_and_name_changes_do_not_write_storage() {
    let conn = seeded_conn();

    let mut magazine = Magazine::new(10, "Shadow", "Shadowed").unwrap();
    magazine.set_name("Renamed").unwrap();
    magazine.store_category_locally("Local Only").unwrap();

    let stored = Magazine::find(&conn, 10).unwrap().unwrap();
    assert_eq!(stored.name(), "Tech");
    assert_eq!(stored.category(), "Science");

    magazine.persist_category(&conn).unwrap();
    assert_eq!(stored_category(&conn, 10), "Local Only");
}

#[test]
fn articles_and_titles_follow_row_order() {
    let conn = seeded_conn();
    publish(&conn, "Alpha Story", 1, 10);
    publish(&conn, "Other Magazine", 1, 20);
    publish(&conn, "Beta Story", 2, 10);

    let magazine = Magazine::find(&conn, 10).unwrap().unwrap();
    let articles = magazine.articles(&conn).unwrap();
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|article| article.magazine_id() == 10));

    assert_eq!(
        magazine.article_titles(&conn).unwrap(),
        vec!["Alpha Story".to_string(), "Beta Story".to_string()]
    );
}

#[test]
fn contributors_are_distinct() {
    let conn = seeded_conn();
    publish(&conn, "Ada Part One", 1, 10);
    publish(&conn, "Ada Part Two", 1, 10);
    publish(&conn, "Grace Part One", 2, 10);
    publish(&conn, "Elsewhere Piece", 3, 20);

    let magazine = Magazine::find(&conn, 10).unwrap().unwrap();
    let contributors = magazine.contributors(&conn).unwrap();
    let ids: Vec<_> = contributors.iter().map(Author::id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(contributors[0].loaded_name(), Some("Ada"));
}

#[test]
fn contributing_authors_requires_more_than_two_articles() {
    let conn = seeded_conn();
    for title in ["Ada Part One", "Ada Part Two", "Ada Part Three"] {
        publish(&conn, title, 1, 10);
    }
    for title in ["Grace Part One", "Grace Part Two"] {
        publish(&conn, title, 2, 10);
    }
    for title in ["Linus Part One", "Linus Part Two", "Linus Part Three"] {
        publish(&conn, title, 3, 20);
    }

    let magazine = Magazine::find(&conn, 10).unwrap().unwrap();
    let heavy = magazine.contributing_authors(&conn).unwrap();
    let ids: Vec<_> = heavy.iter().map(Author::id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn empty_magazine_has_empty_relationships() {
    let conn = seeded_conn();
    let magazine = Magazine::find(&conn, 20).unwrap().unwrap();

    assert!(magazine.articles(&conn).unwrap().is_empty());
    assert!(magazine.contributors(&conn).unwrap().is_empty());
    assert!(magazine.article_titles(&conn).unwrap().is_empty());
    assert!(magazine.contributing_authors(&conn).unwrap().is_empty());
}

#[test]
fn summary_serializes_relationships() {
    let conn = seeded_conn();
    for title in ["Ada Part One", "Ada Part Two", "Ada Part Three"] {
        publish(&conn, title, 1, 10);
    }
    publish(&conn, "Grace Part One", 2, 10);

    let summary = Magazine::find(&conn, 10)
        .unwrap()
        .unwrap()
        .summary(&conn)
        .unwrap();
    assert_eq!(summary.article_titles.len(), 4);
    assert_eq!(summary.contributors.len(), 2);
    assert_eq!(
        summary.heavy_contributors,
        vec![AuthorRef {
            id: 1,
            name: "Ada".to_string(),
        }]
    );

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["id"], 10);
    assert_eq!(json["category"], "Science");
    assert_eq!(json["article_titles"][3], "Grace Part One");
    assert_eq!(json["heavy_contributors"][0]["name"], "Ada");
}

#[test]
fn find_returns_none_for_missing_magazine() {
    let conn = seeded_conn();
    assert!(Magazine::find(&conn, 404).unwrap().is_none());
}

fn seeded_conn() -> Connection {
    let conn = open_db_in_memory().unwrap();
    for (id, name) in [(1, "Ada"), (2, "Grace"), (3, "Linus")] {
        Author::new(id, name).unwrap().save(&conn).unwrap();
    }
    Magazine::new(10, "Tech", "Science").unwrap().save(&conn).unwrap();
    Magazine::new(20, "Poetry Now", "Arts").unwrap().save(&conn).unwrap();
    conn
}

fn publish(conn: &Connection, title: &str, author_id: i64, magazine_id: i64) {
    Article::new(title, "body", author_id, magazine_id)
        .unwrap()
        .save(conn)
        .unwrap();
}

fn stored_category(conn: &Connection, id: i64) -> String {
    conn.query_row("SELECT category FROM magazines WHERE id = ?1;", [id], |row| {
        row.get(0)
    })
    .unwrap()
}
