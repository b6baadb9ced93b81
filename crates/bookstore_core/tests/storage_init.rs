use bookstore_core::db::schema::ensure_schema;
use bookstore_core::db::seed::{seed_if_empty, SEED_BOOKS};
use bookstore_core::db::{initialize_storage, open_db, open_db_in_memory};
use bookstore_core::{Book, BookRepository, SqliteBookRepository};
use rusqlite::Connection;

#[test]
fn fresh_database_is_seeded_with_sample_books() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::try_new(&conn).unwrap();

    assert_eq!(repo.count_books().unwrap(), 5);
    let first = repo.get_book(3001).unwrap().unwrap();
    assert_eq!(
        first,
        Book::new(3001, "A Tale of Two Cities", "Charles Dickens", 30).unwrap()
    );

    let potter = repo.get_book(3002).unwrap().unwrap();
    assert_eq!(potter.title, "Harry Potter and the Philosopher's Stone");
    assert_eq!(potter.qty, 40);
}

#[test]
fn initialization_twice_does_not_duplicate_seed_rows() {
    let mut conn = Connection::open_in_memory().unwrap();

    assert_eq!(initialize_storage(&mut conn).unwrap(), SEED_BOOKS.len());
    let after_first = count_rows(&conn);
    assert_eq!(initialize_storage(&mut conn).unwrap(), 0);

    assert_eq!(count_rows(&conn), after_first);
}

#[test]
fn seed_is_skipped_when_table_has_any_row() {
    let mut conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO book (id, title, author, qty) VALUES (1, 'Only', 'One', 1);",
        [],
    )
    .unwrap();

    assert_eq!(seed_if_empty(&mut conn).unwrap(), 0);
    assert_eq!(count_rows(&conn), 1);
}

#[test]
fn emptied_table_is_reseeded_on_next_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ebookstore.db");

    let conn = open_db(&path).unwrap();
    conn.execute("DELETE FROM book;", []).unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(count_rows(&conn), 5);
}

#[test]
fn reopening_file_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ebookstore.db");

    let conn = open_db(&path).unwrap();
    conn.execute("DELETE FROM book WHERE id = 3004;", []).unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(count_rows(&conn), 4);
    assert_table_exists(&conn, "book");
}

#[test]
fn opening_unreachable_path_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("ebookstore.db");

    assert!(open_db(&path).is_err());
}

fn count_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM book;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
