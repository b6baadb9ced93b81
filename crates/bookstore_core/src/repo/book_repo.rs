//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide fetch/insert/update/delete over the `book` table.
//! - Translate storage failures into semantic errors (`DuplicateId`).
//!
//! # Invariants
//! - Every statement is parameterized and runs in autocommit mode, so each
//!   mutation commits on its own.
//! - Update/delete report whether a row was affected instead of failing.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::schema::{BOOK_COLUMNS, BOOK_TABLE};
use crate::db::DbError;
use crate::model::book::{Book, BookId, BookValidationError};
use rusqlite::types::FromSql;
use rusqlite::{ffi, params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT id, title, author, qty FROM book";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    /// Insert collided with an existing primary key.
    DuplicateId(BookId),
    /// Connection has no `book` table.
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "a book with id {id} already exists"),
            Self::MissingRequiredTable(table) => {
                write!(f, "book repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "book repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateId(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for book CRUD operations.
pub trait BookRepository {
    /// Single-row lookup by primary key. `Ok(None)` when absent.
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Inserts a new row. Fails with `DuplicateId` if `id` is taken.
    fn create_book(&self, book: &Book) -> RepoResult<BookId>;
    /// Replaces title/author/qty. Returns `false` when no row matched.
    fn update_book(&self, book: &Book) -> RepoResult<bool>;
    /// Deletes by id. Returns `false` when no row matched.
    fn delete_book(&self, id: BookId) -> RepoResult<bool>;
    /// Number of rows currently stored.
    fn count_books(&self) -> RepoResult<u64>;
}

/// SQLite-backed book repository borrowing a caller-owned connection.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from an initialized connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the `book` table does not exist.
    /// - `MissingRequiredColumn` when the table lacks an expected column.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn create_book(&self, book: &Book) -> RepoResult<BookId> {
        book.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO book (id, title, author, qty) VALUES (?1, ?2, ?3, ?4);",
            params![book.id, book.title.as_str(), book.author.as_str(), book.qty],
        );

        match inserted {
            Ok(_) => Ok(book.id),
            Err(err) if is_primary_key_violation(&err) => Err(RepoError::DuplicateId(book.id)),
            Err(err) => Err(err.into()),
        }
    }

    fn update_book(&self, book: &Book) -> RepoResult<bool> {
        book.validate()?;

        let changed = self.conn.execute(
            "UPDATE book
             SET
                title = ?1,
                author = ?2,
                qty = ?3
             WHERE id = ?4;",
            params![book.title.as_str(), book.author.as_str(), book.qty, book.id],
        )?;

        Ok(changed > 0)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM book WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn count_books(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM book;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id: BookId = book_column(row, "id")?;
    let qty = book_column::<Option<i64>>(row, "qty")?.ok_or_else(|| {
        RepoError::InvalidData(format!("missing quantity for book `{id}` in book.qty"))
    })?;

    let book = Book {
        id,
        title: book_column(row, "title")?,
        author: book_column(row, "author")?,
        qty,
    };
    book.validate().map_err(|err| {
        RepoError::InvalidData(format!("book `{id}` failed validation: {err}"))
    })?;
    Ok(book)
}

// Loosely typed files (e.g. free text in `qty INT`) fail here, not in SQL.
fn book_column<T: FromSql>(row: &Row<'_>, column: &str) -> RepoResult<T> {
    row.get(column).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => {
            RepoError::InvalidData(format!("unreadable value in book.{column}: {err}"))
        }
        other => other.into(),
    })
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, BOOK_TABLE)? {
        return Err(RepoError::MissingRequiredTable(BOOK_TABLE));
    }

    for &column in BOOK_COLUMNS {
        if !table_has_column(conn, BOOK_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: BOOK_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
