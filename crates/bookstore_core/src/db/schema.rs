//! `book` table definition.
//!
//! # Invariants
//! - Schema creation is `IF NOT EXISTS`; existing tables are left untouched.
//! - There is no versioned migration chain; the table shape is fixed.

use crate::db::DbResult;
use rusqlite::Connection;

/// Table holding every inventory record.
pub const BOOK_TABLE: &str = "book";

/// Columns every reader and writer of [`BOOK_TABLE`] relies on.
pub const BOOK_COLUMNS: &[&str] = &["id", "title", "author", "qty"];

const BOOK_SCHEMA_SQL: &str = include_str!("book_schema.sql");

/// Creates the `book` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(BOOK_SCHEMA_SQL)?;
    Ok(())
}
