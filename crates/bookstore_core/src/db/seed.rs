//! First-run sample inventory.
//!
//! # Invariants
//! - Seed rows are inserted only when the `book` table has no rows at all.
//! - The count check and the inserts share one transaction.

use crate::db::DbResult;
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};

/// `(id, title, author, qty)` rows inserted into an empty inventory.
pub const SEED_BOOKS: &[(i64, &str, &str, i64)] = &[
    (3001, "A Tale of Two Cities", "Charles Dickens", 30),
    (
        3002,
        "Harry Potter and the Philosopher's Stone",
        "J.K. Rowling",
        40,
    ),
    (3003, "The Lion, the Witch and the Wardrobe", "C. S. Lewis", 25),
    (3004, "The Lord of the Rings", "J.R.R Tolkien", 37),
    (3005, "Alice in Wonderland", "Lewis Carroll", 12),
];

/// Inserts [`SEED_BOOKS`] when the `book` table is empty.
///
/// Returns how many rows were inserted.
pub fn seed_if_empty(conn: &mut Connection) -> DbResult<usize> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM book;", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(0);
    }

    {
        let mut stmt =
            tx.prepare("INSERT INTO book (id, title, author, qty) VALUES (?1, ?2, ?3, ?4);")?;
        for (id, title, author, qty) in SEED_BOOKS {
            stmt.execute(params![id, title, author, qty])?;
        }
    }
    tx.commit()?;

    info!(
        "event=db_seed module=db status=ok inserted={}",
        SEED_BOOKS.len()
    );
    Ok(SEED_BOOKS.len())
}
