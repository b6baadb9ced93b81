//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Run schema creation and first-run seeding before returning.
//!
//! # Invariants
//! - Returned connections always have a `book` table.
//! - The caller owns the returned connection; nothing here keeps a handle.

use super::schema::ensure_schema;
use super::seed::seed_if_empty;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// File name used when no database path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "ebookstore.db";

/// Opens (or creates) the inventory database file and initializes storage.
///
/// # Side effects
/// - Creates the file, the `book` table and seed rows when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let mut conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(&mut conn, "file", started_at)?;
    Ok(conn)
}

/// Opens an in-memory database and initializes storage.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let mut conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(&mut conn, "memory", started_at)?;
    Ok(conn)
}

/// Ensures the `book` table exists and seeds it when empty.
///
/// Returns the number of seed rows inserted by this call, which is zero on
/// every run after the first.
pub fn initialize_storage(conn: &mut Connection) -> DbResult<usize> {
    ensure_schema(conn)?;
    seed_if_empty(conn)
}

fn finish_open(conn: &mut Connection, mode: &str, started_at: Instant) -> DbResult<()> {
    match bootstrap_connection(conn) {
        Ok(seeded) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={} seeded_rows={}",
                mode,
                started_at.elapsed().as_millis(),
                seeded
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<usize> {
    conn.busy_timeout(Duration::from_secs(5))?;
    initialize_storage(conn)
}
