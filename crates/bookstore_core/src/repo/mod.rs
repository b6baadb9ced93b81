//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for book records.
//! - Isolate SQLite statements from service and menu code.
//!
//! # Invariants
//! - Repository writes must enforce `Book::validate()` before persistence.
//! - "Not found" is an ordinary result (`None` / `false`), never an error.

pub mod book_repo;
