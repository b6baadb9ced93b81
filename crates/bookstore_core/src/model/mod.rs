//! Inventory domain model.
//!
//! # Responsibility
//! - Define the book record persisted in the `book` table.
//! - Parse raw terminal input into typed, validated values.
//!
//! # Invariants
//! - Every book is identified by its integer `BookId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod book;
