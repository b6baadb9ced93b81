//! Inventory use-case service.
//!
//! # Responsibility
//! - Provide the add/update/remove/search entry points used by the menu.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Log lines carry ids and outcomes only, never titles or authors.

use crate::model::book::{Book, BookId};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};
use log::{debug, info, warn};

/// Use-case service wrapper for inventory operations.
pub struct InventoryService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> InventoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a new book.
    ///
    /// Returns `RepoError::DuplicateId` unchanged when the id is taken.
    pub fn add_book(&self, book: &Book) -> RepoResult<BookId> {
        match self.repo.create_book(book) {
            Ok(id) => {
                info!("event=book_add module=service status=ok id={id}");
                Ok(id)
            }
            Err(err @ RepoError::DuplicateId(_)) => {
                warn!(
                    "event=book_add module=service status=rejected id={} error_code=duplicate_id",
                    book.id
                );
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Looks up one book by id.
    pub fn find_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let found = self.repo.get_book(id)?;
        debug!(
            "event=book_find module=service status=ok id={} found={}",
            id,
            found.is_some()
        );
        Ok(found)
    }

    /// Replaces title/author/qty of an existing book.
    ///
    /// Returns `false` when no book with `book.id` exists.
    pub fn update_book(&self, book: &Book) -> RepoResult<bool> {
        let updated = self.repo.update_book(book)?;
        info!(
            "event=book_update module=service status=ok id={} updated={}",
            book.id, updated
        );
        Ok(updated)
    }

    /// Removes a book by id.
    ///
    /// Returns `false` when no book with `id` exists.
    pub fn remove_book(&self, id: BookId) -> RepoResult<bool> {
        let removed = self.repo.delete_book(id)?;
        info!("event=book_remove module=service status=ok id={id} removed={removed}");
        Ok(removed)
    }

    /// Number of distinct books in the inventory.
    pub fn stock_size(&self) -> RepoResult<u64> {
        self.repo.count_books()
    }
}
