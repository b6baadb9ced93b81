//! Core inventory logic for the eBookstore.
//! Storage bootstrap, the book repository and the inventory service live here;
//! the interactive menu in `bookstore_cli` only calls into these APIs.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{initialize_storage, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{parse_book_id, parse_quantity, Book, BookId, BookValidationError};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::inventory_service::InventoryService;
