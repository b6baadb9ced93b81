//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical stock record for one title.
//! - Convert free-text input into typed ids and quantities.
//!
//! # Invariants
//! - `id` is the primary key and is never reassigned to another book.
//! - `title` and `author` are non-empty after trimming.
//! - `qty` is stored as given; negative counts are not rejected.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key of a book row.
pub type BookId = i64;

/// Validation failures for book fields and raw user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// Id text is not a base-10 integer.
    InvalidId(String),
    /// Quantity text is not a base-10 integer.
    InvalidQuantity(String),
    /// Title is empty or whitespace only.
    EmptyTitle,
    /// Author is empty or whitespace only.
    EmptyAuthor,
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(raw) => write!(f, "book id must be a whole number, got `{raw}`"),
            Self::InvalidQuantity(raw) => {
                write!(f, "quantity must be a whole number, got `{raw}`")
            }
            Self::EmptyTitle => write!(f, "book title cannot be empty"),
            Self::EmptyAuthor => write!(f, "book author cannot be empty"),
        }
    }
}

impl Error for BookValidationError {}

/// One stock record in the bookstore inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Copies in stock.
    pub qty: i64,
}

impl Book {
    /// Creates a validated book record.
    ///
    /// Title and author are stored trimmed.
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        qty: i64,
    ) -> Result<Self, BookValidationError> {
        let book = Self {
            id,
            title: title.into().trim().to_string(),
            author: author.into().trim().to_string(),
            qty,
        };
        book.validate()?;
        Ok(book)
    }

    /// Checks field invariants without touching storage.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        Ok(())
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} in stock",
            self.id, self.title, self.author, self.qty
        )
    }
}

/// Parses a book id typed at the terminal.
pub fn parse_book_id(raw: &str) -> Result<BookId, BookValidationError> {
    raw.trim()
        .parse::<BookId>()
        .map_err(|_| BookValidationError::InvalidId(raw.trim().to_string()))
}

/// Parses a stock quantity typed at the terminal.
pub fn parse_quantity(raw: &str) -> Result<i64, BookValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| BookValidationError::InvalidQuantity(raw.trim().to_string()))
}
