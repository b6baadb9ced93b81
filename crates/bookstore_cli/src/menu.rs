//! Interactive numbered menu over the inventory service.
//!
//! # Responsibility
//! - Prompt for menu choices and record fields, one operation at a time.
//! - Parse raw text into typed values before anything reaches storage.
//!
//! # Invariants
//! - Malformed input is reported and the action is abandoned before storage.
//! - Duplicate ids and unreadable stored rows are reported; the session goes on.
//! - Any other storage failure ends the session with an error.
//! - End of input ends the session like choice `5`.

use anyhow::Result;
use bookstore_core::{
    parse_book_id, parse_quantity, Book, BookId, BookRepository, BookValidationError,
    InventoryService, RepoError,
};
use std::io::{BufRead, Write};

const NOT_FOUND_MESSAGE: &str = "No book found with that id!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Runs the menu loop until the user exits or input ends.
pub fn run_menu<R, I, O>(
    service: &InventoryService<R>,
    input: &mut I,
    output: &mut O,
) -> Result<()>
where
    R: BookRepository,
    I: BufRead,
    O: Write,
{
    let mut session = Session {
        service,
        input,
        output,
    };
    writeln!(session.output, "Welcome to the eBookstore!")?;

    loop {
        writeln!(session.output, "1. Add book")?;
        writeln!(session.output, "2. Update book")?;
        writeln!(session.output, "3. Remove book")?;
        writeln!(session.output, "4. Search book")?;
        writeln!(session.output, "5. Exit")?;

        let Ok(choice) = session.answer("Enter your choice: ")? else {
            break;
        };

        let flow = match choice.trim() {
            "1" => session.add_book()?,
            "2" => session.update_book()?,
            "3" => session.remove_book()?,
            "4" => session.search_book()?,
            "5" => {
                writeln!(session.output, "Goodbye!")?;
                Flow::Exit
            }
            _ => {
                writeln!(session.output, "Invalid choice. Please try again.")?;
                Flow::Continue
            }
        };

        if flow == Flow::Exit {
            break;
        }
    }

    session.output.flush()?;
    Ok(())
}

/// Early exit from a menu action: `Err(flow)` ends the action with `flow`.
type Step<T> = std::result::Result<T, Flow>;

struct Session<'a, R: BookRepository, I, O> {
    service: &'a InventoryService<R>,
    input: &'a mut I,
    output: &'a mut O,
}

impl<R: BookRepository, I: BufRead, O: Write> Session<'_, R, I, O> {
    fn add_book(&mut self) -> Result<Flow> {
        let id = match self.read_id()? {
            Ok(id) => id,
            Err(flow) => return Ok(flow),
        };
        let book = match self.read_fields(
            id,
            "Enter book title: ",
            "Enter book author: ",
            "How many books in stock?: ",
        )? {
            Ok(book) => book,
            Err(flow) => return Ok(flow),
        };

        match self.service.add_book(&book) {
            Ok(_) => writeln!(self.output, "Book added to the database!")?,
            Err(RepoError::DuplicateId(id)) => {
                writeln!(self.output, "A book with id {id} already exists!")?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(Flow::Continue)
    }

    fn update_book(&mut self) -> Result<Flow> {
        let id = match self.read_id()? {
            Ok(id) => id,
            Err(flow) => return Ok(flow),
        };
        // Checked first so the user is not asked for fields of a missing book.
        if let Err(flow) = self.lookup(id)? {
            return Ok(flow);
        }

        let book = match self.read_fields(
            id,
            "Enter new book title: ",
            "Enter new book author: ",
            "Enter new quantity: ",
        )? {
            Ok(book) => book,
            Err(flow) => return Ok(flow),
        };

        if self.service.update_book(&book)? {
            writeln!(self.output, "Book details have been updated in the database!")?;
        } else {
            writeln!(self.output, "{NOT_FOUND_MESSAGE}")?;
        }
        Ok(Flow::Continue)
    }

    fn remove_book(&mut self) -> Result<Flow> {
        let id = match self.read_id()? {
            Ok(id) => id,
            Err(flow) => return Ok(flow),
        };
        if self.service.remove_book(id)? {
            writeln!(self.output, "Book removed from the database!")?;
        } else {
            writeln!(self.output, "{NOT_FOUND_MESSAGE}")?;
        }
        Ok(Flow::Continue)
    }

    fn search_book(&mut self) -> Result<Flow> {
        let id = match self.read_id()? {
            Ok(id) => id,
            Err(flow) => return Ok(flow),
        };
        if let Ok(book) = self.lookup(id)? {
            writeln!(self.output, "Book found: {book}")?;
        }
        Ok(Flow::Continue)
    }

    /// Reports missing and unreadable rows itself and yields `Flow::Continue`.
    fn lookup(&mut self, id: BookId) -> Result<Step<Book>> {
        match self.service.find_book(id) {
            Ok(Some(book)) => Ok(Ok(book)),
            Ok(None) => {
                writeln!(self.output, "{NOT_FOUND_MESSAGE}")?;
                Ok(Err(Flow::Continue))
            }
            Err(RepoError::InvalidData(message)) => {
                writeln!(
                    self.output,
                    "Stored data for book {id} is unreadable: {message}"
                )?;
                Ok(Err(Flow::Continue))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn read_id(&mut self) -> Result<Step<BookId>> {
        let raw = match self.answer("Enter book id: ")? {
            Ok(raw) => raw,
            Err(flow) => return Ok(Err(flow)),
        };
        match parse_book_id(&raw) {
            Ok(id) => Ok(Ok(id)),
            Err(err) => self.reject(&err),
        }
    }

    fn read_fields(
        &mut self,
        id: BookId,
        title_label: &str,
        author_label: &str,
        qty_label: &str,
    ) -> Result<Step<Book>> {
        let title = match self.answer(title_label)? {
            Ok(raw) => raw,
            Err(flow) => return Ok(Err(flow)),
        };
        let author = match self.answer(author_label)? {
            Ok(raw) => raw,
            Err(flow) => return Ok(Err(flow)),
        };
        let qty = match self.answer(qty_label)? {
            Ok(raw) => raw,
            Err(flow) => return Ok(Err(flow)),
        };

        match parse_quantity(&qty).and_then(|qty| Book::new(id, title, author, qty)) {
            Ok(book) => Ok(Ok(book)),
            Err(err) => self.reject(&err),
        }
    }

    /// Malformed input abandons the current action and goes back to the menu.
    fn reject<T>(&mut self, err: &BookValidationError) -> Result<Step<T>> {
        writeln!(self.output, "Invalid input: {err}")?;
        Ok(Err(Flow::Continue))
    }

    /// `Err(Flow::Exit)` on end of input.
    fn answer(&mut self, label: &str) -> Result<Step<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Err(Flow::Exit));
        }
        Ok(Ok(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::run_menu;
    use bookstore_core::{
        open_db_in_memory, BookRepository, InventoryService, SqliteBookRepository,
    };
    use rusqlite::Connection;
    use std::io::Cursor;

    fn run_script(conn: &Connection, script: &str) -> String {
        let service = InventoryService::new(SqliteBookRepository::try_new(conn).unwrap());
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        run_menu(&service, &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn search_prints_seeded_book() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "4\n3001\n5\n");

        assert!(output.starts_with("Welcome to the eBookstore!"));
        assert!(output.contains(
            "Book found: 3001 | A Tale of Two Cities | Charles Dickens | 30 in stock"
        ));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn add_then_update_then_remove() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(
            &conn,
            "1\n9001\nTest Book\nTest Author\n5\n\
             2\n9001\nNew Title\nNew Author\n10\n\
             4\n9001\n\
             3\n9001\n\
             4\n9001\n5\n",
        );

        assert!(output.contains("Book added to the database!"));
        assert!(output.contains("Book details have been updated in the database!"));
        assert!(output.contains("Book found: 9001 | New Title | New Author | 10 in stock"));
        assert!(output.contains("Book removed from the database!"));
        assert!(output.contains("No book found with that id!"));

        let repo = SqliteBookRepository::try_new(&conn).unwrap();
        assert!(repo.get_book(9001).unwrap().is_none());
    }

    #[test]
    fn duplicate_id_is_reported_and_session_continues() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "1\n3001\nCopy\nSomeone\n1\n4\n3001\n5\n");

        assert!(output.contains("A book with id 3001 already exists!"));
        assert!(output.contains("Book found: 3001 | A Tale of Two Cities"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn update_and_remove_of_missing_book_report_not_found() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "2\n42\n3\n42\n5\n");

        assert_eq!(output.matches("No book found with that id!").count(), 2);
        assert!(!output.contains("Enter new book title: "));
    }

    #[test]
    fn malformed_id_returns_to_menu_without_field_prompts() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "1\nabc\n4\n3001\n5\n");

        assert!(output.contains("Invalid input: book id must be a whole number, got `abc`"));
        assert!(!output.contains("Enter book title: "));
        assert_eq!(output.matches("Enter book id: ").count(), 2);
        assert!(output.contains("Book found: 3001 | A Tale of Two Cities"));
    }

    #[test]
    fn malformed_quantity_returns_to_menu_without_storing() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "1\n9002\nTitle\nAuthor\nmany\n4\n9002\n5\n");

        assert!(output.contains("Invalid input: quantity must be a whole number, got `many`"));
        assert_eq!(output.matches("How many books in stock?: ").count(), 1);
        assert!(!output.contains("Book added to the database!"));
        assert!(output.contains("No book found with that id!"));

        let repo = SqliteBookRepository::try_new(&conn).unwrap();
        assert!(repo.get_book(9002).unwrap().is_none());
    }

    #[test]
    fn unreadable_stored_row_is_reported_and_session_continues() {
        let conn = open_db_in_memory().unwrap();
        conn.execute("UPDATE book SET qty = 'lots' WHERE id = 3001;", [])
            .unwrap();
        let output = run_script(&conn, "4\n3001\n2\n3001\n4\n3002\n5\n");

        assert_eq!(
            output
                .matches("Stored data for book 3001 is unreadable:")
                .count(),
            2
        );
        assert!(!output.contains("Enter new book title: "));
        assert!(output.contains("Book found: 3002"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn invalid_choice_reprompts_and_eof_ends_session() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "9\n");

        assert!(output.contains("Invalid choice. Please try again."));
        assert_eq!(output.matches("Enter your choice: ").count(), 2);
        assert!(!output.contains("Goodbye!"));
    }
}
