//! Interactive menu session
//!
//! Reads whole lines from any `BufRead` and writes prompts and results to
//! any `Write`, so the same loop drives a terminal or a scripted test.
//! End of input ends the session the same way as choosing Exit.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use bookshelf_engine::{RecordStore, StatusCode};

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MenuChoice {
    AddBook = 1,
    DeleteBook = 2,
    SearchBook = 3,
    DisplayAll = 4,
    Exit = 5,
    DisplayByTitle = 6,
    ShowStats = 7,
    Invalid = 0,
}

impl MenuChoice {
    pub fn from_raw(code: u32) -> Self {
        match code {
            1 => MenuChoice::AddBook,
            2 => MenuChoice::DeleteBook,
            3 => MenuChoice::SearchBook,
            4 => MenuChoice::DisplayAll,
            5 => MenuChoice::Exit,
            6 => MenuChoice::DisplayByTitle,
            7 => MenuChoice::ShowStats,
            _ => MenuChoice::Invalid,
        }
    }

    /// Parse a menu line; anything that is not a known number is invalid
    pub fn parse(line: &str) -> Self {
        line.trim()
            .parse::<u32>()
            .map(Self::from_raw)
            .unwrap_or(MenuChoice::Invalid)
    }
}

const MENU: &str = "\nLibrary Management System\n\
1. Add Book\n\
2. Delete Book\n\
3. Search Book\n\
4. Display All Books\n\
5. Exit\n\
6. Display Books by Title\n\
7. Show Index Statistics\n";

const NOT_FOUND: &str = "Book not found!";

/// Per-session counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub total_commands: u64,
    pub invalid_commands: u64,
}

impl SessionStats {
    pub fn record_command(&mut self, valid: bool) {
        self.total_commands += 1;
        if !valid {
            self.invalid_commands += 1;
        }
    }
}

/// A menu loop over a record store
pub struct Session<R, W> {
    store: RecordStore,
    input: R,
    output: W,
    stats: SessionStats,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: RecordStore, input: R, output: W) -> Self {
        Session {
            store,
            input,
            output,
            stats: SessionStats::default(),
        }
    }

    /// Run until Exit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                debug!("Input closed, ending session");
                return Ok(());
            };

            let choice = MenuChoice::parse(&line);
            self.stats.record_command(choice != MenuChoice::Invalid);

            let keep_going = match choice {
                MenuChoice::AddBook => self.add_book()?,
                MenuChoice::DeleteBook => self.delete_book()?,
                MenuChoice::SearchBook => self.search_book()?,
                MenuChoice::DisplayAll => self.display_all()?,
                MenuChoice::DisplayByTitle => self.display_by_title()?,
                MenuChoice::ShowStats => self.show_stats()?,
                MenuChoice::Exit => false,
                MenuChoice::Invalid => {
                    warn!("Menu choice {:?} rejected: {}", line, StatusCode::InvalidOperation);
                    writeln!(self.output, "Invalid choice! Please try again.")?;
                    true
                }
            };

            if !keep_going {
                return Ok(());
            }
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Give back the store once the session is over
    pub fn into_store(self) -> RecordStore {
        self.store
    }

    /// Print a prompt and read one line without its line ending.
    /// Bytes that are not UTF-8 become U+FFFD. `None` means input is
    /// exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    // Each handler returns false when input ran out mid-command

    fn add_book(&mut self) -> io::Result<bool> {
        let Some(title) = self.prompt("Enter book title: ")? else {
            return Ok(false);
        };
        let Some(author) = self.prompt("Enter book author: ")? else {
            return Ok(false);
        };
        let Some(isbn) = self.prompt("Enter book ISBN: ")? else {
            return Ok(false);
        };

        self.store.add_record(title, author, isbn);
        writeln!(self.output, "Book added successfully!")?;
        Ok(true)
    }

    fn delete_book(&mut self) -> io::Result<bool> {
        let Some(isbn) = self.prompt("Enter book ISBN to delete: ")? else {
            return Ok(false);
        };

        if self.store.delete_record(&isbn) {
            writeln!(self.output, "Book deleted successfully!")?;
        } else {
            writeln!(self.output, "{}", NOT_FOUND)?;
        }
        Ok(true)
    }

    fn search_book(&mut self) -> io::Result<bool> {
        let Some(kind) = self.prompt("Search by (1) Title or (2) ISBN: ")? else {
            return Ok(false);
        };

        let by_title = match kind.trim() {
            "1" => true,
            "2" => false,
            other => {
                warn!("Search type {:?} rejected: {}", other, StatusCode::InvalidOperation);
                writeln!(self.output, "Invalid search type!")?;
                return Ok(true);
            }
        };

        let (label, found) = if by_title {
            let Some(title) = self.prompt("Enter book title: ")? else {
                return Ok(false);
            };
            ("title", self.store.find_by_title(&title).cloned())
        } else {
            let Some(isbn) = self.prompt("Enter book ISBN: ")? else {
                return Ok(false);
            };
            ("ISBN", self.store.find_by_id(&isbn).cloned())
        };

        match found {
            Some(record) => writeln!(self.output, "Book found: {}", record)?,
            None => {
                debug!("Search by {} missed: {}", label, StatusCode::KeyNotFound);
                writeln!(self.output, "{}", NOT_FOUND)?;
            }
        }
        Ok(true)
    }

    fn display_all(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Books in collection:")?;
        for record in self.store.list_all() {
            writeln!(self.output, "{}", record)?;
        }
        Ok(true)
    }

    fn display_by_title(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Books by title:")?;
        for record in self.store.list_by_title() {
            writeln!(self.output, "{}", record)?;
        }
        Ok(true)
    }

    fn show_stats(&mut self) -> io::Result<bool> {
        let stats = self.store.stats();
        writeln!(self.output, "Index statistics:")?;
        writeln!(self.output, "  Insertion order: {} records", stats.ordered)?;
        writeln!(
            self.output,
            "  Title tree: {} records, height {}{}",
            stats.titled,
            stats.tree_height,
            if stats.tree_degenerate { " (unbalanced)" } else { "" }
        )?;
        writeln!(
            self.output,
            "  ISBN table: {} records in {} buckets (load {:.2}, longest chain {})",
            stats.identified, stats.bucket_count, stats.load_factor, stats.longest_chain
        )?;
        writeln!(self.output, "  Stale entries: {}", stats.stale)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> (String, RecordStore, SessionStats) {
        run_bytes(script.as_bytes())
    }

    fn run_bytes(script: &[u8]) -> (String, RecordStore, SessionStats) {
        let mut output = Vec::new();
        let mut session = Session::new(RecordStore::new(), Cursor::new(script), &mut output);
        session.run().unwrap();
        let stats = session.stats().clone();
        let store = session.into_store();
        (String::from_utf8(output).unwrap(), store, stats)
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), MenuChoice::AddBook);
        assert_eq!(MenuChoice::parse(" 5 \r"), MenuChoice::Exit);
        assert_eq!(MenuChoice::parse("7"), MenuChoice::ShowStats);
        assert_eq!(MenuChoice::parse("0"), MenuChoice::Invalid);
        assert_eq!(MenuChoice::parse("abc"), MenuChoice::Invalid);
        assert_eq!(MenuChoice::parse(""), MenuChoice::Invalid);
    }

    #[test]
    fn test_add_and_display_all() {
        let (out, store, _) = run_script(
            "1\nDune\nFrank Herbert\n111\n\
             1\nEmma\nJane Austen\n222\n\
             4\n5\n",
        );

        assert_eq!(out.matches("Book added successfully!").count(), 2);
        assert!(out.contains(
            "Books in collection:\n\
             Title: Dune, Author: Frank Herbert, ISBN: 111\n\
             Title: Emma, Author: Jane Austen, ISBN: 222\n"
        ));
        assert_eq!(store.list_all().count(), 2);
    }

    #[test]
    fn test_titles_keep_inner_spaces() {
        let (_, store, _) = run_script("1\n  The Left Hand of Darkness \nLe Guin\n 42 \n5\n");
        let record = store.find_by_id(" 42 ").unwrap();
        assert_eq!(record.title, "  The Left Hand of Darkness ");
    }

    #[test]
    fn test_non_utf8_input_keeps_session_running() {
        let (out, store, stats) =
            run_bytes(b"1\nDune\nHerbert\n111\n1\nCaf\xE9\nX\n222\r\n4\n5\n");

        assert_eq!(out.matches("Book added successfully!").count(), 2);
        assert!(out.contains("Title: Caf\u{FFFD}, Author: X, ISBN: 222\n"));
        assert_eq!(store.find_by_id("222").unwrap().title, "Caf\u{FFFD}");
        assert_eq!(stats.total_commands, 4);
    }

    #[test]
    fn test_delete_then_search() {
        let (out, _, _) = run_script(
            "1\nEmma\nAusten\n222\n\
             2\n222\n\
             2\n222\n\
             3\n2\n222\n\
             3\n1\nEmma\n\
             5\n",
        );

        assert!(out.contains("Book deleted successfully!"));
        // Second delete and the ISBN search both miss
        assert_eq!(out.matches("Book not found!").count(), 2);
        // Title index still has the record
        assert!(out.contains("Book found: Title: Emma, Author: Austen, ISBN: 222"));
    }

    #[test]
    fn test_invalid_inputs() {
        let (out, _, stats) = run_script("9\nhello\n3\n4\n5\n");

        assert_eq!(out.matches("Invalid choice! Please try again.").count(), 2);
        assert!(out.contains("Invalid search type!"));
        assert_eq!(stats.total_commands, 4);
        assert_eq!(stats.invalid_commands, 2);
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (out, store, _) = run_script("1\nHalf Entered\n");
        assert!(out.ends_with("Enter book author: "));
        assert!(store.is_empty());

        let (out, _, stats) = run_script("");
        assert!(out.ends_with("Enter your choice: "));
        assert_eq!(stats.total_commands, 0);
    }

    #[test]
    fn test_display_by_title_and_stats() {
        let (out, _, _) = run_script(
            "1\nDune\nHerbert\n111\n\
             1\nAnnie\nShepherd\n333\n\
             2\n111\n\
             6\n7\n5\n",
        );

        assert!(out.contains(
            "Books by title:\n\
             Title: Annie, Author: Shepherd, ISBN: 333\n\
             Title: Dune, Author: Herbert, ISBN: 111\n"
        ));
        assert!(out.contains("Title tree: 2 records, height 2\n"));
        assert!(out.contains("ISBN table: 1 records in 100 buckets"));
        assert!(out.contains("Stale entries: 1"));
    }
}
