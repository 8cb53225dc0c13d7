//! Book record value type

use std::fmt;

/// A book entry. Each index keeps its own copy; records are never
/// mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Title, the Title Index key
    pub title: String,
    /// Author (not indexed)
    pub author: String,
    /// Identifier, the Identifier Index key. Uniqueness is not enforced.
    pub isbn: String,
}

impl Record {
    /// Create a new record
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Record {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, ISBN: {}",
            self.title, self.author, self.isbn
        )
    }
}
