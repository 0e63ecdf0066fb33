//! Book records and their author grouping.
//!
//! A `Record` is a single copy of a title. Records never change title once
//! created; only the catalog flips their availability.

use std::fmt;

use serde::Serialize;

/// A single book copy in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Book title (fixed at creation)
    title: String,

    /// Name of the author group this record belongs to
    author: String,

    /// Whether the copy can be checked out
    available: bool,
}

impl Record {
    /// Create a record for an author group
    pub(crate) fn new(author: impl Into<String>, title: impl Into<String>, available: bool) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            available,
        }
    }

    /// Get the title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the owning author's name
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Check if the copy is on the shelf
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.available { "Available" } else { "Unavailable" };
        write!(f, "{} - {}", self.title, status)
    }
}

/// An author together with their books, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorGroup {
    /// Author name (unique within a catalog)
    author: String,

    /// Books by this author; never empty while the group is in a catalog
    records: Vec<Record>,
}

impl AuthorGroup {
    /// Start a group with its first book
    pub(crate) fn new(author: impl Into<String>, title: impl Into<String>, available: bool) -> Self {
        let author = author.into();
        let first = Record::new(author.clone(), title, available);

        Self {
            author,
            records: vec![first],
        }
    }

    /// Get the author name
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Get the books in stored order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Append a book to the end of the group
    pub(crate) fn push(&mut self, title: impl Into<String>, available: bool) {
        let record = Record::new(self.author.clone(), title, available);
        self.records.push(record);
    }

    /// Position of the first record with exactly this title
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.records.iter().position(|r| r.title == title)
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }
}
