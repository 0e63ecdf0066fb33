//! Borrower facade: takes books out and brings them back.

use super::{Browse, Role};
use crate::domain::Record;
use crate::library::{CatalogError, Lookup, SharedCatalog};

/// Catalog access for borrowers
#[derive(Debug, Clone)]
pub struct Borrower {
    catalog: SharedCatalog,
}

impl Borrower {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }

    /// Check out a book; `false` if unknown or already out
    pub fn check_out(&self, author: &str, title: &str) -> Result<bool, CatalogError> {
        self.catalog.check_out(author, title)
    }

    /// Return a book; `false` if unknown or already in
    pub fn return_copy(&self, author: &str, title: &str) -> Result<bool, CatalogError> {
        self.catalog.return_copy(author, title)
    }

    /// Check out the book a record describes (e.g. one picked from `books_of`)
    pub fn check_out_record(&self, record: &Record) -> Result<bool, CatalogError> {
        self.check_out(record.author(), record.title())
    }

    /// Return the book a record describes
    pub fn return_record(&self, record: &Record) -> Result<bool, CatalogError> {
        self.return_copy(record.author(), record.title())
    }

    /// Where a book stands, to explain a check-out or return that did nothing
    pub fn lookup(&self, author: &str, title: &str) -> Lookup {
        self.catalog.lookup(author, title)
    }
}

impl Browse for Borrower {
    fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    fn role(&self) -> Role {
        Role::Borrower
    }
}
