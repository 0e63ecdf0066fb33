//! Thread-safe handle to a catalog.
//!
//! Every operation takes the lock exactly once, so lookup, mutation and the
//! file rewrite happen in one critical section. Two callers can never
//! interleave a lookup with someone else's save.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::catalog::{Catalog, CatalogError, Lookup};
use crate::domain::Record;

/// Cloneable, lock-protected catalog shared by role facades
#[derive(Debug, Clone)]
pub struct SharedCatalog {
    inner: Arc<Mutex<Catalog>>,
}

impl SharedCatalog {
    /// Wrap an open catalog
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Open the catalog at `path` and wrap it
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        Catalog::open(path).map(Self::new)
    }

    /// Run a read-only closure against a consistent view of the catalog
    pub fn read<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        f(&*self.lock())
    }

    /// Author names in stored order
    pub fn list_authors(&self) -> Vec<String> {
        self.read(|c| c.list_authors().into_iter().map(String::from).collect())
    }

    /// Books of the author at `author_index`
    pub fn books_of(&self, author_index: usize) -> Result<Vec<Record>, CatalogError> {
        self.read(|c| c.books_of(author_index).map(<[Record]>::to_vec))
    }

    /// Availability of a book addressed by position
    pub fn is_available(&self, author_index: usize, book_index: usize) -> Result<bool, CatalogError> {
        self.read(|c| c.is_available(author_index, book_index))
    }

    /// Classify an (author, title) pair
    pub fn lookup(&self, author: &str, title: &str) -> Lookup {
        self.read(|c| c.lookup(author, title))
    }

    /// See [`Catalog::add_book`]
    pub fn add_book(&self, author: &str, title: &str) -> Result<(), CatalogError> {
        self.lock().add_book(author, title)
    }

    /// See [`Catalog::remove_book`]
    pub fn remove_book(&self, author: &str, title: &str) -> Result<bool, CatalogError> {
        self.lock().remove_book(author, title)
    }

    /// See [`Catalog::check_out`]
    pub fn check_out(&self, author: &str, title: &str) -> Result<bool, CatalogError> {
        self.lock().check_out(author, title)
    }

    /// See [`Catalog::return_copy`]
    pub fn return_copy(&self, author: &str, title: &str) -> Result<bool, CatalogError> {
        self.lock().return_copy(author, title)
    }

    // A panic mid-operation can only happen before the save, and the
    // in-memory state is whole at that point, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
