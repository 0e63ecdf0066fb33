//! The catalog engine.
//!
//! Holds every book grouped by author, answers lookups, and applies the four
//! mutations (add, remove, check out, return). Each successful mutation
//! re-encodes the whole catalog and replaces the file before returning.
//!
//! Authors and books are addressed two ways:
//! - by name and title (stable; used by all mutations)
//! - by position (`books_of`, `is_available`), which shifts whenever an author
//!   group is added or removed. Callers must recompute positions after every
//!   mutation.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{AuthorGroup, Record};
use crate::store::{self, CatalogFile};

/// Errors raised by catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Author index {index} out of bounds ({len} authors)")]
    AuthorOutOfBounds { index: usize, len: usize },

    #[error("Book index {index} out of bounds for '{author}' ({len} books)")]
    BookOutOfBounds {
        author: String,
        index: usize,
        len: usize,
    },

    /// The mutation was applied in memory but the file is stale
    #[error("Failed to save catalog to {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to load catalog from {}: {source}", .path.display())]
    Startup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where an (author, title) pair stands in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    AuthorNotFound,
    TitleNotFound,
    Available,
    CheckedOut,
}

/// In-memory catalog backed by a flat file
#[derive(Debug)]
pub struct Catalog {
    groups: Vec<AuthorGroup>,
    file: CatalogFile,
}

impl Catalog {
    /// Load the catalog at `path`, creating an empty file if it is missing.
    ///
    /// Any I/O failure here is a startup failure; the caller should stop
    /// rather than continue with an empty catalog.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let file = CatalogFile::new(path);

        let contents = file.load_or_create().map_err(|source| CatalogError::Startup {
            path: file.path().to_path_buf(),
            source,
        })?;

        let groups = store::decode(&contents);
        let catalog = Self { groups, file };

        info!(
            path = %catalog.path().display(),
            authors = catalog.len(),
            books = catalog.book_count(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Author names in stored order
    pub fn list_authors(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.author()).collect()
    }

    /// All author groups in stored order
    pub fn groups(&self) -> &[AuthorGroup] {
        &self.groups
    }

    /// Books of the author at `author_index`
    pub fn books_of(&self, author_index: usize) -> Result<&[Record], CatalogError> {
        self.group_at(author_index).map(|g| g.records())
    }

    /// Availability of a book addressed by position
    pub fn is_available(&self, author_index: usize, book_index: usize) -> Result<bool, CatalogError> {
        let group = self.group_at(author_index)?;

        group
            .records()
            .get(book_index)
            .map(Record::is_available)
            .ok_or_else(|| CatalogError::BookOutOfBounds {
                author: group.author().to_string(),
                index: book_index,
                len: group.records().len(),
            })
    }

    /// Position of an author (exact, case-sensitive match)
    pub fn author_position(&self, author: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.author() == author)
    }

    /// Classify an (author, title) pair
    pub fn lookup(&self, author: &str, title: &str) -> Lookup {
        let Some(index) = self.author_position(author) else {
            return Lookup::AuthorNotFound;
        };

        let group = &self.groups[index];
        match group.position_of(title) {
            None => Lookup::TitleNotFound,
            Some(i) if group.records()[i].is_available() => Lookup::Available,
            Some(_) => Lookup::CheckedOut,
        }
    }

    /// Add an available copy, creating the author group if needed.
    ///
    /// Duplicate titles are accepted; later lookups act on the first copy.
    pub fn add_book(&mut self, author: &str, title: &str) -> Result<(), CatalogError> {
        match self.author_position(author) {
            Some(index) => self.groups[index].push(title, true),
            None => self.groups.push(AuthorGroup::new(author, title, true)),
        }

        debug!(author, title, "Book added");
        self.persist()
    }

    /// Remove the first copy with this title.
    ///
    /// Returns `false` without saving when nothing matched. Removing an
    /// author's last book removes the author, shifting later positions down.
    pub fn remove_book(&mut self, author: &str, title: &str) -> Result<bool, CatalogError> {
        let Some((a, b)) = self.locate(author, title) else {
            return Ok(false);
        };

        let records = self.groups[a].records_mut();
        records.remove(b);

        if records.is_empty() {
            self.groups.remove(a);
            debug!(author, "Author removed with last book");
        }

        debug!(author, title, "Book removed");
        self.persist()?;
        Ok(true)
    }

    /// Check out an available copy.
    ///
    /// Returns `false` without saving when the book is unknown or already out.
    pub fn check_out(&mut self, author: &str, title: &str) -> Result<bool, CatalogError> {
        self.set_availability(author, title, false)
    }

    /// Return a checked-out copy.
    ///
    /// Returns `false` without saving when the book is unknown or already in.
    pub fn return_copy(&mut self, author: &str, title: &str) -> Result<bool, CatalogError> {
        self.set_availability(author, title, true)
    }

    /// Number of authors
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the catalog has no books
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of books across all authors
    pub fn book_count(&self) -> usize {
        self.groups.iter().map(|g| g.records().len()).sum()
    }

    fn group_at(&self, index: usize) -> Result<&AuthorGroup, CatalogError> {
        self.groups.get(index).ok_or(CatalogError::AuthorOutOfBounds {
            index,
            len: self.groups.len(),
        })
    }

    /// Positions of the first matching record
    fn locate(&self, author: &str, title: &str) -> Option<(usize, usize)> {
        let a = self.author_position(author)?;
        let b = self.groups[a].position_of(title)?;
        Some((a, b))
    }

    fn set_availability(&mut self, author: &str, title: &str, available: bool) -> Result<bool, CatalogError> {
        let Some((a, b)) = self.locate(author, title) else {
            return Ok(false);
        };

        let record = &mut self.groups[a].records_mut()[b];
        if record.is_available() == available {
            return Ok(false);
        }
        record.set_available(available);

        debug!(author, title, available, "Availability changed");
        self.persist()?;
        Ok(true)
    }

    /// Rewrite the whole file from the in-memory state
    fn persist(&self) -> Result<(), CatalogError> {
        let contents = store::encode(&self.groups);

        self.file.save(&contents).map_err(|source| {
            warn!(path = %self.path().display(), error = %source, "Catalog save failed");
            CatalogError::Persistence {
                path: self.path().to_path_buf(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_with(contents: &str) -> (Catalog, TempDir) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("BooksFile");
        std::fs::write(&path, contents).unwrap();

        (Catalog::open(&path).unwrap(), temp)
    }

    fn file_contents(catalog: &Catalog) -> String {
        std::fs::read_to_string(catalog.path()).unwrap()
    }

    #[test]
    fn test_open_missing_file_creates_it() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("BooksFile");

        let catalog = Catalog::open(&path).unwrap();

        assert!(catalog.is_empty());
        assert!(catalog.list_authors().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_add_new_author_appends_group() {
        let (mut catalog, _temp) = open_with("Orwell;1984;true\n");

        catalog.add_book("Huxley", "Island").unwrap();

        assert_eq!(catalog.list_authors(), vec!["Orwell", "Huxley"]);
        assert_eq!(catalog.books_of(1).unwrap()[0].title(), "Island");
        assert!(catalog.is_available(1, 0).unwrap());
    }

    #[test]
    fn test_add_duplicate_title_is_kept() {
        let (mut catalog, _temp) = open_with("Orwell;1984;false\n");

        catalog.add_book("Orwell", "1984").unwrap();

        assert_eq!(catalog.books_of(0).unwrap().len(), 2);
        // First copy is still the one lookups see
        assert_eq!(catalog.lookup("Orwell", "1984"), Lookup::CheckedOut);
        assert!(catalog.return_copy("Orwell", "1984").unwrap());
        assert_eq!(file_contents(&catalog), "Orwell;1984;true\nOrwell;1984;true\n");
    }

    #[test]
    fn test_remove_missing_does_not_save() {
        let (mut catalog, _temp) = open_with("Orwell ; 1984 ; true");

        assert!(!catalog.remove_book("Huxley", "Island").unwrap());
        assert!(!catalog.remove_book("Orwell", "Island").unwrap());

        // Untouched file keeps its original (unnormalized) text
        assert_eq!(file_contents(&catalog), "Orwell ; 1984 ; true");
    }

    #[test]
    fn test_remove_last_book_drops_author() {
        let (mut catalog, _temp) = open_with("A;a1;true\nB;b1;true\nC;c1;true\n");

        assert!(catalog.remove_book("B", "b1").unwrap());

        assert_eq!(catalog.list_authors(), vec!["A", "C"]);
        assert_eq!(catalog.books_of(1).unwrap()[0].title(), "c1");
        assert!(catalog.books_of(2).is_err());
    }

    #[test]
    fn test_remove_preserves_order() {
        let (mut catalog, _temp) = open_with("A;one;true\nA;two;true\nA;three;true\n");

        catalog.remove_book("A", "two").unwrap();

        let titles: Vec<_> = catalog.books_of(0).unwrap().iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["one", "three"]);
    }

    #[test]
    fn test_check_out_and_return() {
        let (mut catalog, _temp) = open_with("Orwell;1984;true\n");

        assert!(catalog.check_out("Orwell", "1984").unwrap());
        assert!(!catalog.is_available(0, 0).unwrap());
        assert!(!catalog.check_out("Orwell", "1984").unwrap());
        assert_eq!(file_contents(&catalog), "Orwell;1984;false\n");

        assert!(catalog.return_copy("Orwell", "1984").unwrap());
        assert!(!catalog.return_copy("Orwell", "1984").unwrap());
        assert_eq!(file_contents(&catalog), "Orwell;1984;true\n");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let (catalog, _temp) = open_with("Orwell;1984;true\n");

        assert_eq!(catalog.lookup("orwell", "1984"), Lookup::AuthorNotFound);
        assert_eq!(catalog.lookup("Orwell", "Nineteen"), Lookup::TitleNotFound);
        assert_eq!(catalog.lookup("Orwell", "1984"), Lookup::Available);
        assert_eq!(catalog.author_position("Orwell"), Some(0));
        assert_eq!(catalog.author_position("orwell"), None);
    }

    #[test]
    fn test_bounds_errors() {
        let (catalog, _temp) = open_with("Orwell;1984;true\n");

        assert!(matches!(
            catalog.books_of(1),
            Err(CatalogError::AuthorOutOfBounds { index: 1, len: 1 })
        ));
        assert!(matches!(
            catalog.is_available(0, 1),
            Err(CatalogError::BookOutOfBounds { index: 1, len: 1, .. })
        ));
        assert!(matches!(
            catalog.is_available(5, 0),
            Err(CatalogError::AuthorOutOfBounds { index: 5, .. })
        ));
    }

    #[test]
    fn test_save_failure_keeps_mutation() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("shelf");
        let mut catalog = Catalog::open(dir.join("BooksFile")).unwrap();

        std::fs::remove_dir_all(&dir).unwrap();

        let result = catalog.add_book("Orwell", "1984");
        assert!(matches!(result, Err(CatalogError::Persistence { .. })));
        assert_eq!(catalog.list_authors(), vec!["Orwell"]);
    }
}
