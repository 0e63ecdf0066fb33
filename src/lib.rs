//! shelf - Flat-file library catalog
//!
//! Tracks authors, their books, and whether each book is on the shelf.
//! The catalog lives in a plain text file and is rewritten after every change.
//!
//! # Architecture
//!
//! - Records are grouped by author in insertion order
//! - Every successful mutation rewrites the whole file before returning
//! - Roles get separate facades instead of runtime permission checks
//!
//! # Modules
//!
//! - `domain`: Data structures (Record, AuthorGroup)
//! - `store`: Flat-file codec and the catalog file
//! - `library`: The catalog engine and its thread-safe handle
//! - `roles`: Manager and borrower facades
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Add a book
//! shelf --role manager add "Orwell" "1984"
//!
//! # Browse
//! shelf authors
//! shelf books 0
//!
//! # Borrow it
//! shelf --role borrower checkout "Orwell" "1984"
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod roles;
pub mod store;

// Re-export main types at crate root for convenience
pub use domain::{AuthorGroup, Record};
pub use library::{Catalog, CatalogError, Lookup, SharedCatalog};
pub use roles::{Borrower, Browse, Manager, Role};
