//! The library catalog: authors, their books, and availability.
//!
//! # Structure
//!
//! ```text
//! Catalog
//! ├── AuthorGroup("Orwell")
//! │   ├── Record("1984", available)
//! │   └── Record("Animal Farm", checked out)
//! └── AuthorGroup("Huxley")
//!     └── Record("Brave New World", available)
//! ```
//!
//! `Catalog` is the single-threaded engine; `SharedCatalog` wraps it for use
//! from several threads or several role facades at once.

pub mod catalog;
pub mod shared;

pub use catalog::{Catalog, CatalogError, Lookup};
pub use shared::SharedCatalog;
