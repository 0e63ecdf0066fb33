//! Flat-file persistence for the catalog.
//!
//! # File Format
//!
//! ```text
//! Orwell;1984;true
//! Orwell;Animal Farm;false
//! Huxley;Brave New World;true
//! ```
//!
//! No escaping exists: a `;` or line break inside an author or title corrupts
//! the line on reload. Use [`codec::check_field`] before storing user input.

pub mod codec;
pub mod file;

pub use codec::{check_field, decode, encode, FieldError, FIELD_SEPARATOR};
pub use file::{CatalogFile, DEFAULT_FILE_NAME};
