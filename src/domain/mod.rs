//! Domain types for the shelf catalog.
//!
//! This module contains the core data structures:
//! - Record: One copy of a book and its availability
//! - AuthorGroup: An author and their books in insertion order

pub mod record;

// Re-export commonly used types
pub use record::{AuthorGroup, Record};
