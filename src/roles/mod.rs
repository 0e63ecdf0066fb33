//! Capability-scoped views of the catalog.
//!
//! Each role gets its own facade over the same `SharedCatalog`:
//! - `Manager`: browse, add and remove books
//! - `Borrower`: browse, check out and return books
//!
//! A facade simply doesn't have the methods its role may not call, so there
//! is nothing to check at runtime.

pub mod borrower;
pub mod manager;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Record;
use crate::library::{CatalogError, SharedCatalog};

pub use borrower::Borrower;
pub use manager::Manager;

/// Who is using the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Adds and removes books
    Manager,

    /// Checks books out and returns them
    Borrower,
}

impl Role {
    /// Greeting shown when a session starts
    pub fn greeting(self) -> &'static str {
        match self {
            Role::Manager => "Hello, manager!",
            Role::Borrower => "Hello, borrower!",
        }
    }

    /// Lowercase role name
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Borrower => "borrower",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only catalog access shared by every role
pub trait Browse {
    /// The catalog behind this facade
    fn catalog(&self) -> &SharedCatalog;

    /// The role this facade acts for
    fn role(&self) -> Role;

    fn greeting(&self) -> &'static str {
        self.role().greeting()
    }

    fn list_authors(&self) -> Vec<String> {
        self.catalog().list_authors()
    }

    fn books_of(&self, author_index: usize) -> Result<Vec<Record>, CatalogError> {
        self.catalog().books_of(author_index)
    }

    fn is_available(&self, author_index: usize, book_index: usize) -> Result<bool, CatalogError> {
        self.catalog().is_available(author_index, book_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_greetings_differ() {
        assert_ne!(Role::Manager.greeting(), Role::Borrower.greeting());
        assert!(Role::Manager.greeting().contains("manager"));
    }

    #[test]
    fn test_role_serde_names() {
        let role: Role = serde_yaml::from_str("borrower").unwrap();
        assert_eq!(role, Role::Borrower);
        assert_eq!(Role::Manager.to_string(), "manager");
    }
}
