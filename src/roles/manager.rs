//! Manager facade: maintains the collection.

use super::{Browse, Role};
use crate::library::{CatalogError, SharedCatalog};

/// Catalog access for managers
#[derive(Debug, Clone)]
pub struct Manager {
    catalog: SharedCatalog,
}

impl Manager {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }

    /// Add a copy of `title` under `author`
    pub fn add_book(&self, author: &str, title: &str) -> Result<(), CatalogError> {
        self.catalog.add_book(author, title)
    }

    /// Remove the first copy of `title` under `author`; `false` if absent
    pub fn remove_book(&self, author: &str, title: &str) -> Result<bool, CatalogError> {
        self.catalog.remove_book(author, title)
    }
}

impl Browse for Manager {
    fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    fn role(&self) -> Role {
        Role::Manager
    }
}
