//! Command-line interface for shelf.
//!
//! Browsing commands work under any role. Mutating commands are only reachable
//! through the facade of the role that owns them: `add`/`remove` need
//! `--role manager`, `checkout`/`return` need `--role borrower`.
//!
//! Positions printed by `authors` and `books` are recomputed on every run and
//! are only valid until the next add or remove.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{self, ResolvedConfig};
use crate::domain::{AuthorGroup, Record};
use crate::library::{Lookup, SharedCatalog};
use crate::roles::{Borrower, Browse, Manager, Role};
use crate::store::check_field;

/// shelf - Flat-file library catalog
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file (overrides SHELF_CATALOG and the config file)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Role to act as
    #[arg(short, long, global = true, value_enum, env = "SHELF_ROLE")]
    pub role: Option<RoleArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List authors with their positions
    Authors {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the books of an author
    Books {
        /// Author position (from `shelf authors`)
        author_index: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a book is available
    Available {
        /// Author position (from `shelf authors`)
        author_index: usize,

        /// Book position (from `shelf books`)
        book_index: usize,
    },

    /// Show the whole catalog grouped by author
    Show,

    /// Add a book (manager)
    Add {
        /// Author name
        author: String,

        /// Book title
        title: String,
    },

    /// Remove a book (manager)
    Remove {
        /// Author name
        author: String,

        /// Book title
        title: String,
    },

    /// Check out a book (borrower)
    Checkout {
        /// Author name
        author: String,

        /// Book title
        title: String,
    },

    /// Return a book (borrower)
    Return {
        /// Author name
        author: String,

        /// Book title
        title: String,
    },

    /// Show resolved configuration
    Config,
}

/// Role for CLI (maps to Role)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Adds and removes books
    Manager,

    /// Checks books out and returns them
    Borrower,
}

impl From<RoleArg> for Role {
    fn from(r: RoleArg) -> Self {
        match r {
            RoleArg::Manager => Role::Manager,
            RoleArg::Borrower => Role::Borrower,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let Cli {
            catalog,
            role,
            command,
        } = self;
        let role = role.map(Role::from);

        match command {
            Commands::Config => show_config(config::config()?, catalog.as_deref()),
            Commands::Authors { json } => {
                let (role, catalog) = start(catalog, role)?;
                list_authors(browser(role, catalog).as_ref(), json)
            }
            Commands::Books { author_index, json } => {
                let (role, catalog) = start(catalog, role)?;
                list_books(browser(role, catalog).as_ref(), author_index, json)
            }
            Commands::Available {
                author_index,
                book_index,
            } => {
                let (role, catalog) = start(catalog, role)?;
                show_availability(browser(role, catalog).as_ref(), author_index, book_index)
            }
            Commands::Show => {
                let (_, catalog) = start(catalog, role)?;
                show_catalog(&catalog)
            }
            Commands::Add { author, title } => {
                let (role, catalog) = start(catalog, role)?;
                add_book(&manager(role, catalog, "add")?, &author, &title)
            }
            Commands::Remove { author, title } => {
                let (role, catalog) = start(catalog, role)?;
                remove_book(&manager(role, catalog, "remove")?, &author, &title)
            }
            Commands::Checkout { author, title } => {
                let (role, catalog) = start(catalog, role)?;
                check_out(&borrower(role, catalog, "checkout")?, &author, &title)
            }
            Commands::Return { author, title } => {
                let (role, catalog) = start(catalog, role)?;
                return_copy(&borrower(role, catalog, "return")?, &author, &title)
            }
        }
    }
}

/// Catalog path and fallback role; `settings` is only consulted without `--catalog`
fn resolve_target(
    catalog: Option<PathBuf>,
    settings: impl FnOnce() -> Result<ResolvedConfig>,
) -> Result<(PathBuf, Option<Role>)> {
    match catalog {
        Some(path) => Ok((path, None)),
        None => {
            let settings = settings()?;
            Ok((settings.catalog, settings.default_role))
        }
    }
}

/// Open the catalog for a command that needs it
fn start(catalog: Option<PathBuf>, role: Option<Role>) -> Result<(Option<Role>, SharedCatalog)> {
    let (path, default_role) = resolve_target(catalog, || config::config().cloned())?;

    // A catalog that can't be loaded stops the process here
    let catalog = SharedCatalog::open(&path)
        .with_context(|| format!("Cannot start with catalog {}", path.display()))?;

    Ok((role.or(default_role), catalog))
}

/// Pick a read-only view; without a role, browse as a borrower
fn browser(role: Option<Role>, catalog: SharedCatalog) -> Box<dyn Browse> {
    match role {
        Some(Role::Manager) => Box::new(Manager::new(catalog)),
        Some(Role::Borrower) | None => Box::new(Borrower::new(catalog)),
    }
}

/// Ensure the selected role may run `command`
fn require_role(selected: Option<Role>, needed: Role, command: &str) -> Result<()> {
    match selected {
        Some(role) if role == needed => Ok(()),
        Some(role) => anyhow::bail!(
            "'{}' is not available to the {} role (requires {})",
            command,
            role,
            needed
        ),
        None => anyhow::bail!(
            "'{}' requires --role {} (or SHELF_ROLE={})",
            command,
            needed,
            needed
        ),
    }
}

fn manager(role: Option<Role>, catalog: SharedCatalog, command: &str) -> Result<Manager> {
    require_role(role, Role::Manager, command)?;
    let manager = Manager::new(catalog);
    eprintln!("{}", manager.greeting());
    Ok(manager)
}

fn borrower(role: Option<Role>, catalog: SharedCatalog, command: &str) -> Result<Borrower> {
    require_role(role, Role::Borrower, command)?;
    let borrower = Borrower::new(catalog);
    eprintln!("{}", borrower.greeting());
    Ok(borrower)
}

/// List authors
fn list_authors(view: &dyn Browse, json: bool) -> Result<()> {
    let authors = view.list_authors();

    if json {
        println!("{}", serde_json::to_string_pretty(&authors)?);
    } else if authors.is_empty() {
        println!("No authors in the catalog");
    } else {
        print!("{}", render_authors(&authors));
    }

    Ok(())
}

/// List the books of one author
fn list_books(view: &dyn Browse, author_index: usize, json: bool) -> Result<()> {
    let records = view.books_of(author_index)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", render_records(&records, ""));
    }

    Ok(())
}

/// Show availability of one book
fn show_availability(view: &dyn Browse, author_index: usize, book_index: usize) -> Result<()> {
    let available = view.is_available(author_index, book_index)?;
    println!("{}", if available { "available" } else { "checked out" });
    Ok(())
}

/// Show every author and book
fn show_catalog(catalog: &SharedCatalog) -> Result<()> {
    let rendered = catalog.read(|c| render_catalog(c.groups()));

    if rendered.is_empty() {
        println!("No authors in the catalog");
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

/// Add a book
fn add_book(manager: &Manager, author: &str, title: &str) -> Result<()> {
    check_field(author).with_context(|| format!("Invalid author: {:?}", author))?;
    check_field(title).with_context(|| format!("Invalid title: {:?}", title))?;

    manager.add_book(author, title)?;
    println!("Added '{}' by {}", title, author);
    Ok(())
}

/// Remove a book
fn remove_book(manager: &Manager, author: &str, title: &str) -> Result<()> {
    if manager.remove_book(author, title)? {
        println!("Removed '{}' by {}", title, author);
    } else {
        eprintln!("No book '{}' by {} in the catalog", title, author);
        std::process::exit(1);
    }
    Ok(())
}

/// Check out a book
fn check_out(borrower: &Borrower, author: &str, title: &str) -> Result<()> {
    if borrower.check_out(author, title)? {
        println!("Checked out '{}' by {}", title, author);
    } else {
        eprintln!("{}", explain_refusal(borrower.lookup(author, title), author, title));
        std::process::exit(1);
    }
    Ok(())
}

/// Return a book
fn return_copy(borrower: &Borrower, author: &str, title: &str) -> Result<()> {
    if borrower.return_copy(author, title)? {
        println!("Returned '{}' by {}", title, author);
    } else {
        eprintln!("{}", explain_refusal(borrower.lookup(author, title), author, title));
        std::process::exit(1);
    }
    Ok(())
}

/// Show resolved configuration
fn show_config(settings: &ResolvedConfig, catalog_override: Option<&Path>) -> Result<()> {
    let catalog = catalog_override.unwrap_or(&settings.catalog);

    println!("Home: {}", settings.home.display());
    println!("Catalog: {}", catalog.display());
    match settings.default_role {
        Some(role) => println!("Default role: {}", role),
        None => println!("Default role: (none)"),
    }
    match &settings.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, using defaults)"),
    }

    Ok(())
}

/// Why a check-out or return did nothing
fn explain_refusal(lookup: Lookup, author: &str, title: &str) -> String {
    match lookup {
        Lookup::AuthorNotFound => format!("Author not found: {}", author),
        Lookup::TitleNotFound => format!("Book not found: '{}' by {}", title, author),
        Lookup::Available => format!("'{}' by {} is already on the shelf", title, author),
        Lookup::CheckedOut => format!("'{}' by {} is already checked out", title, author),
    }
}

fn render_authors(authors: &[String]) -> String {
    authors
        .iter()
        .enumerate()
        .map(|(i, author)| format!("[{}] {}\n", i, author))
        .collect()
}

fn render_records(records: &[Record], indent: &str) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| format!("{}[{}] {}\n", indent, i, record))
        .collect()
}

fn render_catalog(groups: &[AuthorGroup]) -> String {
    let mut out = String::new();

    for (i, group) in groups.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", i, group.author()));
        out.push_str(&render_records(group.records(), "    "));
    }

    out
}
