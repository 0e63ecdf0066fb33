//! The catalog file on disk.
//!
//! Created empty when missing, read whole at startup, and truncated and
//! rewritten on every save. Writing in place keeps symlinks pointing at the
//! real catalog and leaves the file's permissions alone.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

/// Default catalog file name
pub const DEFAULT_FILE_NAME: &str = "BooksFile";

/// Handle to the flat file backing a catalog
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    /// Create a handle for a catalog path (nothing touched on disk yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the catalog path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, creating it empty first if it doesn't exist.
    ///
    /// Bytes that aren't valid UTF-8 (files written in a legacy charset) are
    /// replaced with U+FFFD rather than failing the load.
    pub fn load_or_create(&self) -> io::Result<String> {
        if !self.path.exists() {
            fs::create_dir_all(self.dir())?;
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&self.path)?;
            return Ok(String::new());
        }

        let bytes = fs::read(&self.path)?;

        match String::from_utf8(bytes) {
            Ok(contents) => Ok(contents),
            Err(e) => {
                warn!(path = %self.path.display(), "Catalog is not valid UTF-8, replacing bad bytes");
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }

    /// Truncate the file and write `contents` in its place
    pub fn save(&self, contents: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    /// Directory holding the file (`.` for bare file names)
    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
