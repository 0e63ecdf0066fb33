//! Configuration for shelf paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SHELF_CATALOG, SHELF_HOME)
//! 2. Config file (.shelf/config.yaml)
//! 3. Defaults (~/.shelf/BooksFile)
//!
//! Config file discovery:
//! - Searches current directory and parents for .shelf/config.yaml
//! - `paths.catalog` is relative to the project root (parent of .shelf/)
//! - `paths.home` is relative to the .shelf/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::roles::Role;
use crate::store::DEFAULT_FILE_NAME;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    /// Role used when none is given on the command line
    #[serde(default)]
    pub default_role: Option<Role>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the catalog file (relative to .shelf/)
    pub home: Option<String>,
    /// Catalog file (relative to the project root)
    pub catalog: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding shelf state
    pub home: PathBuf,
    /// Path to the catalog file
    pub catalog: PathBuf,
    /// Role used when none is given on the command line
    pub default_role: Option<Role>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Environment overrides, captured once so resolution stays pure
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    home: Option<PathBuf>,
    catalog: Option<PathBuf>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            home: std::env::var_os("SHELF_HOME").map(PathBuf::from),
            catalog: std::env::var_os("SHELF_CATALOG").map(PathBuf::from),
        }
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".shelf").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Merge environment, config file and defaults
fn resolve(
    default_home: PathBuf,
    env: EnvOverrides,
    file: Option<(PathBuf, ConfigFile)>,
) -> ResolvedConfig {
    let Some((config_path, config)) = file else {
        let home = env.home.unwrap_or(default_home);
        let catalog = env.catalog.unwrap_or_else(|| home.join(DEFAULT_FILE_NAME));

        return ResolvedConfig {
            home,
            catalog,
            default_role: None,
            config_file: None,
        };
    };

    // .shelf/ and the project root that contains it
    let shelf_dir = config_path.parent().unwrap_or(Path::new("."));
    let base_dir = shelf_dir.parent().unwrap_or(Path::new("."));

    let home = if let Some(env_home) = env.home {
        env_home
    } else if let Some(ref home_path) = config.paths.home {
        resolve_path(shelf_dir, home_path)
    } else {
        default_home
    };

    let catalog = if let Some(env_catalog) = env.catalog {
        env_catalog
    } else if let Some(ref catalog_path) = config.paths.catalog {
        resolve_path(base_dir, catalog_path)
    } else {
        home.join(DEFAULT_FILE_NAME)
    };

    ResolvedConfig {
        home,
        catalog,
        default_role: config.default_role,
        config_file: Some(config_path),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".shelf");

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let file = match find_config_file(&cwd) {
        Some(path) => {
            let config = load_config_file(&path)?;
            Some((path, config))
        }
        None => None,
    };

    Ok(resolve(default_home, EnvOverrides::from_env(), file))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let shelf_dir = root.join(".shelf");
        std::fs::create_dir_all(&shelf_dir).unwrap();

        let config_path = shelf_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = resolve(PathBuf::from("/home/u/.shelf"), EnvOverrides::default(), None);

        assert_eq!(config.home, PathBuf::from("/home/u/.shelf"));
        assert_eq!(config.catalog, PathBuf::from("/home/u/.shelf/BooksFile"));
        assert!(config.default_role.is_none());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_env_home_moves_catalog() {
        let env = EnvOverrides {
            home: Some(PathBuf::from("/srv/shelf")),
            catalog: None,
        };
        let config = resolve(PathBuf::from("/home/u/.shelf"), env, None);

        assert_eq!(config.catalog, PathBuf::from("/srv/shelf/BooksFile"));
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
paths:
  home: ./
  catalog: data/books.txt
default_role: manager
"#,
        );

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(config.paths.catalog, Some("data/books.txt".to_string()));
        assert_eq!(config.default_role, Some(Role::Manager));
    }

    #[test]
    fn test_config_file_paths_are_relative() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            "version: \"1.0\"\npaths:\n  catalog: data/books.txt\n",
        );
        let config = load_config_file(&config_path).unwrap();

        let resolved = resolve(
            PathBuf::from("/home/u/.shelf"),
            EnvOverrides::default(),
            Some((config_path.clone(), config)),
        );

        assert_eq!(resolved.catalog, temp.path().join("data/books.txt"));
        assert_eq!(resolved.config_file, Some(config_path));
    }

    #[test]
    fn test_env_catalog_beats_config_file() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            "version: \"1.0\"\npaths:\n  catalog: data/books.txt\n",
        );
        let config = load_config_file(&config_path).unwrap();
        let env = EnvOverrides {
            home: None,
            catalog: Some(PathBuf::from("/tmp/other")),
        };

        let resolved = resolve(PathBuf::from("/home/u/.shelf"), env, Some((config_path, config)));
        assert_eq!(resolved.catalog, PathBuf::from("/tmp/other"));
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path(), "version: \"1.0\"");
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config_file(&nested), Some(config_path));
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/./subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
