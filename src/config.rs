//! # Configuration
//!
//! Resolves where gitcd keeps its files and how it searches.
//!
//! ## File Locations
//!
//! ```text
//! ~/.config/gitcd/
//! ├── gitcd.db        # project database
//! ├── change_dir.sh   # script sourced by the shell wrapper
//! └── config.json     # optional settings
//! ```
//!
//! ## Precedence
//!
//! Environment variables win over `config.json`, which wins over the
//! built-in defaults:
//!
//! | Setting | Environment | Default |
//! |---------|-------------|---------|
//! | project root | `GITCD_PROJECT_HOME` | home directory |
//! | case sensitivity | `GITCD_CASE_SENSITIVE` | `false` |

use crate::registry::RegistryOptions;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the directory scanned for projects
pub const PROJECT_HOME_ENV: &str = "GITCD_PROJECT_HOME";

/// Environment variable enabling case-sensitive matching
pub const CASE_SENSITIVE_ENV: &str = "GITCD_CASE_SENSITIVE";

const DATABASE_FILE: &str = "gitcd.db";
const DIR_CHANGER_FILE: &str = "change_dir.sh";
const SETTINGS_FILE: &str = "config.json";

/// Optional settings persisted in `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory scanned for git projects.
    #[serde(default)]
    pub project_root: Option<PathBuf>,
    /// Match search terms case-sensitively.
    #[serde(default)]
    pub case_sensitive: Option<bool>,
}

impl Settings {
    /// Load settings from a specific path. Returns `Settings::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(settings)
    }
}

/// Fully resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding every gitcd file
    pub home_path: PathBuf,
    /// Project database
    pub database_path: PathBuf,
    /// Script the shell wrapper sources to change directory
    pub dir_changer_path: PathBuf,
    /// Directory scanned for git projects
    pub project_root: PathBuf,
    /// Match search terms case-sensitively
    pub case_sensitive: bool,
}

impl Config {
    /// Resolve the configuration from the user's home directory and the
    /// process environment.
    pub fn from_env() -> Result<Self> {
        let dirs = directories::BaseDirs::new().context("Could not determine home directory")?;
        Self::with_home(dirs.home_dir(), |key| std::env::var(key).ok())
    }

    /// Resolve the configuration for `home`, reading environment variables
    /// through `lookup`.
    pub fn with_home<F>(home: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home_path = home.join(".config").join("gitcd");
        let settings = Settings::load_from(&home_path.join(SETTINGS_FILE))?;

        let project_root = lookup(PROJECT_HOME_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or(settings.project_root)
            .unwrap_or_else(|| home.to_path_buf());

        let case_sensitive = lookup(CASE_SENSITIVE_ENV)
            .map(|value| parse_flag(&value))
            .or(settings.case_sensitive)
            .unwrap_or(false);

        Ok(Self {
            database_path: home_path.join(DATABASE_FILE),
            dir_changer_path: home_path.join(DIR_CHANGER_FILE),
            home_path,
            project_root,
            case_sensitive,
        })
    }

    /// Create the gitcd home directory if it does not exist yet.
    pub fn init(&self) -> Result<()> {
        if !self.home_path.is_dir() {
            fs::create_dir_all(&self.home_path).with_context(|| {
                format!(
                    "unable to create gitcd configuration directory {}",
                    self.home_path.display()
                )
            })?;
        }
        Ok(())
    }

    /// The values the registry is constructed with.
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            database_path: self.database_path.clone(),
            case_sensitive: self.case_sensitive,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}
