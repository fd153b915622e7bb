//! # Registry Store
//!
//! The in-memory set of known projects for one invocation, keyed by path,
//! plus the "modified since load" flag that decides whether [`Registry::flush`]
//! touches the disk at all.

use super::codec::{self, Line};
use super::error::RegistryError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A known project and how often it has been jumped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Absolute path of the project directory
    pub path: String,
    /// Number of times this project has been selected
    pub usage_count: u64,
}

impl Project {
    fn new(path: String) -> Self {
        Self {
            path,
            usage_count: 0,
        }
    }
}

/// Values the registry needs from the resolved configuration
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Location of the database file
    pub database_path: PathBuf,
    /// Match search expressions case-sensitively
    pub case_sensitive: bool,
}

/// The project registry
#[derive(Debug)]
pub struct Registry {
    projects: HashMap<String, Project>,
    modified: bool,
    options: RegistryOptions,
}

impl Registry {
    /// Create an empty, unmodified registry without touching the disk
    pub fn new(options: RegistryOptions) -> Self {
        Self {
            projects: HashMap::new(),
            modified: false,
            options,
        }
    }

    /// Open the database file, creating it empty if it does not exist, and
    /// load every well-formed record from it
    pub fn open(options: RegistryOptions) -> Result<Self, RegistryError> {
        let path = options.database_path.clone();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                File::create(&path).map_err(|e| RegistryError::io(&path, e))?
            }
            Err(e) => return Err(RegistryError::io(&path, e)),
        };

        let mut registry = Self::new(options);
        let loaded = registry.load(BufReader::new(file))?;
        debug!(path = %path.display(), loaded, "Opened project database");
        Ok(registry)
    }

    /// Populate the registry from persisted records
    ///
    /// Malformed lines are skipped with a warning. Loading never marks the
    /// registry as modified. Returns the number of records loaded.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<usize, RegistryError> {
        let lines = codec::read_lines(reader)
            .map_err(|e| RegistryError::io(&self.options.database_path, e))?;

        let mut loaded = 0;
        for line in lines {
            match line {
                Line::Blank => {}
                Line::Record(project) => {
                    self.projects.insert(project.path.clone(), project);
                    loaded += 1;
                }
                Line::Malformed {
                    number,
                    content,
                    reason,
                } => {
                    warn!(line = number, entry = %content, "Skipping database entry: {}", reason);
                }
            }
        }
        Ok(loaded)
    }

    /// Write every record to `writer`, one line each
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), RegistryError> {
        codec::write_records(writer, self.projects.values())
            .map_err(|e| RegistryError::io(&self.options.database_path, e))
    }

    /// Rewrite the database file if anything changed since load
    ///
    /// Returns `false` without opening the file when the registry is
    /// unmodified.
    pub fn flush(&self) -> Result<bool, RegistryError> {
        if !self.modified {
            return Ok(false);
        }

        let path = &self.options.database_path;
        let file = File::create(path).map_err(|e| RegistryError::io(path, e))?;
        self.write_to(BufWriter::new(file))?;
        debug!(path = %path.display(), projects = self.projects.len(), "Wrote project database");
        Ok(true)
    }

    /// Add a project with a zero usage count
    ///
    /// Returns `false` and leaves the existing record untouched if the path is
    /// already known.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.projects.contains_key(&path) {
            return false;
        }
        self.projects.insert(path.clone(), Project::new(path));
        self.modified = true;
        true
    }

    /// Count one use of `path`, returning the new usage count
    pub fn record_use(&mut self, path: &str) -> Result<u64, RegistryError> {
        let project = self
            .projects
            .get_mut(path)
            .ok_or_else(|| RegistryError::NotFound(path.to_string()))?;
        project.usage_count = project.usage_count.saturating_add(1);
        self.modified = true;
        Ok(project.usage_count)
    }

    /// Forget `path`
    ///
    /// Marks the registry modified even when the path was unknown.
    pub fn remove(&mut self, path: &str) -> Option<Project> {
        self.modified = true;
        self.projects.remove(path)
    }

    /// Drop every record
    pub fn reset_all(&mut self) {
        self.projects.clear();
        self.modified = true;
    }

    pub fn get(&self, path: &str) -> Option<&Project> {
        self.projects.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.projects.contains_key(path)
    }

    /// Every known path, in no particular order
    pub fn all_paths(&self) -> Vec<String> {
        self.projects.keys().cloned().collect()
    }

    pub(crate) fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Whether anything changed since the registry was loaded
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn case_sensitive(&self) -> bool {
        self.options.case_sensitive
    }

    pub fn database_path(&self) -> &Path {
        &self.options.database_path
    }
}
