use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the project registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The database file could not be created, read or written
    #[error("Database file error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A usage update was requested for a path the registry does not know
    #[error("Project not found: {0}")]
    NotFound(String),

    /// The search expression is not a valid regular expression
    #[error("Invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl RegistryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
