//! # Scan Module
//!
//! Keeps the registry in step with the filesystem.
//!
//! - [`discover_projects`] walks the project root and registers every
//!   directory that contains a `.git` directory.
//! - [`clean_stale`] drops registered projects that were deleted or are no
//!   longer git repositories.

pub mod cleanup;
pub mod discovery;

pub use cleanup::{clean_stale, is_live_project};
pub use discovery::{discover_projects, discover_projects_with_progress, ScanReport, GIT_DIR};
