use crate::registry::Registry;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Name of the directory that marks a project root
pub const GIT_DIR: &str = ".git";

/// Outcome of a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Number of `.git` directories found
    pub discovered: usize,
    /// Number of projects that were not yet in the registry
    pub added: usize,
}

/// Walk `root` and register the parent of every `.git` directory
///
/// The walk does not descend into `.git` directories themselves, but keeps
/// going inside each project so nested repositories are found too.
pub fn discover_projects(root: &Path, registry: &mut Registry) -> Result<ScanReport> {
    if !root.exists() {
        anyhow::bail!("$GITCD_PROJECT_HOME ({}) does not exist", root.display());
    }

    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to access directory: {}", root.display()))?;

    if !root.is_dir() {
        anyhow::bail!("Path '{}' exists but is not a directory", root.display());
    }

    let mut report = ScanReport::default();
    let mut walker = WalkDir::new(&root).into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Failed to read directory entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_dir() || entry.file_name() != GIT_DIR {
            continue;
        }
        walker.skip_current_dir();

        let Some(project_dir) = entry.path().parent() else {
            continue;
        };
        let Some(project_path) = project_dir.to_str() else {
            warn!(
                "Skipping project with a non UTF-8 path: {}",
                project_dir.display()
            );
            continue;
        };

        report.discovered += 1;
        if registry.insert(project_path) {
            debug!(path = project_path, "Added project");
            report.added += 1;
        }
    }

    Ok(report)
}

/// [`discover_projects`] with a spinner on stderr
///
/// The spinner is hidden when stderr is not a terminal.
pub fn discover_projects_with_progress(
    root: &Path,
    registry: &mut Registry,
) -> Result<ScanReport> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.yellow} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!(
        "Scanning {} for git projects, this might take a while...",
        root.display()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = discover_projects(root, registry);

    match &result {
        Ok(report) => spinner.finish_with_message(format!(
            "Done! Found {} projects ({} new)",
            report.discovered, report.added
        )),
        Err(_) => spinner.finish_and_clear(),
    }

    result
}
