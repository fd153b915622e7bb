use super::discovery::GIT_DIR;
use crate::registry::Registry;
use std::path::Path;
use tracing::debug;

/// Whether `path` still exists and still contains a `.git` entry
pub fn is_live_project(path: &Path) -> bool {
    path.is_dir() && path.join(GIT_DIR).exists()
}

/// Remove every registered project that is no longer a live git project
///
/// Returns the removed paths in ascending order.
pub fn clean_stale(registry: &mut Registry) -> Vec<String> {
    let mut paths = registry.all_paths();
    paths.sort();

    let mut removed = Vec::new();
    for path in paths {
        if is_live_project(Path::new(&path)) {
            continue;
        }
        registry.remove(&path);
        debug!(path = %path, "Removed stale project");
        removed.push(path);
    }
    removed
}
