/*!
 * Workspace root resolution and workspace-relative paths
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Marker entry that identifies a project root during discovery
const PROJECT_MARKER: &str = ".git";

/// Pick the base directory for relative paths and ignore-file lookup.
///
/// The innermost known root containing `first_entry` wins; without one the
/// entry's parent directory is used.
pub fn resolve_workspace_root(first_entry: &Path, known_roots: &[PathBuf]) -> PathBuf {
    let innermost = known_roots
        .iter()
        .filter(|root| first_entry.starts_with(root))
        .max_by_key(|root| root.components().count());

    match innermost {
        Some(root) => {
            debug!("Using known project root {}", root.display());
            root.clone()
        }
        None => {
            let parent = first_entry
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(first_entry);
            debug!(
                "No known project root contains {}, using {}",
                first_entry.display(),
                parent.display()
            );
            parent.to_path_buf()
        }
    }
}

/// Find the nearest ancestor-or-self directory of `start` holding a `.git` entry
pub fn discover_project_root(start: &Path) -> Option<PathBuf> {
    let start = if start.is_dir() { start } else { start.parent()? };
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).exists())
        .map(Path::to_path_buf)
}

/// Path of `path` relative to `root`, `/`-separated.
///
/// Paths outside the root are returned unchanged.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = match path.strip_prefix(root) {
        Ok(rel) => rel,
        Err(_) => return path.to_string_lossy().replace('\\', "/"),
    };

    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Workspace-relative paths of the entries the caller selected directly
#[derive(Debug, Clone, Default)]
pub struct ExplicitSelection {
    paths: HashSet<String>,
}

impl ExplicitSelection {
    /// Build the set from the root selection
    pub fn new(workspace_root: &Path, roots: &[PathBuf]) -> Self {
        Self {
            paths: roots
                .iter()
                .map(|root| relative_path(workspace_root, root))
                .collect(),
        }
    }

    /// Whether this exact workspace-relative path was selected
    pub fn contains(&self, relative_path: &str) -> bool {
        self.paths.contains(relative_path)
    }

}
