/*!
 * Per-entry filtering shared by dump and tree traversal
 */

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::exclusion::ExclusionPolicy;
use crate::ignore_rules::IgnoreMatcher;
use crate::workspace::{relative_path, ExplicitSelection};

/// Why an entry was left out of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Directory name is in the exclusion table and it was not selected
    ExcludedDir,
    /// Matched by the ignore-pattern file
    Ignored,
}

/// Everything needed to decide whether a directory entry is visited
#[derive(Debug, Clone)]
pub struct EntryFilter {
    workspace_root: PathBuf,
    policy: ExclusionPolicy,
    matcher: IgnoreMatcher,
    selection: ExplicitSelection,
}

impl EntryFilter {
    /// Create a filter for one invocation
    pub fn new(
        workspace_root: PathBuf,
        policy: ExclusionPolicy,
        matcher: IgnoreMatcher,
        selection: ExplicitSelection,
    ) -> Self {
        Self {
            workspace_root,
            policy,
            matcher,
            selection,
        }
    }

    /// Base directory for relative paths
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// The exclusion tables in effect
    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }

    /// Workspace-relative form of `path`
    pub fn relative_path(&self, path: &Path) -> String {
        relative_path(&self.workspace_root, path)
    }

    /// Whether the ignore-pattern file excludes this path
    pub fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        self.matcher.ignores(relative_path, is_dir)
    }

    /// Decide whether a child entry is skipped.
    ///
    /// Name-based directory exclusion yields to an explicit selection of that
    /// exact path; ignore-file exclusion never does.
    pub fn skip_reason(&self, name: &str, relative_path: &str, is_dir: bool) -> Option<SkipReason> {
        if is_dir && self.policy.is_excluded_dir(name) && !self.selection.contains(relative_path) {
            return Some(SkipReason::ExcludedDir);
        }
        if self.matcher.ignores(relative_path, is_dir) {
            return Some(SkipReason::Ignored);
        }
        None
    }
}

/// List the immediate children of `dir`.
///
/// With `sorted`, directories come first and each group is ordered by name;
/// otherwise the filesystem order is kept. Any listing error fails the whole
/// directory.
pub fn list_children(dir: &Path, sorted: bool) -> Result<Vec<DirEntry>, walkdir::Error> {
    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    if sorted {
        walker = walker.sort_by(|a, b| {
            b.file_type()
                .is_dir()
                .cmp(&a.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });
    }
    walker.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn filter(root: &Path, ignore: &str, selected: &[&str]) -> EntryFilter {
        let roots: Vec<PathBuf> = selected.iter().map(|s| root.join(s)).collect();
        EntryFilter::new(
            root.to_path_buf(),
            ExclusionPolicy::default(),
            IgnoreMatcher::from_patterns(root, ignore),
            ExplicitSelection::new(root, &roots),
        )
    }

    #[test]
    fn test_excluded_dir_unless_selected() {
        let root = Path::new("/work");
        let plain = filter(root, "", &["src"]);
        assert_eq!(
            plain.skip_reason("node_modules", "node_modules", true),
            Some(SkipReason::ExcludedDir)
        );
        // Only directories are subject to the directory table
        assert_eq!(plain.skip_reason("build", "build", false), None);

        let selected = filter(root, "", &["node_modules"]);
        assert_eq!(selected.skip_reason("node_modules", "node_modules", true), None);
        // The override does not extend to other directories with the same name
        assert_eq!(
            selected.skip_reason("node_modules", "pkg/node_modules", true),
            Some(SkipReason::ExcludedDir)
        );
    }

    #[test]
    fn test_ignore_file_beats_selection() {
        let root = Path::new("/work");
        let filter = filter(root, "generated/\n*.tmp\n", &["generated", "a.tmp"]);
        assert_eq!(
            filter.skip_reason("generated", "generated", true),
            Some(SkipReason::Ignored)
        );
        assert_eq!(filter.skip_reason("a.tmp", "a.tmp", false), Some(SkipReason::Ignored));
        assert!(filter.is_ignored("generated/inner.rs", false));
    }

    #[test]
    fn test_sorted_listing_puts_directories_first() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("z.txt"), "").unwrap();
        fs::write(dir.path().join("y.txt"), "").unwrap();

        let names: Vec<String> = list_children(dir.path(), true)
            .unwrap()
            .iter()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "y.txt", "z.txt"]);

        assert_eq!(list_children(dir.path(), false).unwrap().len(), 4);
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempdir().unwrap();
        assert!(list_children(&dir.path().join("nope"), false).is_err());
    }
}
