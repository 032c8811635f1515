/*!
 * ASCII tree rendering for tree mode
 */

use std::cell::Cell;
use std::path::Path;

use tracing::{trace, warn};

use crate::cancel::CancelToken;
use crate::filter::{list_children, EntryFilter};
use crate::progress::ProgressReporter;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Renders directory subtrees with box-drawing connectors
pub struct TreeRenderer<'a> {
    filter: &'a EntryFilter,
    cancel: &'a CancelToken,
    progress: &'a dyn ProgressReporter,
    files: Cell<usize>,
    directories: Cell<usize>,
    unreadable_dirs: Cell<usize>,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer for one invocation
    pub fn new(
        filter: &'a EntryFilter,
        cancel: &'a CancelToken,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            filter,
            cancel,
            progress,
            files: Cell::new(0),
            directories: Cell::new(0),
            unreadable_dirs: Cell::new(0),
        }
    }

    /// Number of file lines rendered so far
    pub fn files(&self) -> usize {
        self.files.get()
    }

    /// Number of directory lines rendered so far
    pub fn directories(&self) -> usize {
        self.directories.get()
    }

    /// Number of directories whose listing failed
    pub fn unreadable_dirs(&self) -> usize {
        self.unreadable_dirs.get()
    }

    /// Render a selected directory with its `Directory tree for:` heading
    pub fn render_root(&self, dir: &Path) -> String {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| dir.display().to_string());

        format!(
            "Directory tree for:\n{}\n{}\n\n",
            name,
            self.render(dir, &[])
        )
    }

    /// Render the children of `dir`, each line prefixed by `prefixes`.
    ///
    /// A listing failure becomes a single `ERROR:` line at this depth.
    pub fn render(&self, dir: &Path, prefixes: &[&'static str]) -> String {
        let prefix = prefixes.concat();

        let entries = match list_children(dir, true) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Error building file tree for {}: {}", dir.display(), e);
                self.unreadable_dirs.set(self.unreadable_dirs.get() + 1);
                return format!("{}ERROR: {}\n", prefix, e);
            }
        };

        let visible: Vec<_> = entries
            .into_iter()
            .filter(|entry| {
                let name = entry.file_name().to_string_lossy();
                let rel = self.filter.relative_path(entry.path());
                match self
                    .filter
                    .skip_reason(&name, &rel, entry.file_type().is_dir())
                {
                    Some(reason) => {
                        trace!("Tree skips {} ({:?})", rel, reason);
                        false
                    }
                    None => true,
                }
            })
            .collect();

        let mut result = String::new();
        for (i, entry) in visible.iter().enumerate() {
            if self.cancel.is_cancelled() {
                break;
            }

            let is_last = i == visible.len() - 1;
            result.push_str(&prefix);
            result.push_str(if is_last { LAST_BRANCH } else { BRANCH });
            result.push_str(&entry.file_name().to_string_lossy());
            result.push('\n');

            if entry.file_type().is_dir() {
                self.directories.set(self.directories.get() + 1);
                let mut next = prefixes.to_vec();
                next.push(if is_last { SPACE_INDENT } else { PIPE_INDENT });
                result.push_str(&self.render(entry.path(), &next));
            } else {
                self.files.set(self.files.get() + 1);
                self.progress.report(self.files.get());
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::ExclusionPolicy;
    use crate::ignore_rules::IgnoreMatcher;
    use crate::progress::NoProgress;
    use crate::workspace::ExplicitSelection;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn filter_for(root: &Path, ignore: &str, selected: &[PathBuf]) -> EntryFilter {
        EntryFilter::new(
            root.to_path_buf(),
            ExclusionPolicy::default(),
            IgnoreMatcher::from_patterns(root, ignore),
            ExplicitSelection::new(root, selected),
        )
    }

    #[test]
    fn test_directories_first_then_files() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        fs::create_dir_all(root.join("b")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("z.txt"), "").unwrap();
        fs::write(root.join("y.txt"), "").unwrap();

        let filter = filter_for(dir.path(), "", &[root.clone()]);
        let cancel = CancelToken::new();
        let renderer = TreeRenderer::new(&filter, &cancel, &NoProgress);

        assert_eq!(
            renderer.render(&root, &[]),
            "├── a\n├── b\n├── y.txt\n└── z.txt\n"
        );
        assert_eq!(renderer.files(), 2);
        assert_eq!(renderer.directories(), 2);
    }

    #[test]
    fn test_nested_prefixes() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        fs::create_dir_all(root.join("src/bin")).unwrap();
        fs::write(root.join("src/bin/tool.rs"), "").unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::create_dir_all(root.join("tests")).unwrap();
        fs::write(root.join("tests/it.rs"), "").unwrap();
        fs::write(root.join("README.md"), "").unwrap();

        let filter = filter_for(dir.path(), "", &[root.clone()]);
        let cancel = CancelToken::new();
        let renderer = TreeRenderer::new(&filter, &cancel, &NoProgress);

        let expected = "\
├── src
│   ├── bin
│   │   └── tool.rs
│   └── lib.rs
├── tests
│   └── it.rs
└── README.md
";
        assert_eq!(renderer.render(&root, &[]), expected);
    }

    #[test]
    fn test_last_connector_follows_filtering() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("main.rs"), "").unwrap();
        fs::write(root.join("notes.log"), "").unwrap();

        let filter = filter_for(dir.path(), "*.log\n", &[root.clone()]);
        let cancel = CancelToken::new();
        let renderer = TreeRenderer::new(&filter, &cancel, &NoProgress);

        assert_eq!(renderer.render(&root, &[]), "└── main.rs\n");
    }

    #[test]
    fn test_selected_excluded_dir_is_shown() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        fs::create_dir_all(root.join(".github/workflows")).unwrap();
        fs::write(root.join(".github/workflows/ci.yml"), "").unwrap();
        fs::create_dir_all(root.join(".github/workflows/.git")).unwrap();

        let selected = vec![root.clone(), root.join(".github")];
        let filter = filter_for(dir.path(), "", &selected);
        let cancel = CancelToken::new();
        let renderer = TreeRenderer::new(&filter, &cancel, &NoProgress);

        assert_eq!(
            renderer.render(&root, &[]),
            "└── .github\n    └── workflows\n        └── ci.yml\n"
        );
    }

    #[test]
    fn test_render_root_heading() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.txt"), "").unwrap();

        let filter = filter_for(dir.path(), "", &[root.clone()]);
        let cancel = CancelToken::new();
        let renderer = TreeRenderer::new(&filter, &cancel, &NoProgress);

        assert_eq!(
            renderer.render_root(&root),
            "Directory tree for:\nproj\n└── a.txt\n\n\n"
        );
    }

    #[test]
    fn test_listing_error_becomes_line() {
        let dir = tempdir().unwrap();
        let filter = filter_for(dir.path(), "", &[]);
        let cancel = CancelToken::new();
        let renderer = TreeRenderer::new(&filter, &cancel, &NoProgress);

        let text = renderer.render(&dir.path().join("missing"), &["│   "]);
        assert!(text.starts_with("│   ERROR: "));
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        assert_eq!(renderer.unreadable_dirs(), 1);
    }

    #[test]
    fn test_cancelled_renderer_stops() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("proj");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.txt"), "").unwrap();

        let filter = filter_for(dir.path(), "", &[root.clone()]);
        let cancel = CancelToken::new();
        cancel.cancel();
        let renderer = TreeRenderer::new(&filter, &cancel, &NoProgress);

        assert_eq!(renderer.render(&root, &[]), "");
        assert_eq!(renderer.files(), 0);
    }
}
