/*!
 * Project ignore-pattern file support
 *
 * Compiles the ignore-pattern file found at the workspace root (gitignore
 * syntax) into a matcher over workspace-relative paths. A missing, unreadable
 * or malformed file never aborts an invocation; it yields a matcher that
 * ignores nothing.
 */

use std::fs;
use std::path::{Component, Path};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

/// Default name of the ignore-pattern file
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Compiled ignore rules for one invocation
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    rules: Option<Gitignore>,
}

impl IgnoreMatcher {
    /// A matcher that ignores nothing
    pub fn none() -> Self {
        Self { rules: None }
    }

    /// Build the matcher from `<workspace_root>/<file_name>`
    pub fn build(workspace_root: &Path, file_name: &str) -> Self {
        let path = workspace_root.join(file_name);
        if !path.is_file() {
            debug!("No ignore file at {}", path.display());
            return Self::none();
        }

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Loading ignore rules from {}", path.display());
                Self::from_patterns(workspace_root, &content)
            }
            Err(e) => {
                warn!("Failed to read ignore file {}: {}", path.display(), e);
                Self::none()
            }
        }
    }

    /// Compile ignore rules from the text of an ignore-pattern file
    pub fn from_patterns(workspace_root: &Path, content: &str) -> Self {
        let mut builder = GitignoreBuilder::new(workspace_root);
        for line in content.lines() {
            if let Err(e) = builder.add_line(None, line) {
                warn!("Skipping invalid ignore pattern '{}': {}", line, e);
            }
        }

        match builder.build() {
            Ok(rules) if rules.is_empty() => Self::none(),
            Ok(rules) => {
                debug!("Compiled {} ignore rules", rules.num_ignores());
                Self { rules: Some(rules) }
            }
            Err(e) => {
                warn!("Failed to compile ignore rules: {}", e);
                Self::none()
            }
        }
    }

    /// Whether any rules are active
    pub fn is_active(&self) -> bool {
        self.rules.is_some()
    }

    /// Whether a workspace-relative path, or any of its parents, is ignored
    ///
    /// Paths that are absolute or escape the workspace root are never ignored.
    pub fn ignores(&self, relative_path: &str, is_dir: bool) -> bool {
        let Some(rules) = &self.rules else {
            return false;
        };

        let path = Path::new(relative_path);
        if relative_path.is_empty()
            || path
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
        {
            return false;
        }

        rules.matched_path_or_any_parents(path, is_dir).is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn matcher(content: &str) -> IgnoreMatcher {
        IgnoreMatcher::from_patterns(Path::new("/workspace"), content)
    }

    #[test]
    fn test_missing_file_ignores_nothing() {
        let dir = tempdir().unwrap();
        let matcher = IgnoreMatcher::build(dir.path(), DEFAULT_IGNORE_FILE);
        assert!(!matcher.is_active());
        assert!(!matcher.ignores("anything.txt", false));
    }

    #[test]
    fn test_build_reads_file_at_root() {
        let dir = tempdir().unwrap();
        let mut file = File::create(dir.path().join(".gitignore")).unwrap();
        writeln!(file, "# generated\n\n*.log\nsecrets/").unwrap();

        let matcher = IgnoreMatcher::build(dir.path(), ".gitignore");
        assert!(matcher.is_active());
        assert!(matcher.ignores("debug.log", false));
        assert!(matcher.ignores("nested/deeper/trace.log", false));
        assert!(matcher.ignores("secrets", true));
        assert!(!matcher.ignores("src/main.rs", false));
    }

    #[test]
    fn test_custom_file_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".aiignore"), "fixtures/\n").unwrap();

        let matcher = IgnoreMatcher::build(dir.path(), ".aiignore");
        assert!(matcher.ignores("fixtures", true));
        assert!(!IgnoreMatcher::build(dir.path(), ".gitignore").is_active());
    }

    #[test]
    fn test_unreadable_file_degrades() {
        let dir = tempdir().unwrap();
        // A directory with the ignore file's name cannot be read as a file
        fs::create_dir(dir.path().join(".gitignore")).unwrap();
        let matcher = IgnoreMatcher::build(dir.path(), ".gitignore");
        assert!(!matcher.is_active());
    }

    #[test]
    fn test_double_star_and_negation() {
        let matcher = matcher("docs/**/*.md\n*.txt\n!keep.txt\n");
        assert!(matcher.ignores("docs/a/b/readme.md", false));
        assert!(!matcher.ignores("readme.md", false));
        assert!(matcher.ignores("notes.txt", false));
        assert!(!matcher.ignores("keep.txt", false));
    }

    #[test]
    fn test_directory_only_pattern() {
        let matcher = matcher("out/\n");
        assert!(matcher.ignores("out", true));
        assert!(!matcher.ignores("out", false));
        assert!(matcher.ignores("out/report.txt", false));
    }

    #[test]
    fn test_anchored_pattern() {
        let matcher = matcher("/generated\n");
        assert!(matcher.ignores("generated", true));
        assert!(!matcher.ignores("src/generated", true));
    }

    #[test]
    fn test_paths_outside_root_are_not_ignored() {
        let matcher = matcher("*\n");
        assert!(!matcher.ignores("../elsewhere.rs", false));
        assert!(!matcher.ignores("/abs/path.rs", false));
        assert!(!matcher.ignores("", true));
        assert!(matcher.ignores("inside.rs", false));
    }

    #[test]
    fn test_comments_and_blank_lines_only() {
        let matcher = matcher("# nothing here\n\n   \n");
        assert!(!matcher.is_active());
    }
}
