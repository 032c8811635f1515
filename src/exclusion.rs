/*!
 * Exclusion policy: which directories are never walked, which files never
 * contribute content, and which files are redacted as binary or oversized.
 */

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;

/// Maximum number of bytes a file may have for its content to be included
pub const MAX_FILE_SIZE: u64 = 64 * 1024;

/// Directory names that are skipped unless explicitly selected
pub static DEFAULT_EXCLUDED_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version control and editors
        ".git",
        ".github",
        ".vscode",
        ".idea",
        ".vs",
        ".svn",
        ".hg",
        // Dependencies
        "node_modules",
        // Framework caches
        ".next",
        ".nuxt",
        ".cache",
        // Build output
        "dist",
        "build",
        // OS files
        ".DS_Store",
        "__pycache__",
        ".Trash",
        // Package manager caches
        ".npm",
        ".gradle",
        ".m2",
    ]
});

/// File names whose content is never included
pub static DEFAULT_EXCLUDED_FILES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Lockfiles
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "npm-shrinkwrap.json",
        "composer.lock",
        "Gemfile.lock",
        "poetry.lock",
        "Cargo.lock",
        "go.sum",
        ".terraform.lock.hcl",
        "flake.lock",
        "pubspec.lock",
        "mix.lock",
        "Podfile.lock",
        ".gradle.lockfile",
        // Logs
        "yarn-error.log",
        "npm-debug.log",
        // Environment files (often contain secrets)
        ".env",
        ".env.local",
        ".env.development",
        ".env.test",
        ".env.production",
        ".venv",
        // Coverage
        ".coverage",
        "coverage.xml",
        "coverage.json",
        "lcov.info",
    ]
});

/// Extensions treated as binary, compared against the lowercased path suffix
pub static DEFAULT_BINARY_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".exe", ".dll", ".so", ".dylib", ".bin", ".jar", ".war", ".zip", ".tar", ".gz", ".rar",
        ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".ico", ".tif", ".tiff", ".pdf",
    ]
});

/// Static exclusion tables plus the size threshold
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    excluded_dirs: HashSet<String>,
    excluded_files: HashSet<String>,
    binary_extensions: Vec<String>,
    max_file_size: u64,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            excluded_files: DEFAULT_EXCLUDED_FILES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            binary_extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl ExclusionPolicy {
    /// A policy with empty tables and the default size threshold
    pub fn empty() -> Self {
        Self {
            excluded_dirs: HashSet::new(),
            excluded_files: HashSet::new(),
            binary_extensions: Vec::new(),
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Add directory names to skip
    pub fn with_excluded_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add file names whose content is never included
    pub fn with_excluded_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_files.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add binary extensions; a missing leading dot is added
    pub fn with_binary_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for ext in extensions {
            let ext = ext.into().to_lowercase();
            let ext = if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            };
            if !self.binary_extensions.contains(&ext) {
                self.binary_extensions.push(ext);
            }
        }
        self
    }

    /// Replace the content-inclusion threshold
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// The content-inclusion threshold in bytes
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Whether a directory with this name is skipped during traversal
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    /// Whether a file with this name contributes nothing to the dump
    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.excluded_files.contains(name)
    }

    /// Whether the path ends with one of the binary extensions, ignoring case
    pub fn is_binary(&self, path: &Path) -> bool {
        let lowered = path.to_string_lossy().to_lowercase();
        self.binary_extensions
            .iter()
            .any(|ext| lowered.ends_with(ext.as_str()))
    }

    /// Whether a file of this size is too large to include
    pub fn exceeds_max_size(&self, size: u64) -> bool {
        size > self.max_file_size
    }
}
