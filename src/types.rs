/*!
 * Core types shared by the traversal engine and the renderers
 */

use std::fmt;

/// Which payload an invocation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Concatenated file contents, each behind a path header
    #[default]
    Dump,
    /// ASCII-art directory tree of the selected directories
    Tree,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dump => write!(f, "content dump"),
            Self::Tree => write!(f, "file tree"),
        }
    }
}

/// What happened to a single file handed to the content writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Full content was written; holds the number of content bytes
    Included(u64),
    /// Larger than the size threshold; holds the file size
    SkippedSize(u64),
    /// Binary extension, content redacted
    SkippedBinary,
    /// Name is in the file-exclusion table, nothing was written
    Excluded,
    /// Stat, open or read failed; holds the error message
    Failed(String),
}

impl FileOutcome {
    /// Whether the file produced a fragment in the output
    pub fn contributes(&self) -> bool {
        !matches!(self, Self::Excluded)
    }
}

/// Counters collected during one traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Files that contributed a fragment (dump) or a line (tree)
    pub files_processed: usize,
    /// Directories rendered in tree mode
    pub directories: usize,
    /// Files whose full content was included
    pub included: usize,
    /// Files redacted because of their size
    pub skipped_size: usize,
    /// Files redacted because of their extension
    pub skipped_binary: usize,
    /// Files silently dropped by the file-exclusion table
    pub excluded: usize,
    /// Files that produced an error fragment
    pub failed: usize,
    /// Directories whose listing failed
    pub unreadable_dirs: usize,
    /// Total content bytes included
    pub content_bytes: u64,
    /// Whether the walk stopped early because of cancellation
    pub cancelled: bool,
}

impl ScanStatistics {
    /// Record the outcome of one file; returns whether it counts as processed
    pub fn record(&mut self, outcome: &FileOutcome) -> bool {
        match outcome {
            FileOutcome::Included(bytes) => {
                self.included += 1;
                self.content_bytes += bytes;
            }
            FileOutcome::SkippedSize(_) => self.skipped_size += 1,
            FileOutcome::SkippedBinary => self.skipped_binary += 1,
            FileOutcome::Excluded => self.excluded += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }

        if outcome.contributes() {
            self.files_processed += 1;
        }
        outcome.contributes()
    }
}
