/*!
 * Traversal engine
 *
 * Walks the root selection depth-first, applying the exclusion policy and the
 * ignore-pattern file, and hands every surviving file to the content writer
 * (dump mode) or the tree renderer (tree mode).
 */

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::cancel::CancelToken;
use crate::config::Config;
use crate::filter::{list_children, EntryFilter};
use crate::ignore_rules::IgnoreMatcher;
use crate::progress::ProgressReporter;
use crate::tree::TreeRenderer;
use crate::types::ScanStatistics;
use crate::workspace::{discover_project_root, resolve_workspace_root, ExplicitSelection};
use crate::writer::ContentWriter;

/// Scanner for one invocation over a root selection
pub struct Scanner {
    /// Selected files and directories, in caller order
    roots: Vec<PathBuf>,
    /// Exclusion, ignore and selection rules
    filter: EntryFilter,
    /// Cooperative cancellation flag
    cancel: CancelToken,
    /// Progress sink
    progress: Arc<dyn ProgressReporter>,
    /// Scanner statistics
    statistics: RefCell<ScanStatistics>,
}

impl Scanner {
    /// Create a scanner, resolving the workspace root and compiling ignore rules
    pub fn new(config: &Config, progress: Arc<dyn ProgressReporter>, cancel: CancelToken) -> Self {
        let first = config.roots.first().cloned().unwrap_or_default();

        let known_roots = if config.known_roots.is_empty() {
            discover_project_root(&first).into_iter().collect()
        } else {
            config.known_roots.clone()
        };
        let workspace_root = resolve_workspace_root(&first, &known_roots);

        let matcher = if config.respect_ignore_file {
            IgnoreMatcher::build(&workspace_root, &config.ignore_file)
        } else {
            IgnoreMatcher::none()
        };
        let selection = ExplicitSelection::new(&workspace_root, &config.roots);
        debug!(
            "Workspace root {} with {} selected paths",
            workspace_root.display(),
            config.roots.len()
        );

        Self {
            roots: config.roots.clone(),
            filter: EntryFilter::new(workspace_root, config.policy.clone(), matcher, selection),
            cancel,
            progress,
            statistics: RefCell::new(ScanStatistics::default()),
        }
    }

    /// The resolved workspace root
    pub fn workspace_root(&self) -> &Path {
        self.filter.workspace_root()
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScanStatistics {
        self.statistics.borrow().clone()
    }

    /// Stream the dump of every selected entry into `out`.
    ///
    /// Only write failures of `out` are returned; everything that goes wrong
    /// with a selected file or directory is recorded in the output or logged.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let writer = ContentWriter::new(self.filter.policy());

        for root in &self.roots {
            if self.check_cancelled() {
                break;
            }

            if root.is_dir() {
                self.dump_directory(&writer, root, out)?;
                continue;
            }

            let rel = self.filter.relative_path(root);
            if self.filter.is_ignored(&rel, false) {
                debug!("Selected file {} is ignored", rel);
                continue;
            }
            self.dump_file(&writer, root, &rel, true, out)?;
        }

        Ok(())
    }

    /// Render the tree of every selected directory.
    ///
    /// Selected plain files have no tree and are passed over.
    pub fn tree(&self) -> String {
        let renderer = TreeRenderer::new(&self.filter, &self.cancel, self.progress.as_ref());
        let mut result = String::new();

        for root in &self.roots {
            if self.check_cancelled() {
                break;
            }
            if !root.is_dir() {
                debug!("Not a directory, no tree for {}", root.display());
                continue;
            }
            result.push_str(&renderer.render_root(root));
        }

        let mut stats = self.statistics.borrow_mut();
        stats.files_processed = renderer.files();
        stats.directories = renderer.directories();
        stats.unreadable_dirs = renderer.unreadable_dirs();
        stats.cancelled |= self.cancel.is_cancelled();
        result
    }

    /// Walk one directory; a failed listing contributes nothing
    fn dump_directory<W: Write>(
        &self,
        writer: &ContentWriter<'_>,
        dir: &Path,
        out: &mut W,
    ) -> io::Result<()> {
        let entries = match list_children(dir, false) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Error processing directory {}: {}", dir.display(), e);
                self.statistics.borrow_mut().unreadable_dirs += 1;
                return Ok(());
            }
        };

        for entry in entries {
            if self.check_cancelled() {
                break;
            }

            let name = entry.file_name().to_string_lossy();
            let rel = self.filter.relative_path(entry.path());
            let file_type = entry.file_type();

            if let Some(reason) = self.filter.skip_reason(&name, &rel, file_type.is_dir()) {
                trace!("Skipping {} ({:?})", rel, reason);
                continue;
            }

            if file_type.is_dir() {
                self.dump_directory(writer, entry.path(), out)?;
            } else if file_type.is_file() {
                self.dump_file(writer, entry.path(), &rel, false, out)?;
            } else {
                trace!("Skipping non-regular entry {}", rel);
            }
        }

        Ok(())
    }

    /// Write one file's section and update counters and progress
    fn dump_file<W: Write>(
        &self,
        writer: &ContentWriter<'_>,
        path: &Path,
        rel: &str,
        explicit: bool,
        out: &mut W,
    ) -> io::Result<()> {
        let outcome = writer.write_file(out, path, rel, explicit)?;

        let processed = {
            let mut stats = self.statistics.borrow_mut();
            stats.record(&outcome).then_some(stats.files_processed)
        };
        if let Some(processed) = processed {
            self.progress.report(processed);
        }

        Ok(())
    }

    /// Poll the cancellation flag, remembering that it fired
    fn check_cancelled(&self) -> bool {
        let cancelled = self.cancel.is_cancelled();
        if cancelled {
            self.statistics.borrow_mut().cancelled = true;
        }
        cancelled
    }
}
