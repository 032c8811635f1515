/*!
 * One invocation: walk the selection and assemble the payload text
 */

use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::progress::ProgressReporter;
use crate::scanner::Scanner;
use crate::types::{Mode, ScanStatistics};

/// The assembled payload and what it took to build it
#[derive(Debug, Clone)]
pub struct Payload {
    /// Text handed to the output sink
    pub text: String,
    /// Mode the payload was built in
    pub mode: Mode,
    /// Workspace root used for relative paths
    pub workspace_root: PathBuf,
    /// Traversal counters
    pub statistics: ScanStatistics,
}

/// Walk the configured selection and build the payload.
///
/// Dump output is staged in an anonymous temporary file so the text is only
/// held in memory once, at the end. The staging file is released on every
/// return path.
pub fn collect(
    config: &Config,
    progress: Arc<dyn ProgressReporter>,
    cancel: CancelToken,
) -> Result<Payload> {
    let scanner = Scanner::new(config, progress, cancel);
    info!(
        "Collecting {} for {} selected paths under {}",
        config.mode,
        config.roots.len(),
        scanner.workspace_root().display()
    );

    let text = match config.mode {
        Mode::Dump => {
            let staging = tempfile::tempfile()?;
            let mut writer = BufWriter::new(staging);
            scanner.dump(&mut writer)?;
            writer.flush()?;

            let mut staging = writer
                .into_inner()
                .with_context(|| "flushing staging file")?;
            staging.seek(SeekFrom::Start(0))?;
            let mut bytes = Vec::new();
            staging.read_to_end(&mut bytes)?;
            debug!("Staged {} bytes", bytes.len());

            String::from_utf8_lossy(&bytes).into_owned()
        }
        Mode::Tree => scanner.tree(),
    };

    Ok(Payload {
        text,
        mode: config.mode,
        workspace_root: scanner.workspace_root().to_path_buf(),
        statistics: scanner.get_statistics(),
    })
}
