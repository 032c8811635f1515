/*!
 * Content writer for dump mode
 *
 * Turns one file into its section of the dump: a header followed by the
 * content, or a redaction notice. Problems with the file itself never escape
 * as errors; they become an inline `ERROR:` section. Only failures of the
 * output sink are returned to the caller.
 */

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::exclusion::ExclusionPolicy;
use crate::types::FileOutcome;
use crate::utils::format_kib;

/// Separator line around every section header
pub const SEPARATOR: &str = "================";

/// Size of the bounded buffer used to transfer file content
const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Failure while transferring content, split by side
enum TransferError {
    /// Reading the source file failed
    Read(io::Error),
    /// Writing the output sink failed
    Write(io::Error),
}

/// Writes dump-mode sections for individual files
pub struct ContentWriter<'a> {
    policy: &'a ExclusionPolicy,
}

impl<'a> ContentWriter<'a> {
    /// Create a writer applying the given exclusion policy
    pub fn new(policy: &'a ExclusionPolicy) -> Self {
        Self { policy }
    }

    /// Write the section for `path`, labelled with `relative_path`.
    ///
    /// `explicit` marks a file the caller selected directly; such files bypass
    /// the file-name exclusion table.
    pub fn write_file<W: Write>(
        &self,
        out: &mut W,
        path: &Path,
        relative_path: &str,
        explicit: bool,
    ) -> io::Result<FileOutcome> {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        if !explicit && self.policy.is_excluded_file(&name) {
            trace!("Excluded by name: {}", relative_path);
            return Ok(FileOutcome::Excluded);
        }

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => return self.write_error(out, relative_path, &e),
        };

        if self.policy.exceeds_max_size(metadata.len()) {
            debug!("Skipping {} ({} bytes)", relative_path, metadata.len());
            write!(
                out,
                "{sep}\nFile: {} (SKIPPED - SIZE {}KB) ---\n{sep}\n\n",
                relative_path,
                format_kib(metadata.len()),
                sep = SEPARATOR
            )?;
            return Ok(FileOutcome::SkippedSize(metadata.len()));
        }

        if self.policy.is_binary(path) {
            debug!("Skipping binary file {}", relative_path);
            write!(
                out,
                "{sep}\nFile: {} (SKIPPED - BINARY FILE)\n{sep}\n\n",
                relative_path,
                sep = SEPARATOR
            )?;
            return Ok(FileOutcome::SkippedBinary);
        }

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => return self.write_error(out, relative_path, &e),
        };

        write!(out, "{sep}\nFile: {}\n{sep}\n\n", relative_path, sep = SEPARATOR)?;
        match transfer(&mut file, out) {
            Ok(bytes) => {
                out.write_all(b"\n\n\n")?;
                trace!("Included {} ({} bytes)", relative_path, bytes);
                Ok(FileOutcome::Included(bytes))
            }
            Err(TransferError::Read(e)) => self.write_error(out, relative_path, &e),
            Err(TransferError::Write(e)) => Err(e),
        }
    }

    /// Write the inline error section for a file
    fn write_error<W: Write>(
        &self,
        out: &mut W,
        relative_path: &str,
        error: &io::Error,
    ) -> io::Result<FileOutcome> {
        debug!("Failed to read {}: {}", relative_path, error);
        write!(
            out,
            "{sep}\nFile: {} (ERROR: {})\n{sep}\n\n",
            relative_path,
            error,
            sep = SEPARATOR
        )?;
        Ok(FileOutcome::Failed(error.to_string()))
    }
}

/// Copy `reader` into `out` through a fixed-size buffer
fn transfer<R: Read, W: Write>(reader: &mut R, out: &mut W) -> Result<u64, TransferError> {
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TransferError::Read(e)),
        };
        out.write_all(&buffer[..read])
            .map_err(TransferError::Write)?;
        total += read as u64;
    }
}
