/*!
 * Destinations for the finished payload
 */

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::clipboard::copy_to_clipboard;
use crate::config::Destination;
use crate::error::Result;

/// Receives the finished payload of an invocation
pub trait OutputSink {
    /// Deliver the payload
    fn deliver(&self, payload: &str) -> Result<()>;

    /// Human-readable name used in reports
    fn describe(&self) -> String;
}

/// Copies the payload to the system clipboard
#[derive(Debug, Default)]
pub struct ClipboardSink;

impl OutputSink for ClipboardSink {
    fn deliver(&self, payload: &str) -> Result<()> {
        copy_to_clipboard(payload)?;
        Ok(())
    }

    fn describe(&self) -> String {
        "clipboard".to_string()
    }
}

/// Prints the payload on standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn deliver(&self, payload: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(payload.as_bytes())?;
        handle.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }
}

/// Writes the payload to a file, replacing it
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OutputSink for FileSink {
    fn deliver(&self, payload: &str) -> Result<()> {
        fs::write(&self.path, payload)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Build the sink for a configured destination
pub fn sink_for(destination: &Destination) -> Box<dyn OutputSink> {
    match destination {
        Destination::Clipboard => Box::new(ClipboardSink),
        Destination::Stdout => Box::new(StdoutSink),
        Destination::File(path) => Box::new(FileSink::new(path.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_writes_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("payload.txt");
        let sink = sink_for(&Destination::File(path.clone()));

        sink.deliver("tree\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "tree\n");
        assert_eq!(sink.describe(), path.display().to_string());
    }

    #[test]
    fn test_clipboard_sink_without_provider() {
        use crate::clipboard::{ClipboardError, ClipboardProvider};
        use crate::error::CopyError;

        // Only observable on hosts without any clipboard command
        if ClipboardProvider::detect().is_ok() {
            return;
        }
        let err = ClipboardSink.deliver("payload").unwrap_err();
        assert!(matches!(
            err,
            CopyError::Clipboard(ClipboardError::NoClipboardFound)
        ));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(sink_for(&Destination::Clipboard).describe(), "clipboard");
        assert_eq!(sink_for(&Destination::Stdout).describe(), "stdout");
    }
}
