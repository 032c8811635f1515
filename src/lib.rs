/*!
 * copy-for-ai - Copy selected files or a directory tree as LLM context
 *
 * This library walks a selection of files and directories, applies exclusion
 * tables and the project's ignore-pattern file, and renders either a
 * concatenated dump of file contents or an ASCII directory tree.
 */

pub mod cancel;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod filter;
pub mod ignore_rules;
pub mod logger;
pub mod payload;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod sink;
pub mod tree;
pub mod types;
pub mod utils;
pub mod workspace;
pub mod writer;


// Re-export main components for easier access
pub use cancel::CancelToken;
pub use config::{Config, Destination};
pub use error::{CopyError, Result};
pub use exclusion::ExclusionPolicy;
pub use ignore_rules::IgnoreMatcher;
pub use payload::{collect, Payload};
pub use progress::{NoProgress, ProgressReporter};
pub use scanner::Scanner;
pub use types::{FileOutcome, Mode, ScanStatistics};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
