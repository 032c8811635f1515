/*!
 * Configuration handling for copy-for-ai
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::exclusion::{ExclusionPolicy, MAX_FILE_SIZE};
use crate::ignore_rules::DEFAULT_IGNORE_FILE;
use crate::types::Mode;
use crate::{bail, ensure};

/// Command-line arguments for copy-for-ai
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "copy-for-ai",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy files or a directory tree to the clipboard as LLM context",
    long_about = "Concatenates the selected files and directories into one text payload, each file behind a path header, or renders them as an ASCII tree, and copies the result to the system clipboard."
)]
pub struct Args {
    /// Files and directories to copy
    pub paths: Vec<PathBuf>,

    /// Copy an ASCII directory tree instead of file contents
    #[clap(long)]
    pub tree: bool,

    /// Known project root used for relative paths (repeatable)
    #[clap(long = "workspace", value_name = "DIR")]
    pub workspaces: Vec<PathBuf>,

    /// Name of the ignore-pattern file at the workspace root
    #[clap(long, default_value = DEFAULT_IGNORE_FILE)]
    pub ignore_file: String,

    /// Do not read the ignore-pattern file
    #[clap(long)]
    pub no_ignore_file: bool,

    /// Largest file size in bytes whose content is included
    #[clap(long, default_value_t = MAX_FILE_SIZE)]
    pub max_size: u64,

    /// Additional directory names to skip
    #[clap(long = "exclude-dir", value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Additional file names whose content is never included
    #[clap(long = "exclude-file", value_delimiter = ',')]
    pub exclude_files: Vec<String>,

    /// Additional extensions treated as binary
    #[clap(long = "binary-ext", value_delimiter = ',')]
    pub binary_extensions: Vec<String>,

    /// Print the payload to stdout instead of copying it
    #[clap(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Write the payload to a file instead of copying it
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress spinner and the summary report
    #[clap(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Where the finished payload goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    /// System clipboard
    #[default]
    Clipboard,
    /// Standard output
    Stdout,
    /// A file on disk
    File(PathBuf),
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Selected files and directories, absolute, in caller order
    pub roots: Vec<PathBuf>,

    /// Dump or tree
    pub mode: Mode,

    /// Known project roots; empty means discover from the first root
    pub known_roots: Vec<PathBuf>,

    /// Whether to read the ignore-pattern file
    pub respect_ignore_file: bool,

    /// Name of the ignore-pattern file
    pub ignore_file: String,

    /// Exclusion tables and size threshold
    pub policy: ExclusionPolicy,

    /// Payload destination
    pub destination: Destination,

    /// Suppress progress and report output
    pub quiet: bool,
}

impl Config {
    /// Configuration with defaults for the given selection
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            mode: Mode::Dump,
            known_roots: Vec::new(),
            respect_ignore_file: true,
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            policy: ExclusionPolicy::default(),
            destination: Destination::Clipboard,
            quiet: false,
        }
    }

    /// Create configuration from command-line arguments
    ///
    /// Paths are made absolute against the current directory.
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = env::current_dir()?;

        let destination = match (args.stdout, args.output) {
            (true, _) => Destination::Stdout,
            (false, Some(path)) => Destination::File(path),
            (false, None) => Destination::Clipboard,
        };

        let policy = ExclusionPolicy::default()
            .with_excluded_dirs(args.exclude_dirs)
            .with_excluded_files(args.exclude_files)
            .with_binary_extensions(args.binary_extensions)
            .with_max_file_size(args.max_size);

        Ok(Self {
            roots: args.paths.iter().map(|p| absolutize(&cwd, p)).collect(),
            mode: if args.tree { Mode::Tree } else { Mode::Dump },
            known_roots: args.workspaces.iter().map(|p| absolutize(&cwd, p)).collect(),
            respect_ignore_file: !args.no_ignore_file,
            ignore_file: args.ignore_file,
            policy,
            destination,
            quiet: args.quiet,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            match self.mode {
                Mode::Dump => bail!(Selection, "No resources selected."),
                Mode::Tree => bail!(Selection, "No directories selected."),
            }
        }

        for root in &self.roots {
            ensure!(root.exists(), Config, "Path not found: {}", root.display());
        }

        for root in &self.known_roots {
            ensure!(
                root.is_dir(),
                Config,
                "Workspace is not a directory: {}",
                root.display()
            );
        }

        ensure!(
            self.policy.max_file_size() > 0,
            Config,
            "Maximum file size must be greater than zero"
        );

        ensure!(
            !self.ignore_file.trim().is_empty(),
            Config,
            "Ignore file name must not be empty"
        );

        // Check if output file directory exists
        if let Destination::File(path) = &self.destination {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    bail!(Config, "Output directory not found: {}", parent.display());
                }
            }
        }

        Ok(())
    }
}

/// Absolute, symlink-resolved form of `path` when it exists
fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    let joined = cwd.join(path);
    fs::canonicalize(&joined).unwrap_or(joined)
}
