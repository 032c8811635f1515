/*!
 * Clipboard support for copy-for-ai
 *
 * Copies the payload by piping it into whichever clipboard command the
 * platform provides.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Clipboard commands, in the order they are preferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    /// tmux paste buffer, forwarded to the system clipboard
    Tmux,
    /// Wayland clipboard
    Wayland,
    /// X11 clipboard with xsel
    Xsel,
    /// X11 clipboard with xclip
    Xclip,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard (native or via WSL)
    Windows,
    /// Termux clipboard
    Termux,
}

impl ClipboardProvider {
    /// Command line that reads the text on stdin
    fn command(&self) -> (&'static str, Vec<&'static str>) {
        match self {
            Self::Tmux => ("tmux", vec!["load-buffer", "-w", "-"]),
            Self::Wayland => ("wl-copy", vec![]),
            Self::Xsel => ("xsel", vec!["-b", "-i"]),
            Self::Xclip => ("xclip", vec!["-selection", "clipboard", "-in"]),
            Self::MacOS => ("pbcopy", vec![]),
            Self::Windows => ("clip.exe", vec![]),
            Self::Termux => ("termux-clipboard-set", vec![]),
        }
    }

    /// First provider whose command is available here
    pub fn detect() -> Result<Self> {
        candidates()
            .into_iter()
            .find(|provider| command_exists(provider.command().0))
            .ok_or(ClipboardError::NoClipboardFound)
    }

    /// Copy text to the clipboard through this provider
    pub fn copy(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        debug!("Copying {} bytes with {}", text.len(), cmd);

        let mut child = Command::new(cmd)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
            })?;
            stdin.write_all(text.as_bytes())?;
        }
        // Close stdin so the command sees end of input
        drop(child.stdin.take());

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed(format!(
                "{} exited with status: {}",
                cmd, status
            )))
        }
    }
}

/// Copy text using the first available clipboard provider
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    ClipboardProvider::detect()?.copy(text)
}

/// Check if a command exists on the PATH
pub fn command_exists(command: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| dir.join(command).is_file())
}

/// Platform detection cache
static PLATFORM: OnceLock<Platform> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Platform {
    MacOS,
    Windows,
    Wsl,
    Linux,
    Android,
    Unknown,
}

fn platform() -> Platform {
    *PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "linux") {
            if env::var_os("WSL_DISTRO_NAME").is_some() {
                Platform::Wsl
            } else {
                Platform::Linux
            }
        } else {
            Platform::Unknown
        }
    })
}

/// Providers worth probing on this platform, most preferred first
fn candidates() -> Vec<ClipboardProvider> {
    let mut providers = Vec::with_capacity(4);

    // Inside a tmux session the paste buffer is what the user expects
    if env::var_os("TMUX").is_some() {
        providers.push(ClipboardProvider::Tmux);
    }

    match platform() {
        Platform::MacOS => providers.push(ClipboardProvider::MacOS),
        Platform::Windows | Platform::Wsl => providers.push(ClipboardProvider::Windows),
        Platform::Linux => {
            if env::var_os("WAYLAND_DISPLAY").is_some() {
                providers.push(ClipboardProvider::Wayland);
            }
            providers.push(ClipboardProvider::Xsel);
            providers.push(ClipboardProvider::Xclip);
        }
        Platform::Android => providers.push(ClipboardProvider::Termux),
        Platform::Unknown => {}
    }

    providers
}
