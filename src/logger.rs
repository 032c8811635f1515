//! Diagnostic logging setup for the command-line binary

use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a `-v` count, used when `RUST_LOG` is unset
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("copy_for_ai={}", level)
}

/// Install the global subscriber writing to stderr
pub fn initialize_logger(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to set global logger: {}", e);
    }
}
