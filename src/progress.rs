/*!
 * Progress reporting for a traversal
 */

use indicatif::{ProgressBar, ProgressStyle};

/// Receives the cumulative number of processed files after each file
pub trait ProgressReporter {
    /// Called after each file with the running total
    fn report(&self, processed: usize);
}

/// Reporter that discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _processed: usize) {}
}

impl ProgressReporter for ProgressBar {
    fn report(&self, processed: usize) {
        self.set_position(processed as u64);
        self.set_message(format!("Processed {} files", processed));
    }
}

// Implement ProgressReporter for closures
impl<F> ProgressReporter for F
where
    F: Fn(usize),
{
    fn report(&self, processed: usize) {
        self(processed)
    }
}

/// Spinner shown on stderr while the selection is walked
pub fn spinner(title: &str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} ⏱️  {elapsed_precise}")
    {
        progress.set_style(style);
    }
    progress.set_prefix(title.to_string());
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress
}
