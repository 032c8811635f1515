/*!
 * Command-line interface for copy-for-ai
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use tracing::{error, warn};

use copy_for_ai::config::{Args, Config};
use copy_for_ai::progress::{spinner, ProgressReporter};
use copy_for_ai::report::{print_report, RunReport};
use copy_for_ai::sink::sink_for;
use copy_for_ai::{collect, CancelToken, Mode, NoProgress, Result};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "copy-for-ai", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    copy_for_ai::logger::initialize_logger(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // Create and validate configuration
    let config = Config::from_args(args)?;
    config.validate()?;

    let cancel = CancelToken::new();
    if let Err(e) = cancel.cancel_on_ctrl_c() {
        warn!("Ctrl-C will not cancel the copy: {}", e);
    }

    let progress_bar = if config.quiet {
        None
    } else {
        Some(spinner(match config.mode {
            Mode::Dump => "Copying files for AI...",
            Mode::Tree => "Copying file tree for AI...",
        }))
    };
    let progress: Arc<dyn ProgressReporter> = match &progress_bar {
        Some(bar) => Arc::new(bar.clone()),
        None => Arc::new(NoProgress),
    };

    let start_time = Instant::now();

    let collected = collect(&config, progress, cancel);
    if let Some(bar) = &progress_bar {
        bar.finish_and_clear();
    }
    let payload = collected?;
    if payload.statistics.cancelled {
        warn!("Cancelled, delivering the partial result");
    }

    let sink = sink_for(&config.destination);
    sink.deliver(&payload.text)?;

    if !config.quiet {
        print_report(&RunReport {
            payload: &payload,
            destination: sink.describe(),
            duration: start_time.elapsed(),
        });
    }

    Ok(())
}
