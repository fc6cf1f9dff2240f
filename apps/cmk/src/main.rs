//! cmk - configure, build and test a CMake project
//!
//! Runs `cmake` configure, `cmake --build` and optionally `ctest` for the
//! project the executable belongs to, with the tools' output passed through.

mod cli;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::CliError;
use crate::logging::log_event_with_tracing;
use clap::Parser;
use cmk_builder::{resolve_source_root, BuildOptions, Builder, RunOutcome};
use cmk_config::Config;
use cmk_events::EventReceiver;
use std::future::Future;
use std::process::ExitCode;
use tokio::select;
use tracing::{debug, error, info};

/// Exit code for configuration errors and failed configure/build steps
const FAULT_EXIT_CODE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    match run(cli).await {
        Ok(outcome) => {
            info!(?outcome, "Build finished");
            ExitCode::from(u8::try_from(outcome.exit_code()).unwrap_or(FAULT_EXIT_CODE))
        }
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            ExitCode::from(FAULT_EXIT_CODE)
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<RunOutcome, CliError> {
    info!("Starting cmk v{}", env!("CARGO_PKG_VERSION"));

    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.settings.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    config.apply_overrides(cli.overrides())?;

    let source_root = resolve_source_root(config.paths.source_root.as_deref())?;
    debug!(
        path = %source_root.path.display(),
        origin = ?source_root.origin,
        "Resolved source root"
    );

    let (event_sender, event_receiver) = cmk_events::channel();
    let builder = Builder::with_config(&config).with_event_sender(event_sender);
    let options = BuildOptions::from(&config);

    let outcome = run_with_events(builder.run(&source_root.path, &options), event_receiver).await?;
    Ok(outcome)
}

/// Drive the build while logging its events as they arrive
async fn run_with_events<F, T>(build: F, mut event_receiver: EventReceiver) -> F::Output
where
    F: Future<Output = Result<T, cmk_errors::Error>>,
{
    let mut build = Box::pin(build);

    loop {
        select! {
            result = &mut build => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    log_event_with_tracing(&event);
                }
                return result;
            }

            Some(event) = event_receiver.recv() => {
                log_event_with_tracing(&event);
            }
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(debug_enabled: bool) {
    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = Config::log_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "cmk-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| {
                                tracing_subscriber::EnvFilter::new(
                                    "info,cmk=debug,cmk_builder=debug,cmk_platform=debug",
                                )
                            },
                        ),
                    )
                    .init();

                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
                    )
                    .init();
            }
        }
    } else {
        // Normal mode: minimal logging to stderr, the tools own stdout
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}
