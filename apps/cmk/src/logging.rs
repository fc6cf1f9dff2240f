//! Structured logging integration for events
//!
//! Converts pipeline events into tracing records with structured fields so
//! that the JSON debug log can be filtered by step, program or exit code.

use cmk_events::{AppEvent, BuildEvent, GeneralEvent};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Log an AppEvent using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    if !tracing::level_enabled!(event.log_level()) {
        return;
    }

    match event {
        AppEvent::Build(build_event) => log_build_event(build_event),
        AppEvent::General(general_event) => log_general_event(general_event),
    }
}

fn log_build_event(event: &BuildEvent) {
    match event {
        BuildEvent::SessionStarted {
            source_root,
            output_dir,
            build_type,
            run_tests,
        } => {
            info!(
                source_root = %source_root.display(),
                output_dir = %output_dir,
                build_type = %build_type,
                run_tests = run_tests,
                "Build session started"
            );
        }
        BuildEvent::StepStarted {
            step,
            program,
            args,
            working_dir,
        } => {
            info!(
                step = %step,
                program = %program,
                args = ?args,
                working_dir = %working_dir.display(),
                "Step started"
            );
        }
        BuildEvent::StepCompleted { step, duration } => {
            info!(
                step = %step,
                duration_ms = millis(*duration),
                "Step completed"
            );
        }
        BuildEvent::StepFailed {
            step,
            exit_code,
            duration,
        } => {
            error!(
                step = %step,
                exit_code = ?exit_code,
                duration_ms = millis(*duration),
                "Step failed"
            );
        }
        BuildEvent::SessionCompleted {
            tests_run,
            tests_passed,
            duration,
        } => {
            info!(
                tests_run = tests_run,
                tests_passed = tests_passed,
                duration_ms = millis(*duration),
                "Build session completed"
            );
        }
    }
}

fn log_general_event(event: &GeneralEvent) {
    match event {
        GeneralEvent::Warning { message, context } => {
            warn!(context = ?context, "{message}");
        }
        GeneralEvent::DebugLog { message, context } => {
            debug!(context = ?context, "{message}");
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
