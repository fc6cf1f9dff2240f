//! Native process operations implementation
//!
//! Children inherit the helper's stdio so tool output reaches the terminal
//! (or CI log) unchanged. Only the exit status is observed.

use async_trait::async_trait;
use cmk_errors::{Error, PlatformError};
use cmk_events::EventEmitter;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

use crate::core::PlatformContext;
use crate::process::{CommandStatus, PlatformCommand, ProcessOperations};

/// Process operations that spawn real child processes
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_error(cmd: &PlatformCommand, err: &std::io::Error) -> PlatformError {
    if err.kind() == ErrorKind::NotFound {
        PlatformError::CommandNotFound {
            command: cmd.program().to_string(),
        }
    } else {
        PlatformError::ProcessExecutionFailed {
            command: cmd.program().to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ProcessOperations for NativeProcessOperations {
    async fn run_inherited(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandStatus, Error> {
        // ENOENT from a missing cwd would otherwise read as "command not found"
        if let Some(dir) = cmd.get_current_dir() {
            if !dir.is_dir() {
                return Err(PlatformError::ProcessExecutionFailed {
                    command: cmd.program().to_string(),
                    message: format!("working directory {} does not exist", dir.display()),
                }
                .into());
            }
        }

        let mut context = HashMap::from([("command".to_string(), cmd.display_line())]);
        if let Some(dir) = cmd.get_current_dir() {
            context.insert("working_dir".to_string(), dir.display().to_string());
        }
        ctx.emit_debug_with_context(format!("Executing: {}", cmd.program()), context);

        let start = Instant::now();
        let mut command = Command::new(cmd.program());
        command
            .args(cmd.get_args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .await
            .map_err(|e| spawn_error(&cmd, &e))?;
        let status = CommandStatus::from(status);

        ctx.emit_debug_with_context(
            format!("{} exited", cmd.program()),
            HashMap::from([
                ("exit_code".to_string(), format!("{:?}", status.code)),
                (
                    "duration_ms".to_string(),
                    start.elapsed().as_millis().to_string(),
                ),
            ]),
        );

        Ok(status)
    }
}
