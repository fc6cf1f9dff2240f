//! Core types shared by build system implementations

use cmk_errors::Error;
use cmk_events::{AppEvent, BuildEvent, BuildStep, EventEmitter, EventSender};
use cmk_platform::{CommandStatus, Platform, PlatformContext};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::BuildOptions;

/// Everything a build system needs to run one invocation
#[derive(Clone, Debug)]
pub struct BuildSystemContext {
    /// Directory holding the top-level `CMakeLists.txt`
    pub source_root: PathBuf,
    /// Output directory as given, relative to the source root
    pub output_dir: String,
    /// Build configuration name (`CMAKE_BUILD_TYPE`)
    pub build_type: String,
    platform: Platform,
    platform_ctx: PlatformContext,
}

impl BuildSystemContext {
    /// Create a new build context
    #[must_use]
    pub fn new(
        platform: Platform,
        event_sender: Option<EventSender>,
        source_root: PathBuf,
        options: &BuildOptions,
    ) -> Self {
        let platform_ctx = platform.create_context(event_sender);
        Self {
            source_root,
            output_dir: options.output_dir.clone(),
            build_type: options.build_type.clone(),
            platform,
            platform_ctx,
        }
    }

    /// Absolute path of the output directory
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.source_root.join(&self.output_dir)
    }

    /// Run one step's tool with inherited stdio and report it through events
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started.
    pub async fn execute(
        &self,
        step: BuildStep,
        program: &str,
        args: &[String],
        working_dir: &Path,
    ) -> Result<CommandStatus, Error> {
        let process = self.platform.process();
        let mut cmd = process.create_command(program);
        cmd.args(args).current_dir(working_dir);

        self.emit(AppEvent::Build(BuildEvent::StepStarted {
            step,
            program: program.to_string(),
            args: args.to_vec(),
            working_dir: working_dir.to_path_buf(),
        }));

        let start = Instant::now();
        let status = process.run_inherited(&self.platform_ctx, cmd).await?;
        let duration = start.elapsed();

        if status.success {
            self.emit(AppEvent::Build(BuildEvent::StepCompleted { step, duration }));
        } else {
            self.emit(AppEvent::Build(BuildEvent::StepFailed {
                step,
                exit_code: status.code,
                duration,
            }));
        }

        Ok(status)
    }
}

impl EventEmitter for BuildSystemContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.platform_ctx.event_sender()
    }
}

/// Result of the test step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    /// `exit_code` is `None` when the runner was killed by a signal
    Failed { exit_code: Option<i32> },
}

impl TestOutcome {
    #[must_use]
    pub fn passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}
