//! Main builder implementation

use crate::{BuildSystem, BuildSystemContext, CMakeBuildSystem, TestOutcome};
use cmk_config::Config;
use cmk_errors::Error;
use cmk_events::{AppEvent, BuildEvent, EventEmitter, EventSender};
use cmk_platform::Platform;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Options for one invocation, fixed once parsed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Output directory, relative to the source root
    pub output_dir: String,
    /// Build configuration name
    pub build_type: String,
    /// Run the test suite after a successful build
    pub run_tests: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for BuildOptions {
    fn from(config: &Config) -> Self {
        Self {
            output_dir: config.build.output_dir.clone(),
            build_type: config.build.build_type.clone(),
            run_tests: config.build.run_tests,
        }
    }
}

/// How a run without faults ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Configure and build succeeded; tests were skipped or passed
    Success { tests_run: bool },
    /// The test runner exited non-zero (or was killed)
    TestsFailed { exit_code: Option<i32> },
}

impl RunOutcome {
    /// Process exit code for this outcome
    ///
    /// Any test failure maps to 1, whatever the runner returned.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success { .. } => 0,
            Self::TestsFailed { .. } => 1,
        }
    }
}

/// Sequences configure, build and test for one source root
#[derive(Clone)]
pub struct Builder {
    platform: Platform,
    build_system: Arc<dyn BuildSystem>,
    event_sender: Option<EventSender>,
}

impl Builder {
    /// Create new builder using real processes and tools from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
            build_system: Arc::new(CMakeBuildSystem::new()),
            event_sender: None,
        }
    }

    /// Create builder with tool programs taken from configuration
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self::new().with_build_system(CMakeBuildSystem::with_tools(
            config.tools.cmake.clone(),
            config.tools.ctest.clone(),
        ))
    }

    /// Set the platform used to launch processes
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the build system
    #[must_use]
    pub fn with_build_system(mut self, build_system: impl BuildSystem + 'static) -> Self {
        self.build_system = Arc::new(build_system);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Configure, build and optionally test the project at `source_root`
    ///
    /// Steps run strictly in order and each one is awaited before the next
    /// starts. A failed step stops the run: configure and build failures
    /// come back as errors, while a failed test run is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if configure or build exits non-zero, or if any
    /// tool cannot be started.
    pub async fn run(&self, source_root: &Path, options: &BuildOptions) -> Result<RunOutcome, Error> {
        let start = Instant::now();
        let ctx = BuildSystemContext::new(
            self.platform.clone(),
            self.event_sender.clone(),
            source_root.to_path_buf(),
            options,
        );

        self.emit(AppEvent::Build(BuildEvent::SessionStarted {
            source_root: source_root.to_path_buf(),
            output_dir: options.output_dir.clone(),
            build_type: options.build_type.clone(),
            run_tests: options.run_tests,
        }));

        if !self.build_system.detect(source_root).await? {
            self.emit_warning_with_context(
                format!("no CMakeLists.txt in {}", source_root.display()),
                format!("{} will report the problem", self.build_system.name()),
            );
        }

        self.build_system.configure(&ctx).await?;
        self.build_system.build(&ctx).await?;

        let tests = if options.run_tests {
            Some(self.build_system.test(&ctx).await?)
        } else {
            None
        };

        self.emit(AppEvent::Build(BuildEvent::SessionCompleted {
            tests_run: tests.is_some(),
            tests_passed: tests.is_some_and(TestOutcome::passed),
            duration: start.elapsed(),
        }));

        Ok(match tests {
            None => RunOutcome::Success { tests_run: false },
            Some(TestOutcome::Passed) => RunOutcome::Success { tests_run: true },
            Some(TestOutcome::Failed { exit_code }) => RunOutcome::TestsFailed { exit_code },
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEmitter for Builder {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("build_system", &self.build_system.name())
            .field("event_sender", &self.event_sender.is_some())
            .finish_non_exhaustive()
    }
}
