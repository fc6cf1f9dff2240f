use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The three steps of a build invocation, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStep {
    Configure,
    Build,
    Test,
}

impl BuildStep {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Build => "build",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build pipeline events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildEvent {
    /// Pipeline started with its resolved inputs
    SessionStarted {
        source_root: PathBuf,
        output_dir: String,
        build_type: String,
        run_tests: bool,
    },

    /// An external tool is about to run
    StepStarted {
        step: BuildStep,
        program: String,
        args: Vec<String>,
        working_dir: PathBuf,
    },

    /// An external tool exited successfully
    StepCompleted { step: BuildStep, duration: Duration },

    /// An external tool exited unsuccessfully; `exit_code` is `None` when
    /// the process was killed by a signal
    StepFailed {
        step: BuildStep,
        exit_code: Option<i32>,
        duration: Duration,
    },

    /// Pipeline finished without a fault
    SessionCompleted {
        tests_run: bool,
        tests_passed: bool,
        duration: Duration,
    },
}
