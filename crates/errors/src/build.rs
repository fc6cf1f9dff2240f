//! Build step error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("configure failed: `{command}` {}", describe_exit(.exit_code))]
    ConfigureFailed {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("compile failed: `{command}` {}", describe_exit(.exit_code))]
    CompileFailed {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("test runner could not be started: {message}")]
    TestRunnerFailed { message: String },
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigureFailed { .. } => {
                Some("Inspect the CMake output above; a stale cache can be cleared by removing the output directory.")
            }
            Self::CompileFailed { .. } => Some("Fix the compiler errors reported above and rerun."),
            Self::TestRunnerFailed { .. } => {
                Some("Make sure ctest is installed and on PATH, or set CMK_CTEST.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ConfigureFailed { .. } => "build.configure_failed",
            Self::CompileFailed { .. } => "build.compile_failed",
            Self::TestRunnerFailed { .. } => "build.test_runner_failed",
        };
        Some(code)
    }
}
