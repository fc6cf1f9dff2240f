//! CMake build system implementation

use super::{BuildSystem, BuildSystemContext, TestOutcome};
use async_trait::async_trait;
use cmk_errors::{BuildError, Error};
use cmk_events::BuildStep;
use std::path::Path;

/// CMake build system
#[derive(Clone, Debug)]
pub struct CMakeBuildSystem {
    cmake: String,
    ctest: String,
}

impl CMakeBuildSystem {
    /// Create a CMake build system using `cmake` and `ctest` from `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::with_tools("cmake", "ctest")
    }

    /// Create a CMake build system with explicit tool programs
    pub fn with_tools(cmake: impl Into<String>, ctest: impl Into<String>) -> Self {
        Self {
            cmake: cmake.into(),
            ctest: ctest.into(),
        }
    }

    /// Arguments for the configure step, run from the source root
    fn configure_args(ctx: &BuildSystemContext) -> Vec<String> {
        vec![
            ".".to_string(),
            format!("-B{}", ctx.output_dir),
            format!("-DCMAKE_BUILD_TYPE={}", ctx.build_type),
        ]
    }

    /// Arguments for the build step, run from the source root
    fn build_args(ctx: &BuildSystemContext) -> Vec<String> {
        let target = if Path::new(&ctx.output_dir).is_absolute() {
            ctx.output_dir.clone()
        } else {
            format!("./{}", ctx.output_dir)
        };
        vec!["--build".to_string(), target]
    }

    /// Arguments for ctest, run from inside the output directory
    fn test_args() -> Vec<String> {
        vec![".".to_string(), "--output-on-failure".to_string()]
    }

    fn command_line(program: &str, args: &[String]) -> String {
        format!("{program} {}", args.join(" "))
    }
}

impl Default for CMakeBuildSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BuildSystem for CMakeBuildSystem {
    async fn detect(&self, source_dir: &Path) -> Result<bool, Error> {
        Ok(tokio::fs::try_exists(source_dir.join("CMakeLists.txt"))
            .await
            .unwrap_or(false))
    }

    async fn configure(&self, ctx: &BuildSystemContext) -> Result<(), Error> {
        let args = Self::configure_args(ctx);
        let status = ctx
            .execute(BuildStep::Configure, &self.cmake, &args, &ctx.source_root)
            .await?;

        if !status.success {
            return Err(BuildError::ConfigureFailed {
                command: Self::command_line(&self.cmake, &args),
                exit_code: status.code,
            }
            .into());
        }

        Ok(())
    }

    async fn build(&self, ctx: &BuildSystemContext) -> Result<(), Error> {
        let args = Self::build_args(ctx);
        let status = ctx
            .execute(BuildStep::Build, &self.cmake, &args, &ctx.source_root)
            .await?;

        if !status.success {
            return Err(BuildError::CompileFailed {
                command: Self::command_line(&self.cmake, &args),
                exit_code: status.code,
            }
            .into());
        }

        Ok(())
    }

    async fn test(&self, ctx: &BuildSystemContext) -> Result<TestOutcome, Error> {
        let args = Self::test_args();
        let status = ctx
            .execute(BuildStep::Test, &self.ctest, &args, &ctx.build_dir())
            .await
            .map_err(|e| BuildError::TestRunnerFailed {
                message: e.to_string(),
            })?;

        if status.success {
            Ok(TestOutcome::Passed)
        } else {
            Ok(TestOutcome::Failed {
                exit_code: status.code,
            })
        }
    }

    fn name(&self) -> &'static str {
        "cmake"
    }
}
