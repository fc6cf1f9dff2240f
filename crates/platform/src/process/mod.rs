//! Process execution operations

use async_trait::async_trait;
use cmk_errors::Error;
use std::path::PathBuf;

use crate::core::PlatformContext;

/// Platform-specific command builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl PlatformCommand {
    /// Create a new platform command
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<str>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Set the working directory for the command
    pub fn current_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Get the program name
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Get the arguments
    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the current directory
    #[must_use]
    pub fn get_current_dir(&self) -> Option<&PathBuf> {
        self.current_dir.as_ref()
    }

    /// Render the command line for logs and error messages
    #[must_use]
    pub fn display_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Exit information of a finished child process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code; `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub success: bool,
}

impl CommandStatus {
    /// Status of a process that exited with `code`
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            success: code == 0,
        }
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
            success: status.success(),
        }
    }
}

/// Trait for process execution operations
#[async_trait]
pub trait ProcessOperations: Send + Sync {
    /// Run a command with inherited stdin/stdout/stderr and wait for it.
    ///
    /// A non-zero exit is not an error here; callers inspect the returned
    /// status. Errors mean the process could not be started at all.
    async fn run_inherited(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandStatus, Error>;

    /// Create a new command builder
    fn create_command(&self, program: &str) -> PlatformCommand {
        PlatformCommand::new(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let mut cmd = PlatformCommand::new("cmake");
        cmd.arg(".")
            .args(["-Bbuild", "-DCMAKE_BUILD_TYPE=Debug"])
            .current_dir("/src/project");

        assert_eq!(cmd.program(), "cmake");
        assert_eq!(cmd.get_args(), [".", "-Bbuild", "-DCMAKE_BUILD_TYPE=Debug"]);
        assert_eq!(
            cmd.get_current_dir(),
            Some(&PathBuf::from("/src/project"))
        );
        assert_eq!(
            cmd.display_line(),
            "cmake . -Bbuild -DCMAKE_BUILD_TYPE=Debug"
        );
    }

    #[test]
    fn test_status_from_code() {
        assert!(CommandStatus::from_code(0).success);
        let failed = CommandStatus::from_code(8);
        assert!(!failed.success);
        assert_eq!(failed.code, Some(8));
    }
}
