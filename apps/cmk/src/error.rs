//! CLI error handling

use std::fmt;

use cmk_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(cmk_errors::ConfigError),
    /// Build pipeline error
    Ops(cmk_errors::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => {
                write!(f, "Configuration error: {}", e.user_message())?;
                write_details(f, e)
            }
            CliError::Ops(e) => {
                write!(f, "{}", e.user_message())?;
                write_details(f, e)
            }
        }
    }
}

fn write_details(f: &mut fmt::Formatter<'_>, e: &impl UserFacingError) -> fmt::Result {
    if let Some(code) = e.user_code() {
        write!(f, "\n  Code: {code}")?;
    }
    if let Some(hint) = e.user_hint() {
        write!(f, "\n  Hint: {hint}")?;
    }
    Ok(())
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Ops(e) => Some(e),
        }
    }
}

impl From<cmk_errors::ConfigError> for CliError {
    fn from(e: cmk_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<cmk_errors::Error> for CliError {
    fn from(e: cmk_errors::Error) -> Self {
        match e {
            cmk_errors::Error::Config(e) => CliError::Config(e),
            other => CliError::Ops(other),
        }
    }
}
