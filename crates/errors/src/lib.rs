#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for cmk
//!
//! Errors are grouped by domain (build steps, configuration, process
//! execution) and folded into a single [`Error`] at crate boundaries.
//! All error types implement Clone so they can travel inside events.

use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

pub mod build;
pub mod config;
pub mod platform;

// Re-export all error types at the root
pub use build::BuildError;
pub use config::ConfigError;
pub use platform::PlatformError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
        path: Option<PathBuf>,
    },
}

impl Error {
    /// Create an Io error with an associated path
    pub fn io_with_path(err: &std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }
}

/// Result type alias for cmk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Stable error code for structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Config(err) => err.user_message(),
            Error::Build(err) => err.user_message(),
            Error::Platform(err) => err.user_message(),
            Error::Io {
                message,
                path: Some(path),
                ..
            } => Cow::Owned(format!("{}: {message}", path.display())),
            Error::Io { message, .. } => Cow::Borrowed(message),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_hint(),
            Error::Build(err) => err.user_hint(),
            Error::Platform(err) => err.user_hint(),
            Error::Io { .. } => Some("Check that the path is a readable file."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_code(),
            Error::Build(err) => err.user_code(),
            Error::Platform(err) => err.user_code(),
            Error::Io { .. } => Some("error.io"),
        }
    }
}
