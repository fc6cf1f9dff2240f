#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for cmk
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/cmk/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary through [`Overrides`])

use cmk_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Default output directory, relative to the source root
pub const DEFAULT_OUTPUT_DIR: &str = "build";

/// Default CMake build configuration
pub const DEFAULT_BUILD_TYPE: &str = "Debug";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub tools: ToolConfig,

    #[serde(default)]
    pub paths: PathConfig,
}

/// Build step configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
    /// Output directory, relative to the source root
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Value passed as `CMAKE_BUILD_TYPE`
    #[serde(default = "default_build_type")]
    pub build_type: String,
    #[serde(default)]
    pub run_tests: bool,
}

/// External tool locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolConfig {
    #[serde(default = "default_cmake")]
    pub cmake: String,
    #[serde(default = "default_ctest")]
    pub ctest: String,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PathConfig {
    pub source_root: Option<PathBuf>,
}

/// Values supplied on the command line; `None` leaves the merged value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<String>,
    pub build_type: Option<String>,
    pub run_tests: bool,
    pub source_root: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            build_type: DEFAULT_BUILD_TYPE.to_string(),
            run_tests: false,
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            cmake: default_cmake(),
            ctest: default_ctest(),
        }
    }
}

// Default value functions for serde
fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_build_type() -> String {
    DEFAULT_BUILD_TYPE.to_string()
}

fn default_cmake() -> String {
    "cmake".to_string()
}

fn default_ctest() -> String {
    "ctest".to_string()
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("cmk").join("config.toml"))
    }

    /// Directory used for debug log files
    #[must_use]
    pub fn log_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("cmk")
            .join("logs")
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, an I/O
    /// error if it exists but cannot be read as UTF-8 text, or a parse error
    /// if the contents are not valid TOML.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::from(ConfigError::NotFound {
                    path: path.display().to_string(),
                })
            } else {
                Error::io_with_path(&e, path)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let Ok(config_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            debug!(path = %config_path.display(), "loading config file");
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// An explicit path must exist; the default path may be absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // CMK_OUTPUT
        if let Ok(output) = std::env::var("CMK_OUTPUT") {
            self.build.output_dir = non_empty("CMK_OUTPUT", output)?;
        }

        // CMK_CONFIG
        if let Ok(build_type) = std::env::var("CMK_CONFIG") {
            self.build.build_type = non_empty("CMK_CONFIG", build_type)?;
        }

        // CMK_RUN_TESTS
        if let Ok(run_tests) = std::env::var("CMK_RUN_TESTS") {
            self.build.run_tests = match run_tests.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "CMK_RUN_TESTS".to_string(),
                        value: run_tests,
                    }
                    .into())
                }
            };
        }

        // CMK_SOURCE_ROOT
        if let Ok(root) = std::env::var("CMK_SOURCE_ROOT") {
            self.paths.source_root = Some(PathBuf::from(non_empty("CMK_SOURCE_ROOT", root)?));
        }

        // CMK_CMAKE / CMK_CTEST
        if let Ok(cmake) = std::env::var("CMK_CMAKE") {
            self.tools.cmake = non_empty("CMK_CMAKE", cmake)?;
        }
        if let Ok(ctest) = std::env::var("CMK_CTEST") {
            self.tools.ctest = non_empty("CMK_CTEST", ctest)?;
        }

        Ok(())
    }

    /// Apply command-line values (highest precedence)
    ///
    /// `--tests` can only switch testing on; it never turns off a
    /// `run_tests = true` coming from the file or environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is empty.
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<(), Error> {
        if let Some(output) = overrides.output_dir {
            self.build.output_dir = non_empty("--output", output)?;
        }
        if let Some(build_type) = overrides.build_type {
            self.build.build_type = non_empty("--config", build_type)?;
        }
        if overrides.run_tests {
            self.build.run_tests = true;
        }
        if let Some(root) = overrides.source_root {
            self.paths.source_root = Some(root);
        }
        Ok(())
    }
}

fn non_empty(field: &str, value: String) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into());
    }
    Ok(value)
}
