//! Source root resolution
//!
//! The project root is derived from where the helper lives, never from the
//! caller's working directory. By convention the helper sits one directory
//! below the root (`<root>/scripts/cmk`, `<root>/bin/cmk`), so the default
//! root is the parent of the executable's directory. Because that breaks as
//! soon as the binary moves (for instance into `target/release/`), the
//! nearest ancestor holding a `CMakeLists.txt` is used when the default
//! does not look like a CMake project.

use cmk_errors::{ConfigError, Error};
use std::path::{Path, PathBuf};

/// File that marks a directory as a CMake source root
pub const PROJECT_MARKER: &str = "CMakeLists.txt";

/// How the source root was found
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceRootOrigin {
    /// Given on the command line, in the environment, or in the config file
    Explicit,
    /// Parent of the executable's directory, contains `CMakeLists.txt`
    Derived,
    /// Nearest ancestor of the executable's directory with `CMakeLists.txt`
    Discovered,
    /// Parent of the executable's directory, no `CMakeLists.txt` anywhere;
    /// the build's own project check warns about it
    Fallback,
}

/// A resolved source root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceRoot {
    pub path: PathBuf,
    pub origin: SourceRootOrigin,
}

/// Resolve the source root for the running executable
///
/// # Errors
///
/// Returns an error if an explicit root is not an existing directory or the
/// executable path cannot be determined.
pub fn resolve_source_root(explicit: Option<&Path>) -> Result<SourceRoot, Error> {
    let executable = std::env::current_exe().map_err(|e| ConfigError::InvalidSourceRoot {
        path: "<current executable>".to_string(),
        reason: e.to_string(),
    })?;
    resolve_from_executable(explicit, &executable)
}

/// Resolve the source root relative to a given executable path
///
/// # Errors
///
/// Returns an error if an explicit root is not an existing directory or the
/// executable has no parent directory.
pub fn resolve_from_executable(
    explicit: Option<&Path>,
    executable: &Path,
) -> Result<SourceRoot, Error> {
    if let Some(root) = explicit {
        return explicit_root(root);
    }

    let exe_dir = executable
        .parent()
        .ok_or_else(|| ConfigError::InvalidSourceRoot {
            path: executable.display().to_string(),
            reason: "executable has no parent directory".to_string(),
        })?;
    let derived = exe_dir.parent().unwrap_or(exe_dir);

    if is_project_root(derived) {
        return Ok(SourceRoot {
            path: derived.to_path_buf(),
            origin: SourceRootOrigin::Derived,
        });
    }

    if let Some(found) = exe_dir.ancestors().find(|dir| is_project_root(dir)) {
        return Ok(SourceRoot {
            path: found.to_path_buf(),
            origin: SourceRootOrigin::Discovered,
        });
    }

    Ok(SourceRoot {
        path: derived.to_path_buf(),
        origin: SourceRootOrigin::Fallback,
    })
}

fn explicit_root(root: &Path) -> Result<SourceRoot, Error> {
    let path = std::path::absolute(root).map_err(|e| ConfigError::InvalidSourceRoot {
        path: root.display().to_string(),
        reason: e.to_string(),
    })?;

    if !path.is_dir() {
        return Err(ConfigError::InvalidSourceRoot {
            path: path.display().to_string(),
            reason: "not an existing directory".to_string(),
        }
        .into());
    }

    Ok(SourceRoot {
        path,
        origin: SourceRootOrigin::Explicit,
    })
}

fn is_project_root(dir: &Path) -> bool {
    dir.join(PROJECT_MARKER).is_file()
}
