//! Platform abstraction layer for cmk.
//!
//! Everything that touches the operating system's process table goes
//! through [`ProcessOperations`], so the build pipeline can be driven by a
//! fake in tests and by [`NativeProcessOperations`] in the binary.

pub mod core;
pub mod implementations;
pub mod process;

pub use core::{Platform, PlatformContext};
pub use implementations::native::NativeProcessOperations;

/// Re-export commonly used types
pub use process::{CommandStatus, PlatformCommand, ProcessOperations};
