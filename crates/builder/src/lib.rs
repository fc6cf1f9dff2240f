#![deny(clippy::pedantic, unsafe_code)]
//! Configure, build and test a CMake project for cmk
//!
//! The [`Builder`] runs the three steps strictly in order against a
//! resolved source root. Configure and build failures are returned as
//! errors; a failing test run is reported as [`RunOutcome::TestsFailed`].

mod build_systems;
mod builder;
pub mod source_root;

pub use build_systems::{BuildSystem, BuildSystemContext, CMakeBuildSystem, TestOutcome};
pub use builder::{BuildOptions, Builder, RunOutcome};
pub use cmk_events::BuildStep;
pub use source_root::{resolve_source_root, SourceRoot, SourceRootOrigin};
