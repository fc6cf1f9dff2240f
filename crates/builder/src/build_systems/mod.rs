//! Build system abstraction
//!
//! Only CMake is supported; the trait keeps the step logic separate from
//! the pipeline that sequences the steps.

use async_trait::async_trait;
use cmk_errors::Error;
use std::path::Path;

mod cmake;
mod core;

pub use cmake::CMakeBuildSystem;
pub use core::{BuildSystemContext, TestOutcome};

/// Trait for build system implementations
#[async_trait]
pub trait BuildSystem: Send + Sync {
    /// Detect if this build system applies to the source directory
    async fn detect(&self, source_dir: &Path) -> Result<bool, Error>;

    /// Configure phase; a non-zero exit is an error
    async fn configure(&self, ctx: &BuildSystemContext) -> Result<(), Error>;

    /// Build phase; a non-zero exit is an error
    async fn build(&self, ctx: &BuildSystemContext) -> Result<(), Error>;

    /// Test phase; a non-zero exit is reported, not raised
    async fn test(&self, ctx: &BuildSystemContext) -> Result<TestOutcome, Error>;

    /// Get build system name
    fn name(&self) -> &'static str;
}
