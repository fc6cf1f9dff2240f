//! Command line interface definition

use clap::Parser;
use cmk_config::Overrides;
use std::path::PathBuf;

/// cmk - configure, build and test a CMake project
#[derive(Parser, Debug)]
#[command(name = "cmk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Configure, build and test a CMake project")]
#[command(long_about = None)]
pub struct Cli {
    /// Run the test suite after a successful build
    #[arg(long)]
    pub tests: bool,

    /// Output directory, relative to the source root [default: build]
    #[arg(long, value_name = "DIR")]
    pub output: Option<String>,

    /// Build configuration passed as CMAKE_BUILD_TYPE [default: Debug]
    #[arg(long, value_name = "NAME")]
    pub config: Option<String>,

    /// Project root; derived from the executable location when omitted
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Use alternate settings file
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Enable debug logging to the cache directory
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Values that take precedence over the settings file and environment
    pub fn overrides(&self) -> Overrides {
        Overrides {
            output_dir: self.output.clone(),
            build_type: self.config.clone(),
            run_tests: self.tests,
            source_root: self.source_root.clone(),
        }
    }
}
