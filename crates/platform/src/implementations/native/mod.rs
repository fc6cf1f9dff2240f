//! Implementation backed by real operating-system processes

pub mod process;

pub use process::NativeProcessOperations;
