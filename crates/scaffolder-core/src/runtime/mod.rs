//! External process execution
//!
//! This module provides:
//! - The [`CommandRunner`] seam used by every stage that shells out
//! - [`ProcessRunner`], the real implementation on top of `tokio::process`

pub mod runner;

pub use runner::{CommandRunner, CommandSpec, ProcessRunner};
