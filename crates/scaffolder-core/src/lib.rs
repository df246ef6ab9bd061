//! Scaffolder Core - Shared library for project scaffolding CLIs
//!
//! This library turns a checkout of a scaffold repository into a fresh,
//! personalized project: clone, strip history and lock metadata, declare a
//! new module, rewrite the scaffold's placeholder module name, and tidy the
//! dependency graph. Product binaries supply a [`ProductConfig`].
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Stage Operations** - Clone, reset, module commands and the
//!   pure placeholder rewrite, each returning a [`ScaffoldError`] on failure
//! - **Layer 2: Workflow Orchestration** - [`ProjectBuilder`] runs the stages in
//!   order through a [`CommandRunner`] and reports to a [`PipelineObserver`]
//! - **Layer 3: Progress UI** - Optional cliclack-based reporter (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based progress reporter
//!
//! # Example Usage
//!
//! ```ignore
//! use scaffolder_core::{InvocationRequest, ProcessRunner, ProjectBuilder};
//!
//! let request = InvocationRequest::new(&MyConfig, "demo", Some("v1.2.0"))?;
//! let builder = ProjectBuilder::from_config(&MyConfig, ProcessRunner::new())?;
//! let workspace = builder.build(&request, &mut ()).await?;
//! ```

pub mod error;
pub mod module;
pub mod pipeline;
pub mod product;
pub mod report;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{CommandError, Result, ScaffoldError};
pub use module::DependencySpec;
pub use pipeline::{InvocationRequest, ProjectBuilder, Stage, Workspace};
pub use product::ProductConfig;
pub use report::{ConsoleReporter, PipelineObserver};
pub use runtime::{CommandRunner, CommandSpec, ProcessRunner};
pub use templates::{replace_placeholder, RewriteReport, RewriteRule, TemplateSource, VersionRef};

#[cfg(feature = "tui")]
pub use tui::ClackReporter;
