//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each product must implement to
//! configure which scaffold is cloned, which placeholder is rewritten and
//! which dependencies the new module declares.

use crate::module::DependencySpec;
use std::path::Path;

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Scaffold repository location and its environment override
/// - The placeholder token and which files it is rewritten in
/// - The core library dependency and any auxiliary dependencies
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default location of the scaffold repository
    fn default_scaffold_url(&self) -> &'static str;

    /// Environment variable name for overriding the scaffold location
    fn scaffold_url_env(&self) -> &'static str;

    /// Module name used inside the scaffold, replaced with the project name
    fn placeholder(&self) -> &'static str;

    /// Module path of the core library the new project depends on
    fn core_dependency(&self) -> &'static str;

    /// Auxiliary dependencies recorded after the core library, at pinned versions
    fn extra_dependencies(&self) -> Vec<DependencySpec> {
        Vec::new()
    }

    /// Reference cloned and pinned when no version is given
    fn default_version(&self) -> &'static str {
        "master"
    }

    /// Extension (without the dot) of files the placeholder is rewritten in
    fn source_extension(&self) -> &'static str;

    /// Version-control client binary
    fn vcs_program(&self) -> &'static str {
        "git"
    }

    /// Module/dependency tool binary
    fn module_program(&self) -> &'static str;

    /// Manifest and lock files removed from the scaffold before module init
    fn reset_files(&self) -> &'static [&'static str];

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}
