//! Module identity and dependency management
//!
//! Thin wrappers over the module tool: `mod init`, `get` and `mod tidy`,
//! all run from the workspace root with output passed through live.

use crate::error::{Result, ScaffoldError};
use crate::pipeline::Workspace;
use crate::product::ProductConfig;
use crate::runtime::{CommandRunner, CommandSpec};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// A dependency pinned at a version, rendered as `path@version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    pub path: String,
    pub version: String,
}

impl DependencySpec {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.path, self.version)
    }
}

impl FromStr for DependencySpec {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once('@') {
            Some((path, version)) if !path.is_empty() && !version.is_empty() => {
                Ok(Self::new(path, version))
            }
            _ => Err(ScaffoldError::usage(format!(
                "dependency '{}' must be written as <module>@<version>",
                s
            ))),
        }
    }
}

fn module_command<C: ProductConfig>(config: &C, workspace: &Workspace) -> CommandSpec {
    CommandSpec::new(config.module_program()).current_dir(workspace.root())
}

/// Declare the workspace as a new module named after the project
pub async fn init_module<C: ProductConfig, R: CommandRunner>(
    config: &C,
    runner: &R,
    workspace: &Workspace,
) -> Result<()> {
    info!("Initializing module {}", workspace.project_name());
    let cmd = module_command(config, workspace).args(["mod", "init", workspace.project_name()]);
    runner.run(&cmd).await.map_err(ScaffoldError::ModuleInit)
}

/// Record each dependency in the manifest, in order
///
/// Requires the manifest written by [`init_module`].
pub async fn add_dependencies<C: ProductConfig, R: CommandRunner>(
    config: &C,
    runner: &R,
    workspace: &Workspace,
    dependencies: &[DependencySpec],
) -> Result<()> {
    for dependency in dependencies {
        info!("Fetching dependency {}", dependency);
        let spec = dependency.to_string();
        let cmd = module_command(config, workspace).arg("get").arg(spec.clone());
        runner
            .run(&cmd)
            .await
            .map_err(|source| ScaffoldError::DependencyFetch {
                dependency: spec,
                source,
            })?;
    }
    Ok(())
}

/// Reconcile the manifest and lock file with the sources
pub async fn tidy_module<C: ProductConfig, R: CommandRunner>(
    config: &C,
    runner: &R,
    workspace: &Workspace,
) -> Result<()> {
    let cmd = module_command(config, workspace).args(["mod", "tidy"]);
    runner.run(&cmd).await.map_err(ScaffoldError::DependencyResolve)
}
