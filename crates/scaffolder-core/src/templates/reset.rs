//! Strip the scaffold's history and dependency metadata

use crate::error::{Result, ScaffoldError};
use crate::pipeline::Workspace;
use crate::product::ProductConfig;
use crate::runtime::{CommandRunner, CommandSpec};
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::debug;

const VCS_DIR: &str = ".git";

/// Remove version-control history and the product's reset files
///
/// Missing targets are skipped, so running this twice is harmless.
/// Returns the names of the entries that were actually removed.
pub async fn reset_workspace<C: ProductConfig>(
    config: &C,
    workspace: &Workspace,
) -> Result<Vec<String>> {
    let mut removed = Vec::new();

    let vcs_dir = workspace.join(VCS_DIR);
    if remove_if_present(&vcs_dir, fs::remove_dir_all(&vcs_dir).await)? {
        removed.push(VCS_DIR.to_string());
    }

    for name in config.reset_files() {
        let path = workspace.join(name);
        if remove_if_present(&path, fs::remove_file(&path).await)? {
            removed.push(name.to_string());
        }
    }

    debug!(?removed, "workspace reset");
    Ok(removed)
}

fn remove_if_present(path: &Path, result: io::Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ScaffoldError::WorkspaceReset {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Command that starts fresh, empty history in the workspace
pub fn vcs_init_command<C: ProductConfig>(config: &C, workspace: &Workspace) -> CommandSpec {
    CommandSpec::new(config.vcs_program())
        .args(["init", "-q"])
        .current_dir(workspace.root())
}

/// Initialize a new repository in the workspace
///
/// Best effort: a failure is returned as a warning message, never an error.
pub async fn init_repository<C: ProductConfig, R: CommandRunner>(
    config: &C,
    runner: &R,
    workspace: &Workspace,
) -> Option<String> {
    let cmd = vcs_init_command(config, workspace);
    match runner.run(&cmd).await {
        Ok(()) => None,
        Err(e) => Some(format!("Could not initialize a new repository: {}", e)),
    }
}
