//! Scaffold retrieval from a remote repository or a local checkout
//!
//! Both kinds of source are materialized with the version-control client's
//! clone, so a local scaffold behaves exactly like a published one.

use super::version::VersionRef;
use crate::error::{Result, ScaffoldError};
use crate::pipeline::Workspace;
use crate::product::ProductConfig;
use crate::runtime::{CommandRunner, CommandSpec};
use std::fmt;
use std::path::PathBuf;
use tracing::info;
use url::Url;

/// Scaffold source - remote URL, scp-style shorthand, or local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Remote(Url),
    /// `user@host:path` form understood by git but not by URL parsers
    Shorthand(String),
    Local(PathBuf),
}

impl TemplateSource {
    /// Parse a repository location
    ///
    /// Anything with a scheme must be a valid URL; `git@host:path` is kept
    /// verbatim; everything else is a filesystem path.
    pub fn parse(location: &str) -> Result<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ScaffoldError::usage("scaffold repository location is empty"));
        }

        if location.contains("://") {
            let url = Url::parse(location).map_err(|e| {
                ScaffoldError::usage(format!("invalid scaffold URL '{}': {}", location, e))
            })?;
            return Ok(Self::Remote(url));
        }

        if is_scp_shorthand(location) {
            return Ok(Self::Shorthand(location.to_string()));
        }

        Ok(Self::Local(PathBuf::from(location)))
    }

    /// Resolve the source from a product config, honoring its env override
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let location = std::env::var(config.scaffold_url_env())
            .unwrap_or_else(|_| config.default_scaffold_url().to_string());
        Self::parse(&location)
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    /// Whether the clone goes over the network
    pub fn is_remote(&self) -> bool {
        match self {
            Self::Remote(url) => url.scheme() != "file",
            Self::Shorthand(_) => true,
            Self::Local(_) => false,
        }
    }

    /// The repository argument handed to the clone command
    pub fn clone_location(&self) -> String {
        match self {
            Self::Remote(url) => url.to_string(),
            Self::Shorthand(s) => s.clone(),
            Self::Local(path) => path.to_string_lossy().into_owned(),
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clone_location())
    }
}

fn is_scp_shorthand(location: &str) -> bool {
    match (location.find('@'), location.find(':')) {
        (Some(at), Some(colon)) => at < colon && !location[..colon].contains('/'),
        _ => false,
    }
}

/// Build the clone command for `source` at `version` into `workspace`
pub fn clone_command<C: ProductConfig>(
    config: &C,
    source: &TemplateSource,
    version: &VersionRef,
    workspace: &Workspace,
) -> CommandSpec {
    let mut cmd = CommandSpec::new(config.vcs_program())
        .arg("clone")
        .arg("--branch")
        .arg(version.clone_ref());

    // History is discarded by the reset stage, so only the snapshot is needed
    if source.is_remote() {
        cmd = cmd.arg("--depth").arg("1");
    }

    cmd.arg(source.clone_location())
        .arg(workspace.root().to_string_lossy())
}

/// Materialize `version` of the scaffold into the workspace directory
///
/// Fails with [`ScaffoldError::PathOccupied`] before running anything when
/// the destination already exists. A failed clone is not cleaned up.
pub async fn fetch_scaffold<C: ProductConfig, R: CommandRunner>(
    config: &C,
    runner: &R,
    source: &TemplateSource,
    version: &VersionRef,
    workspace: &Workspace,
) -> Result<()> {
    let dest = workspace.root();
    if dest.symlink_metadata().is_ok() {
        return Err(ScaffoldError::PathOccupied {
            path: dest.to_path_buf(),
        });
    }

    info!("Cloning scaffold: {} ({}) -> {}", source, version, dest.display());

    let cmd = clone_command(config, source, version, workspace);
    runner.run(&cmd).await.map_err(ScaffoldError::Clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_url() {
        let source = TemplateSource::parse("https://github.com/pojol/braid-scaffold.git").unwrap();
        assert!(matches!(source, TemplateSource::Remote(_)));
        assert!(source.is_remote());
        assert_eq!(
            source.clone_location(),
            "https://github.com/pojol/braid-scaffold.git"
        );
    }

    #[test]
    fn test_parse_scp_shorthand() {
        let source = TemplateSource::parse("git@github.com:pojol/braid-scaffold.git").unwrap();
        assert_eq!(
            source,
            TemplateSource::Shorthand("git@github.com:pojol/braid-scaffold.git".to_string())
        );
        assert!(source.is_remote());
    }

    #[test]
    fn test_parse_local_path() {
        let source = TemplateSource::parse("../scaffolds/braid").unwrap();
        assert_eq!(source, TemplateSource::local(PathBuf::from("../scaffolds/braid")));
        assert!(!source.is_remote());
    }

    #[test]
    fn test_file_url_is_not_remote() {
        let source = TemplateSource::parse("file:///srv/scaffold").unwrap();
        assert!(!source.is_remote());
    }

    #[test]
    fn test_parse_rejects_bad_url() {
        let err = TemplateSource::parse("https://exa mple.com/repo").unwrap_err();
        assert!(matches!(err, ScaffoldError::Usage { .. }));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(TemplateSource::parse("  ").is_err());
    }

    #[test]
    fn test_path_with_at_sign_is_local() {
        let source = TemplateSource::parse("/home/me@work/scaffold:v1").unwrap();
        assert!(matches!(source, TemplateSource::Local(_)));
    }
}
