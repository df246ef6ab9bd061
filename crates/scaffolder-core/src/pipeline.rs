//! Template-instantiation pipeline
//!
//! `Fetch -> Reset -> Init -> Rewrite -> Resolve`. Each stage starts only
//! after the previous one has fully finished; the first failure aborts the
//! run and leaves the workspace as the last successful stage left it.

use crate::error::{Result, ScaffoldError};
use crate::module::{self, DependencySpec};
use crate::product::ProductConfig;
use crate::report::PipelineObserver;
use crate::runtime::CommandRunner;
use crate::templates::{fetcher, reset, rewriter, RewriteRule, TemplateSource, VersionRef};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Ordered pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Fetch,
    Reset,
    Init,
    Rewrite,
    Resolve,
}

impl Stage {
    /// Every stage, in execution order
    pub const ALL: [Stage; 5] = [
        Stage::Fetch,
        Stage::Reset,
        Stage::Init,
        Stage::Rewrite,
        Stage::Resolve,
    ];

    /// Progress text shown while the stage runs
    pub fn description(&self) -> &'static str {
        match self {
            Stage::Fetch => "Cloning scaffold",
            Stage::Reset => "Resetting workspace",
            Stage::Init => "Initializing module",
            Stage::Rewrite => "Updating module name in files",
            Stage::Resolve => "Tidying module",
        }
    }

    /// The stage that runs after this one
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Fetch => Some(Stage::Reset),
            Stage::Reset => Some(Stage::Init),
            Stage::Init => Some(Stage::Rewrite),
            Stage::Rewrite => Some(Stage::Resolve),
            Stage::Resolve => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Reset => "reset",
            Stage::Init => "init",
            Stage::Rewrite => "rewrite",
            Stage::Resolve => "resolve",
        };
        f.write_str(name)
    }
}

/// What to create: read-only once constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    project_name: String,
    version: VersionRef,
}

impl InvocationRequest {
    /// Build a request, falling back to the product's default version
    ///
    /// The project name is used verbatim; only emptiness is rejected.
    pub fn new<C: ProductConfig>(
        config: &C,
        project_name: impl Into<String>,
        version: Option<&str>,
    ) -> Result<Self> {
        let project_name = project_name.into();
        if project_name.is_empty() {
            return Err(ScaffoldError::usage(format!(
                "{} new <project-name> [version]",
                config.name()
            )));
        }

        let version = VersionRef::new(version.unwrap_or(config.default_version()));
        Ok(Self {
            project_name,
            version,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn version(&self) -> &VersionRef {
        &self.version
    }
}

/// The directory tree being turned into the new project
///
/// Every stage after the clone addresses paths relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    project_name: String,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, project_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            project_name: project_name.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

/// Runs the pipeline for one product
pub struct ProjectBuilder<'a, C: ProductConfig, R: CommandRunner> {
    config: &'a C,
    runner: R,
    source: TemplateSource,
    parent_dir: PathBuf,
    extra_dependencies: Vec<DependencySpec>,
    init_repository: bool,
}

impl<'a, C: ProductConfig, R: CommandRunner> ProjectBuilder<'a, C, R> {
    /// Create a builder that clones from `source`
    pub fn new(config: &'a C, runner: R, source: TemplateSource) -> Self {
        Self {
            config,
            runner,
            source,
            parent_dir: PathBuf::from("."),
            extra_dependencies: Vec::new(),
            init_repository: false,
        }
    }

    /// Create a builder using the product's scaffold location
    pub fn from_config(config: &'a C, runner: R) -> Result<Self> {
        let source = TemplateSource::from_config(config)?;
        Ok(Self::new(config, runner, source))
    }

    /// Create the workspace inside `dir` instead of the current directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.parent_dir = dir.into();
        self
    }

    /// Record an extra dependency after the product's own
    pub fn with_dependency(mut self, dependency: DependencySpec) -> Self {
        self.extra_dependencies.push(dependency);
        self
    }

    /// Start fresh version-control history after the reset stage
    pub fn with_repository_init(mut self, enabled: bool) -> Self {
        self.init_repository = enabled;
        self
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Where the workspace for `request` will be created
    pub fn workspace_for(&self, request: &InvocationRequest) -> Workspace {
        Workspace::new(
            self.parent_dir.join(request.project_name()),
            request.project_name(),
        )
    }

    /// Dependencies recorded by the init stage, in order
    pub fn dependencies(&self, version: &VersionRef) -> Vec<DependencySpec> {
        let mut deps = vec![DependencySpec::new(
            self.config.core_dependency(),
            version.module_version(),
        )];
        deps.extend(self.config.extra_dependencies());
        deps.extend(self.extra_dependencies.iter().cloned());
        deps
    }

    /// Run every stage in order and return the finished workspace
    pub async fn build<O: PipelineObserver>(
        &self,
        request: &InvocationRequest,
        observer: &mut O,
    ) -> Result<Workspace> {
        let config = self.config;
        let runner = &self.runner;
        let workspace = self.workspace_for(request);
        let version = request.version();

        begin(observer, Stage::Fetch);
        let fetched =
            fetcher::fetch_scaffold(config, runner, &self.source, version, &workspace).await;
        settle(observer, Stage::Fetch, fetched)?;
        observer.stage_completed(Stage::Fetch);

        begin(observer, Stage::Reset);
        let removed = settle(
            observer,
            Stage::Reset,
            reset::reset_workspace(config, &workspace).await,
        )?;
        if !removed.is_empty() {
            observer.info(&format!("Removed {}", removed.join(", ")));
        }
        if self.init_repository {
            if let Some(warning) = reset::init_repository(config, runner, &workspace).await {
                observer.warning(&warning);
            }
        }
        observer.stage_completed(Stage::Reset);

        begin(observer, Stage::Init);
        let initialized = init(config, runner, &workspace, &self.dependencies(version)).await;
        settle(observer, Stage::Init, initialized)?;
        observer.stage_completed(Stage::Init);

        begin(observer, Stage::Rewrite);
        let rule = RewriteRule::new(
            config.placeholder(),
            workspace.project_name(),
            config.source_extension(),
        );
        let report = settle(
            observer,
            Stage::Rewrite,
            rewriter::rewrite_identifiers(workspace.root(), &rule),
        )?;
        observer.info(&format!(
            "Replaced {} occurrence(s) in {} of {} .{} file(s)",
            report.replacements, report.files_changed, report.files_scanned, rule.extension
        ));
        observer.stage_completed(Stage::Rewrite);

        begin(observer, Stage::Resolve);
        let tidied = module::tidy_module(config, runner, &workspace).await;
        settle(observer, Stage::Resolve, tidied)?;
        observer.stage_completed(Stage::Resolve);

        info!(project = workspace.project_name(), "project ready");
        Ok(workspace)
    }
}

async fn init<C: ProductConfig, R: CommandRunner>(
    config: &C,
    runner: &R,
    workspace: &Workspace,
    dependencies: &[DependencySpec],
) -> Result<()> {
    module::init_module(config, runner, workspace).await?;
    module::add_dependencies(config, runner, workspace, dependencies).await
}

fn begin<O: PipelineObserver>(observer: &mut O, stage: Stage) {
    info!(%stage, "stage started");
    observer.stage_started(stage);
}

/// Report a failed stage to the observer and pass the result through
fn settle<O: PipelineObserver, T>(observer: &mut O, stage: Stage, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        info!(%stage, error = %err, "stage aborted");
        observer.stage_failed(stage, err);
    }
    result
}
