//! Braid CLI - Project scaffolding for Braid services

use anyhow::Result;
use clap::{Parser, Subcommand};
use scaffolder_core::{
    ClackReporter, ConsoleReporter, DependencySpec, InvocationRequest, ProcessRunner,
    ProductConfig, ProjectBuilder, TemplateSource, Workspace,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Braid product configuration
#[derive(Clone)]
pub struct BraidConfig;

impl ProductConfig for BraidConfig {
    fn name(&self) -> &'static str {
        "braid-cli"
    }

    fn display_name(&self) -> &'static str {
        "Braid"
    }

    fn default_scaffold_url(&self) -> &'static str {
        "https://github.com/pojol/braid-scaffold.git"
    }

    fn scaffold_url_env(&self) -> &'static str {
        "BRAID_SCAFFOLD_URL"
    }

    fn placeholder(&self) -> &'static str {
        "braid-scaffold"
    }

    fn core_dependency(&self) -> &'static str {
        "github.com/pojol/braid"
    }

    fn source_extension(&self) -> &'static str {
        "go"
    }

    fn module_program(&self) -> &'static str {
        "go"
    }

    fn reset_files(&self) -> &'static [&'static str] {
        &["go.mod", "go.sum"]
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Build everything once to warm the module cache
        steps.push("go build ./...".to_string());

        // Step 3: Open README for instructions
        steps.push("Open README.md to get started".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "braid-cli")]
#[command(about = "CLI for creating Braid projects from the braid-scaffold template")]
#[command(version)]
pub struct Args {
    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Braid project
    New(NewArgs),
}

#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Project name: the directory created and the module identity
    pub project_name: String,

    /// Tag or branch of the scaffold and of the pinned braid dependency [default: master]
    #[arg(value_name = "VERSION")]
    pub version_ref: Option<String>,

    /// Scaffold repository URL or local path (overrides BRAID_SCAFFOLD_URL)
    #[arg(long)]
    pub repo: Option<String>,

    /// Parent directory to create the project in
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Additional dependency to record, as <module>@<version> (repeatable)
    #[arg(long = "require", value_name = "MODULE@VERSION")]
    pub require: Vec<DependencySpec>,

    /// Kill any external command that runs longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Run `git init` in the new project once the scaffold history is removed
    #[arg(long = "git-init")]
    pub git_init: bool,

    /// Plain progress output instead of the interactive style
    #[arg(long)]
    pub plain: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn builder_for<'a>(
    config: &'a BraidConfig,
    args: &NewArgs,
) -> Result<ProjectBuilder<'a, BraidConfig, ProcessRunner>> {
    let runner = match args.timeout {
        Some(secs) => ProcessRunner::with_timeout(Duration::from_secs(secs)),
        None => ProcessRunner::new(),
    };

    let source = match &args.repo {
        Some(location) => TemplateSource::parse(location)?,
        None => TemplateSource::from_config(config)?,
    };

    let mut builder =
        ProjectBuilder::new(config, runner, source).with_repository_init(args.git_init);
    if let Some(dir) = &args.dir {
        builder = builder.in_dir(dir);
    }
    for dependency in &args.require {
        builder = builder.with_dependency(dependency.clone());
    }

    Ok(builder)
}

async fn run_new(config: &BraidConfig, args: NewArgs) -> Result<()> {
    let request = InvocationRequest::new(
        config,
        args.project_name.clone(),
        args.version_ref.as_deref(),
    )?;
    let builder = builder_for(config, &args)?;

    let interactive = !args.plain && console::Term::stderr().is_term();
    let workspace = if interactive {
        let mut reporter = ClackReporter::start(format!(
            "{} {}",
            config.display_name(),
            request.project_name()
        ));
        match builder.build(&request, &mut reporter).await {
            Ok(workspace) => {
                reporter.finish("Project ready");
                workspace
            }
            Err(e) => {
                reporter.abort("Setup aborted");
                return Err(e.into());
            }
        }
    } else {
        builder.build(&request, &mut ConsoleReporter).await?
    };

    println!(
        "{} project '{}' created and initialized successfully!",
        config.display_name(),
        workspace.project_name()
    );
    print_next_steps(config, &workspace);

    Ok(())
}

fn print_next_steps(config: &BraidConfig, workspace: &Workspace) {
    let steps = config.next_steps(workspace.root());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(args.verbose);
    tracing::debug!(?args, "parsed arguments");

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = BraidConfig;

    let result = match args.command {
        Command::New(new_args) => run_new(&config, new_args).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
