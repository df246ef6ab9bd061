#![allow(dead_code)]

use scaffolder_core::{
    CommandError, CommandRunner, CommandSpec, DependencySpec, PipelineObserver, ProductConfig,
    ScaffoldError, Stage,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Braid-like product used by the pipeline tests
#[derive(Clone, Default)]
pub struct TestConfig {
    pub extras: Vec<DependencySpec>,
}

impl ProductConfig for TestConfig {
    fn name(&self) -> &'static str {
        "test-cli"
    }

    fn display_name(&self) -> &'static str {
        "Test"
    }

    fn default_scaffold_url(&self) -> &'static str {
        "https://example.com/braid-scaffold.git"
    }

    fn scaffold_url_env(&self) -> &'static str {
        "SCAFFOLDER_CORE_TEST_SCAFFOLD_URL"
    }

    fn placeholder(&self) -> &'static str {
        "braid-scaffold"
    }

    fn core_dependency(&self) -> &'static str {
        "github.com/pojol/braid"
    }

    fn extra_dependencies(&self) -> Vec<DependencySpec> {
        self.extras.clone()
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

    fn next_steps(&self, _dir: &Path) -> Vec<String> {
        Vec::new()
    }
}

/// Records every command and simulates git/go effects on disk
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<CommandSpec>>,
    failures: Vec<(String, Vec<String>)>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command starting with `program prefix...` (exit status 1)
    pub fn failing(mut self, program: &str, prefix: &[&str]) -> Self {
        self.failures.push((
            program.to_string(),
            prefix.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded commands rendered as strings
    pub fn rendered(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.to_string()).collect()
    }

    fn should_fail(&self, command: &CommandSpec) -> bool {
        self.failures.iter().any(|(program, prefix)| {
            let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
            command.is(program, &prefix)
        })
    }

    fn simulate(&self, command: &CommandSpec) -> Result<(), String> {
        let dir = command.current_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let args: Vec<&str> = command.args.iter().map(String::as_str).collect();

        match (command.program.as_str(), args.as_slice()) {
            ("git", ["clone", .., source, dest]) => {
                let dest = Path::new(dest);
                if dest.exists() {
                    return Err(format!("destination path '{}' already exists", dest.display()));
                }
                copy_tree(Path::new(source), dest)?;
                fs::create_dir_all(dest.join(".git").join("objects")).map_err(|e| e.to_string())?;
                fs::write(dest.join(".git").join("HEAD"), "ref: refs/heads/master\n")
                    .map_err(|e| e.to_string())
            }
            ("git", ["init", ..]) => fs::create_dir_all(dir.join(".git")).map_err(|e| e.to_string()),
            ("go", ["mod", "init", name]) => {
                let manifest = dir.join("go.mod");
                if manifest.exists() {
                    return Err("go.mod already exists".to_string());
                }
                fs::write(manifest, format!("module {}\n\ngo 1.22\n", name))
                    .map_err(|e| e.to_string())
            }
            ("go", ["get", spec]) => {
                let manifest = dir.join("go.mod");
                let mut content = fs::read_to_string(&manifest)
                    .map_err(|_| "go.mod file not found".to_string())?;
                let (path, version) = spec.rsplit_once('@').ok_or("malformed spec")?;
                content.push_str(&format!("require {} {}\n", path, version));
                fs::write(manifest, content).map_err(|e| e.to_string())
            }
            ("go", ["mod", "tidy"]) => {
                let content = fs::read_to_string(dir.join("go.mod"))
                    .map_err(|_| "go.mod file not found".to_string())?;
                let sums: String = content
                    .lines()
                    .filter_map(|l| l.strip_prefix("require "))
                    .map(|r| format!("{} h1:fake=\n", r))
                    .collect();
                fs::write(dir.join("go.sum"), sums).map_err(|e| e.to_string())
            }
            _ => Err(format!("unexpected command: {}", command)),
        }
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &CommandSpec) -> Result<(), CommandError> {
        self.calls.lock().unwrap().push(command.clone());

        let failed = CommandError::Failed {
            command: command.to_string(),
            code: Some(1),
        };
        if self.should_fail(command) {
            return Err(failed);
        }
        self.simulate(command).map_err(|_| failed)
    }
}

fn copy_tree(source: &Path, dest: &Path) -> Result<(), String> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| e.to_string())?;
        let relative = entry.path().strip_prefix(source).map_err(|e| e.to_string())?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| e.to_string())?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

/// Observer that records events as strings like `started:fetch`
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<String>,
}

impl PipelineObserver for Recorder {
    fn stage_started(&mut self, stage: Stage) {
        self.events.push(format!("started:{}", stage));
    }

    fn stage_completed(&mut self, stage: Stage) {
        self.events.push(format!("completed:{}", stage));
    }

    fn stage_failed(&mut self, stage: Stage, _error: &ScaffoldError) {
        self.events.push(format!("failed:{}", stage));
    }

    fn warning(&mut self, message: &str) {
        self.events.push(format!("warning:{}", message));
    }
}

/// A temp dir holding `scaffold/` (the template) and `out/` (the parent dir)
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let scaffold = dir.path().join("scaffold");
        fs::create_dir_all(scaffold.join("actors")).unwrap();
        fs::create_dir_all(dir.path().join("out")).unwrap();

        fs::write(scaffold.join("module.go"), "package braid-scaffold").unwrap();
        fs::write(scaffold.join("README.md"), "# braid-scaffold\n").unwrap();
        fs::write(
            scaffold.join("actors").join("user.go"),
            "package actors\n\nimport \"braid-scaffold/events\"\nimport \"braid-scaffold/constant\"\n",
        )
        .unwrap();
        fs::write(scaffold.join("go.mod"), "module braid-scaffold\n\ngo 1.21\n").unwrap();
        fs::write(scaffold.join("go.sum"), "github.com/pojol/braid v0.1.0 h1:old=\n").unwrap();

        Self { dir }
    }

    pub fn scaffold(&self) -> PathBuf {
        self.dir.path().join("scaffold")
    }

    pub fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn project(&self, name: &str) -> PathBuf {
        self.out().join(name)
    }
}
