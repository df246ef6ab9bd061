//! External command execution
//!
//! Every stage that shells out (clone, module init, dependency fetch, tidy)
//! goes through [`CommandRunner`], so tests can substitute a fake runner
//! without invoking real version-control or dependency tools.

use crate::error::CommandError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

/// A single external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory for the child; `None` inherits the caller's
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// True when `program` and the leading arguments match `prefix`
    ///
    /// `spec.is("go", &["mod", "init"])` matches `go mod init demo`.
    pub fn is(&self, program: &str, prefix: &[&str]) -> bool {
        self.program == program
            && self.args.len() >= prefix.len()
            && self.args.iter().zip(prefix).all(|(a, p)| a == p)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs external commands to completion
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `command` and wait for it to exit
    ///
    /// Returns `Ok(())` only when the process exits successfully.
    async fn run(&self, command: &CommandSpec) -> Result<(), CommandError>;
}

impl<R: CommandRunner> CommandRunner for &R {
    async fn run(&self, command: &CommandSpec) -> Result<(), CommandError> {
        (**self).run(command).await
    }
}

/// Runs commands as child processes with stdout/stderr passed through live
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// A runner that waits indefinitely for each command
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill a command and fail if it runs longer than `limit`
    pub fn with_timeout(limit: Duration) -> Self {
        Self {
            timeout: Some(limit),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<(), CommandError> {
        let rendered = command.to_string();
        debug!(command = %rendered, dir = ?command.current_dir, "running command");

        let mut cmd = TokioCommand::new(&command.program);
        cmd.args(&command.args).kill_on_drop(true);
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CommandError::NotFound {
                    program: command.program.clone(),
                }
            } else {
                CommandError::Spawn {
                    command: rendered.clone(),
                    source: e,
                }
            }
        })?;

        let status = match self.timeout {
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    // Kill the process on timeout
                    let _ = child.kill().await;
                    return Err(CommandError::TimedOut {
                        command: rendered,
                        secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait().await,
        }
        .map_err(|e| CommandError::Spawn {
            command: rendered.clone(),
            source: e,
        })?;

        debug!(command = %rendered, %status, "command exited");

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                command: rendered,
                code: status.code(),
            })
        }
    }
}
