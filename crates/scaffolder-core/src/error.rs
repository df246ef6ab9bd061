//! Error types for scaffolding

use crate::pipeline::Stage;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the scaffolder's error type
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Failure of a single external command
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be found in PATH
    #[error("`{program}` not found. Please ensure it is installed and in PATH")]
    NotFound { program: String },

    /// The process could not be started for another reason
    #[error("could not start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The process ran and exited unsuccessfully
    #[error("`{command}` {}", describe_exit(.code))]
    Failed { command: String, code: Option<i32> },

    /// The process was killed after exceeding the configured timeout
    #[error("`{command}` timed out after {secs} seconds")]
    TimedOut { command: String, secs: u64 },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Errors raised by the template-instantiation pipeline
///
/// Each variant belongs to exactly one [`Stage`]; the rendered message is the
/// diagnostic shown to the user.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Malformed invocation
    #[error("Usage: {message}")]
    Usage { message: String },

    /// The clone destination already exists
    #[error("Failed to clone scaffold: destination path '{}' already exists", path.display())]
    PathOccupied { path: PathBuf },

    #[error("Failed to clone scaffold: {0}")]
    Clone(#[source] CommandError),

    #[error("Failed to reset workspace: {}: {source}", path.display())]
    WorkspaceReset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to initialize module: {0}")]
    ModuleInit(#[source] CommandError),

    #[error("Failed to fetch dependency {dependency}: {source}")]
    DependencyFetch {
        dependency: String,
        #[source]
        source: CommandError,
    },

    #[error("Failed to update module name in files: {}: {source}", path.display())]
    FileRewrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to tidy module: {0}")]
    DependencyResolve(#[source] CommandError),
}

impl ScaffoldError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// The pipeline stage this error aborted, `None` for usage errors
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Usage { .. } => None,
            Self::PathOccupied { .. } | Self::Clone(_) => Some(Stage::Fetch),
            Self::WorkspaceReset { .. } => Some(Stage::Reset),
            Self::ModuleInit(_) | Self::DependencyFetch { .. } => Some(Stage::Init),
            Self::FileRewrite { .. } => Some(Stage::Rewrite),
            Self::DependencyResolve(_) => Some(Stage::Resolve),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_command_message() {
        let err = ScaffoldError::DependencyResolve(CommandError::Failed {
            command: "go mod tidy".to_string(),
            code: Some(1),
        });
        assert_eq!(
            err.to_string(),
            "Failed to tidy module: `go mod tidy` exited with status 1"
        );
        assert_eq!(err.stage(), Some(Stage::Resolve));
    }

    #[test]
    fn test_signal_exit_message() {
        let err = CommandError::Failed {
            command: "git clone".to_string(),
            code: None,
        };
        assert_eq!(err.to_string(), "`git clone` was terminated by a signal");
    }

    #[test]
    fn test_path_occupied_message() {
        let err = ScaffoldError::PathOccupied {
            path: PathBuf::from("demo"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to clone scaffold: destination path 'demo' already exists"
        );
        assert_eq!(err.stage(), Some(Stage::Fetch));
    }

    #[test]
    fn test_dependency_fetch_message_names_dependency() {
        let err = ScaffoldError::DependencyFetch {
            dependency: "github.com/pojol/braid@v9.9.9".to_string(),
            source: CommandError::NotFound {
                program: "go".to_string(),
            },
        };
        let message = err.to_string();
        assert!(message.starts_with("Failed to fetch dependency github.com/pojol/braid@v9.9.9: "));
        assert!(message.contains("`go` not found"));
        assert_eq!(err.stage(), Some(Stage::Init));
    }

    #[test]
    fn test_usage_has_no_stage() {
        let err = ScaffoldError::usage("project name must not be empty");
        assert_eq!(err.to_string(), "Usage: project name must not be empty");
        assert!(err.stage().is_none());
    }
}
