//! Progress reporting for the pipeline

use crate::error::ScaffoldError;
use crate::pipeline::Stage;
use colored::Colorize;

/// Receives progress events while a project is being created
///
/// All methods default to no-ops.
pub trait PipelineObserver {
    fn stage_started(&mut self, _stage: Stage) {}

    fn stage_completed(&mut self, _stage: Stage) {}

    fn stage_failed(&mut self, _stage: Stage, _error: &ScaffoldError) {}

    fn info(&mut self, _message: &str) {}

    fn warning(&mut self, _message: &str) {}
}

impl PipelineObserver for () {}

/// Plain colored progress lines on stderr
///
/// External tool output is interleaved with these lines, so nothing here
/// redraws the terminal.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl PipelineObserver for ConsoleReporter {
    fn stage_started(&mut self, stage: Stage) {
        eprintln!("{} {}", "->".blue(), stage.description().bold());
    }

    fn stage_failed(&mut self, stage: Stage, _error: &ScaffoldError) {
        eprintln!("{} {}", "failed".red(), stage.description());
    }

    fn info(&mut self, message: &str) {
        eprintln!("   {}", message.dimmed());
    }

    fn warning(&mut self, message: &str) {
        eprintln!("{} {}", "Warning:".yellow(), message);
    }
}
