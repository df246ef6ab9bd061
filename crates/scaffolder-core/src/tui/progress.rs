//! Charm-style pipeline progress using cliclack

use crate::error::ScaffoldError;
use crate::pipeline::Stage;
use crate::report::PipelineObserver;

/// Renders pipeline events as a cliclack session
///
/// Line-oriented log calls only, no spinners: the clone and module tools
/// write to the same terminal while a stage runs.
#[derive(Debug)]
pub struct ClackReporter {
    _session: (),
}

impl ClackReporter {
    /// Start a session headed by `title`
    pub fn start(title: impl std::fmt::Display) -> Self {
        let _ = cliclack::intro(title);
        Self { _session: () }
    }

    /// Close the session after a successful run
    pub fn finish(self, message: impl std::fmt::Display) {
        let _ = cliclack::outro(message);
    }

    /// Close the session after a failed run
    pub fn abort(self, message: impl std::fmt::Display) {
        let _ = cliclack::outro_cancel(message);
    }
}

impl PipelineObserver for ClackReporter {
    fn stage_started(&mut self, stage: Stage) {
        let _ = cliclack::log::step(stage.description());
    }

    fn stage_completed(&mut self, stage: Stage) {
        let _ = cliclack::log::success(format!("{} done", stage.description()));
    }

    fn stage_failed(&mut self, stage: Stage, _error: &ScaffoldError) {
        let _ = cliclack::log::error(format!("{} failed", stage.description()));
    }

    fn info(&mut self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn warning(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }
}
