//! Command dispatch for the session controller.
//!
//! The presentation layer maps user input to these commands; every one of
//! them is total over the session state.

use crate::Session;

/// User-issued session commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Reset,
    StepForward,
    StepBack,
    DownloadReport,
}

impl Command {
    /// Label for key-hint footers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Reset => "reset",
            Command::StepForward => "next step",
            Command::StepBack => "previous step",
            Command::DownloadReport => "download report",
        }
    }
}

impl Session {
    /// Dispatch a command to the matching operation.
    pub fn handle(&mut self, command: Command) {
        tracing::debug!(command = command.label(), "session command");
        match command {
            Command::Start => self.start(),
            Command::Reset => self.reset(),
            Command::StepForward => self.step_forward(),
            Command::StepBack => self.step_back(),
            Command::DownloadReport => self.download_report(),
        }
    }
}
