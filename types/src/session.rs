//! Live session state as the presentation layer observes it.

use serde::{Deserialize, Serialize};

/// One synthetic measurement collected while an experiment is running.
///
/// Immutable once created; samples are appended in tick order and removed
/// only by a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Index of this sample within its run, starting at zero.
    pub tick: u64,
    pub value: f64,
}

/// Generated summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub conclusion: String,
    pub observations: Vec<String>,
    pub calculations: String,
}

/// Lifecycle state of a session's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running,
    Completed,
}

impl RunState {
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, RunState::Running)
    }
}

/// Read-only view of a session, rebuilt by the controller on demand.
///
/// The presentation polls this each frame; there is no event bus.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub current_step: usize,
    pub step_count: usize,
    pub run_state: RunState,
    pub samples: &'a [Sample],
    pub results: Option<&'a ResultsSummary>,
}

impl SessionSnapshot<'_> {
    /// Step progress in percent, as shown on the progress bar.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        (self.current_step as f64 / self.step_count as f64) * 100.0
    }
}
