//! Session controller for Virtlab - state machine and orchestration.
//!
//! This crate owns the per-experiment session: step navigation, the
//! run/reset lifecycle, timed sample collection, and results synthesis.
//! The presentation layer issues [`Command`]s and polls a
//! [`SessionSnapshot`] each frame; nothing here renders.

mod commands;
mod config;
mod notices;
mod results;
mod signal;

#[cfg(test)]
mod tests;

pub use commands::Command;
pub use config::{ConfigError, LabConfig, SamplingConfig, UiConfig};
pub use notices::{Notice, NoticeLevel};
pub use signal::{NoisySine, SignalGenerator};

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use virtlab_types::{ExperimentDefinition, ResultsSummary, RunState, Sample, SessionSnapshot};

use crate::notices::NoticeQueue;

const DEFAULT_SAMPLE_PERIOD_MS: u64 = 1000;
const DEFAULT_RUN_DURATION_MS: u64 = 8000;

// ============================================================================
// Run timing
// ============================================================================

/// Timing of a run: how often samples fire and when the run completes.
///
/// The run length is a fixed wall-clock duration, unrelated to the number of
/// instruction steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTiming {
    pub sample_period: Duration,
    pub run_duration: Duration,
}

impl Default for RunTiming {
    fn default() -> Self {
        Self {
            sample_period: Duration::from_millis(DEFAULT_SAMPLE_PERIOD_MS),
            run_duration: Duration::from_millis(DEFAULT_RUN_DURATION_MS),
        }
    }
}

impl RunTiming {
    /// Resolve timing from the optional `[sampling]` config section.
    ///
    /// A zero sample period cannot drive a recurring timer; it falls back to
    /// the default with a warning.
    #[must_use]
    pub fn from_config(sampling: Option<&SamplingConfig>) -> Self {
        let defaults = Self::default();
        let Some(sampling) = sampling else {
            return defaults;
        };

        let sample_period = match sampling.sample_period_ms {
            Some(0) => {
                tracing::warn!("sample_period_ms must be nonzero; using default");
                defaults.sample_period
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.sample_period,
        };
        let run_duration = sampling
            .run_duration_ms
            .map_or(defaults.run_duration, Duration::from_millis);

        Self {
            sample_period,
            run_duration,
        }
    }

    /// Samples a full run yields: `⌊run_duration / sample_period⌋`.
    #[must_use]
    pub fn expected_samples(self) -> usize {
        let period = self.sample_period.as_millis().max(1);
        (self.run_duration.as_millis() / period) as usize
    }
}

// ============================================================================
// Run identity and signals
// ============================================================================

/// Identifier of one run within a session, captured when the run starts.
///
/// Timer callbacks tag every signal with the id of the run that scheduled
/// them; a signal whose id is not the active run's is stale and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunId(u64);

impl RunId {
    pub(crate) fn value(self) -> u64 {
        self.0
    }
}

/// Timer-driven events delivered to the session over the run channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunSignal {
    /// The recurring sample timer fired.
    Sample { run: RunId },
    /// The one-shot completion timer fired; no further signals follow.
    Finished { run: RunId },
}

impl RunSignal {
    pub(crate) fn run(self) -> RunId {
        match self {
            RunSignal::Sample { run } | RunSignal::Finished { run } => run,
        }
    }
}

/// A run in flight - existence proves the timer task was spawned.
///
/// Owns the receiving end of the run channel and the task handle, so
/// dropping this (on reset or completion) both aborts the task and makes
/// any already-queued signal unreachable.
#[derive(Debug)]
struct ActiveRun {
    id: RunId,
    signals: mpsc::UnboundedReceiver<RunSignal>,
    handle: JoinHandle<()>,
}

/// Lifecycle phase of the session.
///
/// ```text
/// Idle --start()--> Running --completion elapses--> Completed
///                      |                               |
///                   reset()                      reset() / start()
/// ```
#[derive(Debug)]
enum RunPhase {
    Idle,
    Running(ActiveRun),
    Completed,
}

// ============================================================================
// Session
// ============================================================================

/// One bound experiment session: a definition plus its live run state.
///
/// All operations are total: illegal transitions (start while running,
/// stepping past the last instruction, reset while idle) degrade to no-ops,
/// never errors.
#[derive(Debug)]
pub struct Session {
    definition: ExperimentDefinition,
    current_step: usize,
    phase: RunPhase,
    samples: Vec<Sample>,
    result_summary: Option<ResultsSummary>,
    runs_started: u64,
    timing: RunTiming,
    generator: Box<dyn SignalGenerator>,
    notices: NoticeQueue,
}

impl Session {
    /// Create a session with the production signal generator.
    #[must_use]
    pub fn new(definition: ExperimentDefinition, timing: RunTiming) -> Self {
        Self::with_generator(definition, timing, Box::new(NoisySine::new()))
    }

    /// Create a session with an injected signal generator.
    #[must_use]
    pub fn with_generator(
        definition: ExperimentDefinition,
        timing: RunTiming,
        generator: Box<dyn SignalGenerator>,
    ) -> Self {
        Self {
            definition,
            current_step: 0,
            phase: RunPhase::Idle,
            samples: Vec::new(),
            result_summary: None,
            runs_started: 0,
            timing,
            generator,
            notices: NoticeQueue::new(),
        }
    }

    #[must_use]
    pub fn definition(&self) -> &ExperimentDefinition {
        &self.definition
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        match self.phase {
            RunPhase::Idle => RunState::Idle,
            RunPhase::Running(_) => RunState::Running,
            RunPhase::Completed => RunState::Completed,
        }
    }

    /// Read-only view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            current_step: self.current_step,
            step_count: self.definition.step_count(),
            run_state: self.run_state(),
            samples: &self.samples,
            results: self.result_summary.as_ref(),
        }
    }

    /// Drain pending toast-style notices, in emission order.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    /// Begin a run. No-op while a run is already in flight.
    ///
    /// Clears samples and results from any prior run, then schedules the
    /// timed sampling protocol on a fresh run id.
    pub fn start(&mut self) {
        if matches!(self.phase, RunPhase::Running(_)) {
            tracing::debug!("start ignored: run already in flight");
            return;
        }

        self.samples.clear();
        self.result_summary = None;

        self.runs_started += 1;
        let id = RunId(self.runs_started);
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = spawn_run_timers(id, self.timing, sender);
        self.phase = RunPhase::Running(ActiveRun {
            id,
            signals: receiver,
            handle,
        });

        self.notices.push(Notice::RunStarted);
        tracing::info!(run = id.value(), "experiment run started");
    }

    /// Return to idle, discarding the current run.
    ///
    /// Cancellation is synchronous with the state change: the timer task is
    /// aborted and its channel dropped in the same call, and the retired run
    /// id makes any straggling signal inert.
    pub fn reset(&mut self) {
        if let RunPhase::Running(active) = std::mem::replace(&mut self.phase, RunPhase::Idle) {
            active.handle.abort();
            tracing::debug!(run = active.id.value(), "run cancelled by reset");
        }
        self.samples.clear();
        self.result_summary = None;
        self.notices.push(Notice::SessionReset);
    }

    /// Advance to the next instruction step, clamped to the last.
    pub fn step_forward(&mut self) {
        let last = self.definition.step_count() - 1;
        self.current_step = (self.current_step + 1).min(last);
    }

    /// Return to the previous instruction step, clamped to the first.
    pub fn step_back(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Signal export intent to the presentation layer.
    ///
    /// A stub by design: no report bytes are produced here, and results need
    /// not be present.
    pub fn download_report(&mut self) {
        self.notices.push(Notice::ReportDownloaded);
        tracing::info!(experiment = self.definition.title(), "report export requested");
    }

    /// Apply all timer signals that have arrived since the last poll.
    ///
    /// This is the only place run state advances; callers invoke it from
    /// their event loop. Completion is atomic from the caller's view: the
    /// transition to `Completed` and the results synthesis happen within a
    /// single call, before control returns.
    pub fn poll(&mut self) {
        loop {
            let signal = {
                let RunPhase::Running(active) = &mut self.phase else {
                    break;
                };
                match active.signals.try_recv() {
                    Ok(signal) => signal,
                    Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
                }
            };
            self.apply(signal);
        }
    }

    /// Apply one timer signal, discarding it if stale.
    fn apply(&mut self, signal: RunSignal) {
        let active_id = match &self.phase {
            RunPhase::Running(active) => active.id,
            RunPhase::Idle | RunPhase::Completed => {
                tracing::debug!(run = signal.run().value(), "signal ignored: no run in flight");
                return;
            }
        };
        if signal.run() != active_id {
            tracing::debug!(
                stale = signal.run().value(),
                current = active_id.value(),
                "stale run signal discarded"
            );
            return;
        }

        match signal {
            RunSignal::Sample { .. } => {
                let tick = self.samples.len() as u64;
                let value = self.generator.sample(tick);
                self.samples.push(Sample { tick, value });
            }
            RunSignal::Finished { .. } => {
                if let RunPhase::Running(active) =
                    std::mem::replace(&mut self.phase, RunPhase::Completed)
                {
                    active.handle.abort();
                }
                self.result_summary = Some(results::summarize(&self.samples));
                self.notices.push(Notice::RunCompleted);
                tracing::info!(
                    run = active_id.value(),
                    samples = self.samples.len(),
                    "experiment run completed"
                );
            }
        }
    }
}

/// Spawn the timer task for one run.
///
/// Composes the recurring sample timer with the one-shot completion timer.
/// The task never touches session state; it only sends tagged signals, and
/// it exits after sending `Finished` so no tick can follow completion.
fn spawn_run_timers(
    run: RunId,
    timing: RunTiming,
    signals: mpsc::UnboundedSender<RunSignal>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = time::interval(timing.sample_period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // An interval yields immediately; the first sample is due one full
        // period after start.
        ticks.tick().await;

        let finish = time::sleep(timing.run_duration);
        tokio::pin!(finish);

        loop {
            tokio::select! {
                // The sample due at the completion instant lands before the
                // run finishes.
                biased;
                _ = ticks.tick() => {
                    if signals.send(RunSignal::Sample { run }).is_err() {
                        break;
                    }
                }
                () = &mut finish => {
                    let _ = signals.send(RunSignal::Finished { run });
                    break;
                }
            }
        }
    })
}
