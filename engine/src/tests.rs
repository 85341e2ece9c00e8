//! Unit tests for the session controller.
//!
//! Timer-driven behavior runs on tokio's paused clock, so a "run" elapses
//! instantly and deterministically.

use std::time::Duration;

use tokio::time;

use virtlab_types::{ExperimentDefinition, RunState, SimulationKind};

use super::*;

/// Deterministic generator: value = tick · 10.
#[derive(Debug)]
struct TickTimesTen;

impl SignalGenerator for TickTimesTen {
    fn sample(&mut self, tick: u64) -> f64 {
        (tick * 10) as f64
    }
}

fn pendulum_definition() -> ExperimentDefinition {
    ExperimentDefinition::new(
        "Simple Pendulum",
        vec![
            "Set up the pendulum with desired length".to_owned(),
            "Choose initial angle (10-30 degrees)".to_owned(),
            "Release the pendulum and start timing".to_owned(),
            "Record 10 complete oscillations".to_owned(),
            "Calculate the period and frequency".to_owned(),
            "Analyze results and compare with theory".to_owned(),
        ],
        "T = 2π√(L/g)",
        SimulationKind::Pendulum,
    )
    .expect("six steps")
}

fn test_session() -> Session {
    Session::with_generator(
        pendulum_definition(),
        RunTiming::default(),
        Box::new(TickTimesTen),
    )
}

/// Let virtual time elapse, then apply whatever the timers delivered.
async fn drive(session: &mut Session, duration: Duration) {
    time::sleep(duration).await;
    session.poll();
}

fn active_run_id(session: &Session) -> RunId {
    match &session.phase {
        RunPhase::Running(active) => active.id,
        RunPhase::Idle | RunPhase::Completed => panic!("expected a run in flight"),
    }
}

#[track_caller]
fn assert_results_invariant(session: &Session) {
    let snapshot = session.snapshot();
    assert_eq!(
        snapshot.results.is_some(),
        snapshot.run_state == RunState::Completed,
        "results must be present iff the run is completed"
    );
    assert!(snapshot.current_step < snapshot.step_count);
    if snapshot.run_state == RunState::Idle {
        assert!(snapshot.samples.is_empty());
    }
}

// ============================================================================
// Step navigation
// ============================================================================

#[test]
fn step_navigation_clamps_to_bounds() {
    let mut session = test_session();
    let last = session.definition().step_count() - 1;

    for _ in 0..20 {
        session.step_forward();
        assert!(session.snapshot().current_step <= last);
    }
    assert_eq!(session.snapshot().current_step, last);

    for _ in 0..20 {
        session.step_back();
    }
    assert_eq!(session.snapshot().current_step, 0);
}

#[test]
fn navigation_is_independent_of_run_state() {
    let mut session = test_session();
    session.step_forward();
    session.step_forward();
    assert_eq!(session.run_state(), RunState::Idle);
    assert_eq!(session.snapshot().current_step, 2);
}

// ============================================================================
// Timed sampling protocol
// ============================================================================

#[tokio::test(start_paused = true)]
async fn full_run_matches_reference_timing() {
    let mut session = test_session();
    assert_eq!(session.definition().title(), "Simple Pendulum");
    assert_eq!(session.definition().step_count(), 6);

    session.start();
    assert_eq!(session.run_state(), RunState::Running);

    drive(&mut session, Duration::from_millis(8500)).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.run_state, RunState::Completed);
    assert_eq!(snapshot.samples.len(), 8);
    assert!(snapshot.samples.iter().all(|sample| sample.tick < 8));
    let results = snapshot.results.expect("completed run has results");
    assert!(!results.observations.is_empty());

    // Ticks are appended in order with generator-supplied values.
    for (index, sample) in snapshot.samples.iter().enumerate() {
        assert_eq!(sample.tick, index as u64);
        assert!((sample.value - (index as f64) * 10.0).abs() < f64::EPSILON);
    }
}

#[tokio::test(start_paused = true)]
async fn no_tick_lands_after_completion() {
    let mut session = test_session();
    session.start();
    drive(&mut session, Duration::from_millis(8500)).await;
    assert_eq!(session.run_state(), RunState::Completed);

    drive(&mut session, Duration::from_secs(5)).await;
    assert_eq!(session.snapshot().samples.len(), 8);
    assert_eq!(session.run_state(), RunState::Completed);
}

#[tokio::test(start_paused = true)]
async fn completion_is_atomic_with_results() {
    let mut session = test_session();
    session.start();
    time::sleep(Duration::from_millis(8500)).await;

    // All signals, including completion, are queued; a single poll applies
    // them, so no intermediate state is observable across the boundary.
    session.poll();
    assert_eq!(session.run_state(), RunState::Completed);
    assert!(session.snapshot().results.is_some());
}

#[tokio::test(start_paused = true)]
async fn double_start_runs_once() {
    let mut session = test_session();
    session.start();
    let first = active_run_id(&session);
    session.start();
    assert_eq!(active_run_id(&session), first, "second start is a no-op");

    drive(&mut session, Duration::from_millis(8500)).await;
    assert_eq!(session.snapshot().samples.len(), 8);
    assert_eq!(session.run_state(), RunState::Completed);
}

#[tokio::test(start_paused = true)]
async fn custom_timing_scales_the_sample_count() {
    let timing = RunTiming {
        sample_period: Duration::from_millis(500),
        run_duration: Duration::from_millis(2000),
    };
    let mut session =
        Session::with_generator(pendulum_definition(), timing, Box::new(TickTimesTen));

    session.start();
    drive(&mut session, Duration::from_millis(2300)).await;

    assert_eq!(session.snapshot().samples.len(), timing.expected_samples());
    assert_eq!(session.snapshot().samples.len(), 4);
    assert_eq!(session.run_state(), RunState::Completed);
}

#[test]
fn expected_samples_floors_the_ratio() {
    let timing = RunTiming {
        sample_period: Duration::from_secs(3),
        run_duration: Duration::from_secs(8),
    };
    assert_eq!(timing.expected_samples(), 2);
    assert_eq!(RunTiming::default().expected_samples(), 8);
}

// ============================================================================
// Reset and cancellation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn reset_cancels_pending_timers() {
    let mut session = test_session();
    session.start();
    drive(&mut session, Duration::from_millis(3500)).await;
    assert_eq!(session.snapshot().samples.len(), 3);

    session.reset();
    assert_eq!(session.run_state(), RunState::Idle);
    assert!(session.snapshot().samples.is_empty());
    assert!(session.snapshot().results.is_none());

    // Let the original run's timers come due; nothing may land.
    drive(&mut session, Duration::from_secs(10)).await;
    assert_eq!(session.run_state(), RunState::Idle);
    assert!(session.snapshot().samples.is_empty());
}

#[tokio::test(start_paused = true)]
async fn reset_preserves_the_current_step() {
    let mut session = test_session();
    session.step_forward();
    session.step_forward();
    session.start();
    session.reset();
    assert_eq!(session.snapshot().current_step, 2);
}

#[test]
fn reset_while_idle_is_a_noop() {
    let mut session = test_session();
    session.reset();
    assert_eq!(session.run_state(), RunState::Idle);
    assert!(session.snapshot().samples.is_empty());
}

#[tokio::test(start_paused = true)]
async fn stale_signal_is_inert() {
    let mut session = test_session();
    session.start();
    let stale = active_run_id(&session);
    session.reset();

    // A callback from the cancelled run firing late must not resurrect state.
    session.apply(RunSignal::Sample { run: stale });
    assert_eq!(session.run_state(), RunState::Idle);
    assert!(session.snapshot().samples.is_empty());

    session.start();
    let fresh = active_run_id(&session);
    assert_ne!(fresh, stale);
    session.apply(RunSignal::Sample { run: stale });
    assert!(session.snapshot().samples.is_empty());
    session.apply(RunSignal::Finished { run: stale });
    assert_eq!(session.run_state(), RunState::Running);
    assert!(session.snapshot().results.is_none());
}

// ============================================================================
// Re-run and invariants
// ============================================================================

#[tokio::test(start_paused = true)]
async fn rerun_clears_the_previous_run() {
    let mut session = test_session();
    session.start();
    drive(&mut session, Duration::from_millis(8500)).await;
    assert_eq!(session.run_state(), RunState::Completed);

    session.start();
    assert_eq!(session.run_state(), RunState::Running);
    assert!(session.snapshot().samples.is_empty());
    assert!(session.snapshot().results.is_none());

    drive(&mut session, Duration::from_millis(8500)).await;
    assert_eq!(session.snapshot().samples.len(), 8);
    assert_eq!(session.run_state(), RunState::Completed);
}

#[tokio::test(start_paused = true)]
async fn results_present_iff_completed_across_transitions() {
    let mut session = test_session();
    assert_results_invariant(&session);

    session.step_forward();
    assert_results_invariant(&session);

    session.start();
    assert_results_invariant(&session);

    drive(&mut session, Duration::from_millis(2500)).await;
    assert_results_invariant(&session);

    session.reset();
    assert_results_invariant(&session);

    session.start();
    drive(&mut session, Duration::from_millis(8500)).await;
    assert_eq!(session.run_state(), RunState::Completed);
    assert_results_invariant(&session);

    session.download_report();
    assert_results_invariant(&session);

    session.start();
    assert_results_invariant(&session);

    session.reset();
    assert_results_invariant(&session);
}

// ============================================================================
// Notices
// ============================================================================

#[tokio::test(start_paused = true)]
async fn notices_track_the_lifecycle() {
    let mut session = test_session();

    session.start();
    assert_eq!(session.take_notices(), vec![Notice::RunStarted]);

    drive(&mut session, Duration::from_millis(8500)).await;
    assert_eq!(session.take_notices(), vec![Notice::RunCompleted]);

    session.download_report();
    assert_eq!(session.take_notices(), vec![Notice::ReportDownloaded]);

    session.reset();
    assert_eq!(session.take_notices(), vec![Notice::SessionReset]);
    assert!(session.take_notices().is_empty());
}
