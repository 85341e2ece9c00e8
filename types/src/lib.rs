//! Core domain types for Virtlab.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod experiment;
mod ids;
mod session;

pub use experiment::{
    Difficulty, EmptyStepsError, ExperimentDefinition, ExperimentSummary, SimulationKind,
    SubjectInfo,
};
pub use ids::{ExperimentId, SubjectId};
pub use session::{ResultsSummary, RunState, Sample, SessionSnapshot};

use thiserror::Error;

/// Failure to resolve an experiment in the catalog.
///
/// This is the only hard failure in the system: every session-level
/// operation is total, but a session can never be bound to an experiment
/// the catalog does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("no experiment `{experiment}` in subject `{subject}`")]
    NotFound {
        subject: SubjectId,
        experiment: ExperimentId,
    },
}
