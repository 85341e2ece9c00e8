//! Experiment catalog types: definitions a session runs against, plus the
//! browse-level metadata shown on the subject pages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tag selecting which simulation placeholder the presentation renders.
///
/// The controller never interprets this; it only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationKind {
    Pendulum,
    Circuit,
    Titration,
    Microscope,
}

impl SimulationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SimulationKind::Pendulum => "pendulum",
            SimulationKind::Circuit => "circuit",
            SimulationKind::Titration => "titration",
            SimulationKind::Microscope => "microscope",
        }
    }
}

/// Difficulty badge shown on experiment cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("an experiment must have at least one step")]
pub struct EmptyStepsError;

/// A runnable experiment as the catalog supplies it.
///
/// Immutable once constructed; the steps sequence is guaranteed non-empty,
/// so step navigation always has a valid index range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDefinition")]
pub struct ExperimentDefinition {
    title: String,
    steps: Vec<String>,
    theory: String,
    simulation: SimulationKind,
}

/// Unvalidated mirror used as the serde entry point.
#[derive(Deserialize)]
struct RawDefinition {
    title: String,
    steps: Vec<String>,
    theory: String,
    simulation: SimulationKind,
}

impl TryFrom<RawDefinition> for ExperimentDefinition {
    type Error = EmptyStepsError;

    fn try_from(raw: RawDefinition) -> Result<Self, Self::Error> {
        Self::new(raw.title, raw.steps, raw.theory, raw.simulation)
    }
}

impl ExperimentDefinition {
    pub fn new(
        title: impl Into<String>,
        steps: Vec<String>,
        theory: impl Into<String>,
        simulation: SimulationKind,
    ) -> Result<Self, EmptyStepsError> {
        if steps.is_empty() {
            return Err(EmptyStepsError);
        }
        Ok(Self {
            title: title.into(),
            steps,
            theory: theory.into(),
            simulation,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Number of steps; always at least one.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn theory(&self) -> &str {
        &self.theory
    }

    #[must_use]
    pub fn simulation(&self) -> SimulationKind {
        self.simulation
    }
}

/// One card on a subject's experiment list.
///
/// Listing an experiment does not imply a runnable definition exists for it;
/// catalog lookup stays the source of truth for runnability.
#[derive(Debug, Clone, Copy)]
pub struct ExperimentSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub difficulty: Difficulty,
    pub objectives: &'static [&'static str],
    pub tools: &'static [&'static str],
}

/// One card on the lab index page.
#[derive(Debug, Clone, Copy)]
pub struct SubjectInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Advertised experiment count on the index card.
    pub experiments: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> ExperimentDefinition {
        ExperimentDefinition::new(
            "Simple Pendulum",
            vec!["Set up the pendulum".to_owned(), "Release it".to_owned()],
            "T = 2π√(L/g)",
            SimulationKind::Pendulum,
        )
        .expect("two steps")
    }

    #[test]
    fn definition_rejects_empty_steps() {
        let err = ExperimentDefinition::new("Empty", vec![], "", SimulationKind::Circuit);
        assert_eq!(err, Err(EmptyStepsError));
    }

    #[test]
    fn definition_exposes_fields() {
        let def = definition();
        assert_eq!(def.title(), "Simple Pendulum");
        assert_eq!(def.step_count(), 2);
        assert_eq!(def.simulation(), SimulationKind::Pendulum);
    }

    #[test]
    fn definition_serde_rejects_empty_steps() {
        let json = r#"{"title":"x","steps":[],"theory":"","simulation":"pendulum"}"#;
        let parsed: Result<ExperimentDefinition, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn definition_serde_roundtrip() {
        let def = definition();
        let json = serde_json::to_string(&def).expect("serialize");
        let restored: ExperimentDefinition = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, def);
    }
}
