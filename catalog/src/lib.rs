//! The experiment catalog: an immutable mapping from (subject, experiment)
//! to runnable definitions, plus the browse metadata for the lab pages.
//!
//! The catalog is an injected read-only data source. The session controller
//! never touches it; the caller resolves a definition here and hands it over,
//! which keeps the state machine testable against synthetic definitions.

mod data;

use std::collections::HashMap;

use virtlab_types::{
    CatalogError, ExperimentDefinition, ExperimentId, ExperimentSummary, SubjectId, SubjectInfo,
};

/// Read-only source of experiment data.
pub trait Catalog {
    /// Subject cards for the lab index page.
    fn subjects(&self) -> &[SubjectInfo];

    /// Experiment cards for one subject's page. Unknown subjects list nothing.
    fn experiments(&self, subject: &SubjectId) -> &[ExperimentSummary];

    /// Resolve a runnable definition, if one exists.
    fn lookup(
        &self,
        subject: &SubjectId,
        experiment: &ExperimentId,
    ) -> Option<&ExperimentDefinition>;

    /// Like [`Catalog::lookup`], but surfaces the not-found condition as the
    /// typed dead-end error the presentation reports.
    fn resolve(
        &self,
        subject: &SubjectId,
        experiment: &ExperimentId,
    ) -> Result<&ExperimentDefinition, CatalogError> {
        self.lookup(subject, experiment)
            .ok_or_else(|| CatalogError::NotFound {
                subject: subject.clone(),
                experiment: experiment.clone(),
            })
    }
}

/// The built-in catalog, constructed once at startup from static data.
#[derive(Debug)]
pub struct StaticCatalog {
    definitions: HashMap<(SubjectId, ExperimentId), ExperimentDefinition>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: data::definitions(),
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for StaticCatalog {
    fn subjects(&self) -> &[SubjectInfo] {
        data::SUBJECTS
    }

    fn experiments(&self, subject: &SubjectId) -> &[ExperimentSummary] {
        match subject.as_str() {
            "physics" => data::PHYSICS_EXPERIMENTS,
            "chemistry" => data::CHEMISTRY_EXPERIMENTS,
            "biology" => data::BIOLOGY_EXPERIMENTS,
            _ => &[],
        }
    }

    fn lookup(
        &self,
        subject: &SubjectId,
        experiment: &ExperimentId,
    ) -> Option<&ExperimentDefinition> {
        self.definitions
            .get(&(subject.clone(), experiment.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_pendulum() {
        let catalog = StaticCatalog::new();
        let def = catalog
            .lookup(&SubjectId::new("physics"), &ExperimentId::new("pendulum"))
            .expect("pendulum is a built-in");
        assert_eq!(def.title(), "Simple Pendulum");
        assert_eq!(def.step_count(), 6);
    }

    #[test]
    fn lookup_misses_unknown_experiment() {
        let catalog = StaticCatalog::new();
        let subject = SubjectId::new("physics");
        let experiment = ExperimentId::new("not-a-real-id");
        assert!(catalog.lookup(&subject, &experiment).is_none());
        assert_eq!(
            catalog.resolve(&subject, &experiment),
            Err(CatalogError::NotFound {
                subject,
                experiment
            })
        );
    }

    #[test]
    fn listed_card_without_definition_is_not_runnable() {
        // The physics page advertises Wave Interference, but no definition
        // backs it; opening it must dead-end in NotFound.
        let catalog = StaticCatalog::new();
        let subject = SubjectId::new("physics");
        assert!(
            catalog
                .experiments(&subject)
                .iter()
                .any(|summary| summary.id == "waves")
        );
        assert!(
            catalog
                .lookup(&subject, &ExperimentId::new("waves"))
                .is_none()
        );
    }

    #[test]
    fn subject_pages_list_their_cards() {
        let catalog = StaticCatalog::new();
        assert_eq!(catalog.subjects().len(), 3);
        assert_eq!(catalog.experiments(&SubjectId::new("physics")).len(), 4);
        assert_eq!(catalog.experiments(&SubjectId::new("chemistry")).len(), 4);
        assert_eq!(catalog.experiments(&SubjectId::new("biology")).len(), 4);
        assert!(catalog.experiments(&SubjectId::new("geology")).is_empty());
    }

    #[test]
    fn every_definition_belongs_to_a_listed_card() {
        let catalog = StaticCatalog::new();
        for (subject, experiment) in catalog.definitions.keys() {
            assert!(
                catalog
                    .experiments(subject)
                    .iter()
                    .any(|summary| summary.id == experiment.as_str()),
                "definition {subject}/{experiment} has no card"
            );
        }
    }
}
