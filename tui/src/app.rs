//! Presentation-side application state: which page is showing and the
//! session bound to the experiment page, if any.

use virtlab_catalog::{Catalog, StaticCatalog};
use virtlab_engine::{NoticeLevel, RunTiming, Session, UiConfig};
use virtlab_types::{ExperimentId, SubjectId};

/// Sidebar tab on the experiment page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SidebarTab {
    Instructions,
    Theory,
    Results,
}

impl SidebarTab {
    pub(crate) fn index(self) -> usize {
        match self {
            SidebarTab::Instructions => 0,
            SidebarTab::Theory => 1,
            SidebarTab::Results => 2,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            SidebarTab::Instructions => SidebarTab::Theory,
            SidebarTab::Theory => SidebarTab::Results,
            SidebarTab::Results => SidebarTab::Instructions,
        }
    }
}

/// The experiment page: a bound session plus its sidebar tab.
#[derive(Debug)]
pub(crate) struct ExperimentPage {
    pub(crate) subject: SubjectId,
    pub(crate) session: Session,
    pub(crate) tab: SidebarTab,
}

/// Which page is showing. The session lives only inside the experiment
/// route; navigating away discards it.
#[derive(Debug)]
pub(crate) enum Route {
    Index { selected: usize },
    Lab { subject: SubjectId, selected: usize },
    Experiment(ExperimentPage),
    NotFound { subject: SubjectId, experiment: ExperimentId },
}

/// Status line fed from drained session notices.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StatusLine {
    pub(crate) message: &'static str,
    pub(crate) level: NoticeLevel,
}

/// Top-level presentation state.
pub struct LabApp {
    pub(crate) catalog: StaticCatalog,
    pub(crate) route: Route,
    pub(crate) status: Option<StatusLine>,
    pub(crate) ui: UiConfig,
    timing: RunTiming,
    should_quit: bool,
}

impl LabApp {
    #[must_use]
    pub fn new(catalog: StaticCatalog, timing: RunTiming, ui: UiConfig) -> Self {
        Self {
            catalog,
            route: Route::Index { selected: 0 },
            status: None,
            ui,
            timing,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance one frame: apply pending run signals and surface notices.
    pub fn tick(&mut self) {
        if let Route::Experiment(page) = &mut self.route {
            page.session.poll();
            for notice in page.session.take_notices() {
                self.status = Some(StatusLine {
                    message: notice.message(),
                    level: notice.level(),
                });
            }
        }
    }

    pub(crate) fn open_lab(&mut self, subject: SubjectId) {
        self.status = None;
        self.route = Route::Lab {
            subject,
            selected: 0,
        };
    }

    /// Resolve an experiment and bind a session, or dead-end in NotFound.
    pub(crate) fn open_experiment(&mut self, subject: SubjectId, experiment: ExperimentId) {
        self.status = None;
        match self.catalog.resolve(&subject, &experiment) {
            Ok(definition) => {
                let session = Session::new(definition.clone(), self.timing);
                self.route = Route::Experiment(ExperimentPage {
                    subject,
                    session,
                    tab: SidebarTab::Instructions,
                });
            }
            Err(err) => {
                tracing::warn!(%err, "experiment lookup failed");
                self.route = Route::NotFound {
                    subject,
                    experiment,
                };
            }
        }
    }
}
