//! Key-to-command mapping for the lab pages.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use virtlab_catalog::Catalog;
use virtlab_engine::Command;
use virtlab_types::{ExperimentId, SubjectId};

use crate::app::{LabApp, Route, SidebarTab};

/// Apply one key event to the application state.
pub fn handle_key(app: &mut LabApp, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    match &mut app.route {
        Route::Index { selected } => {
            let count = app.catalog.subjects().len();
            match key.code {
                KeyCode::Char('q') => app.request_quit(),
                KeyCode::Up | KeyCode::Char('k') => {
                    *selected = selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *selected = (*selected + 1).min(count.saturating_sub(1));
                }
                KeyCode::Enter => {
                    if let Some(info) = app.catalog.subjects().get(*selected) {
                        let subject = SubjectId::new(info.id);
                        app.open_lab(subject);
                    }
                }
                _ => {}
            }
        }
        Route::Lab { subject, selected } => {
            let experiments = app.catalog.experiments(subject);
            match key.code {
                KeyCode::Char('q') => app.request_quit(),
                KeyCode::Esc | KeyCode::Backspace => {
                    app.status = None;
                    app.route = Route::Index { selected: 0 };
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    *selected = selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *selected = (*selected + 1).min(experiments.len().saturating_sub(1));
                }
                KeyCode::Enter => {
                    if let Some(summary) = experiments.get(*selected) {
                        let subject = subject.clone();
                        let experiment = ExperimentId::new(summary.id);
                        app.open_experiment(subject, experiment);
                    }
                }
                _ => {}
            }
        }
        Route::Experiment(page) => match key.code {
            KeyCode::Char('q') => app.request_quit(),
            KeyCode::Esc | KeyCode::Backspace => {
                let subject = page.subject.clone();
                app.open_lab(subject);
            }
            KeyCode::Char('s') => page.session.handle(Command::Start),
            KeyCode::Char('r') => page.session.handle(Command::Reset),
            KeyCode::Char('n') | KeyCode::Right => page.session.handle(Command::StepForward),
            KeyCode::Char('p') | KeyCode::Left => page.session.handle(Command::StepBack),
            KeyCode::Char('d') => page.session.handle(Command::DownloadReport),
            KeyCode::Tab => page.tab = page.tab.next(),
            KeyCode::Char('1') => page.tab = SidebarTab::Instructions,
            KeyCode::Char('2') => page.tab = SidebarTab::Theory,
            KeyCode::Char('3') => page.tab = SidebarTab::Results,
            _ => {}
        },
        Route::NotFound { subject, .. } => match key.code {
            KeyCode::Char('q') => app.request_quit(),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter => {
                let subject = subject.clone();
                app.open_lab(subject);
            }
            _ => {}
        },
    }
}
