//! TUI rendering for Virtlab using ratatui.
//!
//! This crate is the presentation collaborator: it renders whatever the
//! session controller exposes and maps key presses to session commands. It
//! owns no run state beyond which page is showing.

mod app;
mod input;
mod theme;

pub use app::LabApp;
pub use input::handle_key;
pub use theme::{Glyphs, Palette, glyphs, palette};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Sparkline, Tabs, Wrap},
};

use virtlab_catalog::Catalog;
use virtlab_engine::NoticeLevel;
use virtlab_types::{RunState, SessionSnapshot, SimulationKind, SubjectId};

use crate::app::{ExperimentPage, Route, SidebarTab, StatusLine};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &LabApp) {
    let palette = theme::palette(app.ui);
    let glyphs = theme::glyphs(app.ui);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let hints = match &app.route {
        Route::Index { .. } => "j/k select · Enter open · q quit",
        Route::Lab { .. } => "j/k select · Enter open · Esc back · q quit",
        Route::Experiment(_) => "s start · r reset · p/n step · Tab tabs · d report · Esc back",
        Route::NotFound { .. } => "Esc back · q quit",
    };

    match &app.route {
        Route::Index { selected } => {
            draw_header(
                frame,
                chunks[0],
                &palette,
                palette.accent,
                "Virtual Science Labs",
                "Interactive experiments in Physics, Chemistry, and Biology",
            );
            draw_index(frame, chunks[1], app, &palette, &glyphs, *selected);
        }
        Route::Lab { subject, selected } => {
            let accent = palette.subject(subject.as_str());
            let info = app
                .catalog
                .subjects()
                .iter()
                .find(|info| info.id == subject.as_str());
            let title = info.map_or_else(|| subject.to_string(), |info| info.title.to_owned());
            let subtitle = info.map_or("", |info| info.description);
            draw_header(frame, chunks[0], &palette, accent, &title, subtitle);
            draw_lab(frame, chunks[1], app, &palette, &glyphs, subject, *selected);
        }
        Route::Experiment(page) => {
            let accent = palette.subject(page.subject.as_str());
            draw_header(
                frame,
                chunks[0],
                &palette,
                accent,
                page.session.definition().title(),
                "Interactive Experiment",
            );
            draw_experiment(frame, chunks[1], &palette, &glyphs, page, accent);
        }
        Route::NotFound {
            subject,
            experiment,
        } => {
            draw_header(
                frame,
                chunks[0],
                &palette,
                palette.error,
                "Experiment Not Found",
                "",
            );
            draw_not_found(frame, chunks[1], &palette, subject.as_str(), experiment.as_str());
        }
    }

    draw_status_bar(frame, chunks[2], &palette, app.status.as_ref(), hints);
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    accent: ratatui::style::Color,
    title: &str,
    subtitle: &str,
) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.border));
    let mut line = vec![Span::styled(
        title.to_owned(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )];
    if !subtitle.is_empty() {
        line.push(Span::raw("  "));
        line.push(Span::styled(
            subtitle.to_owned(),
            Style::default().fg(palette.text_muted),
        ));
    }
    let header = Paragraph::new(Line::from(line)).block(block);
    frame.render_widget(header, area);
}

fn draw_index(
    frame: &mut Frame,
    area: Rect,
    app: &LabApp,
    palette: &Palette,
    glyphs: &Glyphs,
    selected: usize,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let items: Vec<ListItem> = app
        .catalog
        .subjects()
        .iter()
        .map(|info| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    info.title,
                    Style::default()
                        .fg(palette.subject(info.id))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} experiments available", info.experiments),
                    Style::default().fg(palette.text_muted),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(bordered(palette, "Choose Your Lab"))
        .highlight_style(Style::default().bg(palette.panel))
        .highlight_symbol(glyphs.pointer);
    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, columns[0], &mut state);

    let detail: Vec<Line> = app.catalog.subjects().get(selected).map_or_else(
        Vec::new,
        |info| {
            vec![
                Line::from(Span::styled(
                    info.title,
                    Style::default()
                        .fg(palette.subject(info.id))
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    info.description,
                    Style::default().fg(palette.text),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Conduct experiments without any safety risks or material costs.",
                    Style::default().fg(palette.text_muted),
                )),
            ]
        },
    );
    let about = Paragraph::new(detail)
        .block(bordered(palette, "About"))
        .wrap(Wrap { trim: true });
    frame.render_widget(about, columns[1]);
}

fn draw_lab(
    frame: &mut Frame,
    area: Rect,
    app: &LabApp,
    palette: &Palette,
    glyphs: &Glyphs,
    subject: &SubjectId,
    selected: usize,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let experiments = app.catalog.experiments(subject);

    let items: Vec<ListItem> = experiments
        .iter()
        .map(|summary| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        summary.title,
                        Style::default()
                            .fg(palette.text)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        summary.difficulty.as_str(),
                        Style::default().fg(palette.difficulty(summary.difficulty)),
                    ),
                    Span::styled(
                        format!("  {}", summary.duration),
                        Style::default().fg(palette.text_muted),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", summary.description),
                    Style::default().fg(palette.text_muted),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(bordered(palette, "Available Experiments"))
        .highlight_style(Style::default().bg(palette.panel))
        .highlight_symbol(glyphs.pointer);
    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, columns[0], &mut state);

    let detail: Vec<Line> = experiments.get(selected).map_or_else(Vec::new, |summary| {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    summary.difficulty.as_str(),
                    Style::default()
                        .fg(palette.difficulty(summary.difficulty))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", summary.duration),
                    Style::default().fg(palette.text_muted),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Learning Objectives",
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        for objective in summary.objectives {
            lines.push(Line::from(Span::styled(
                format!("{} {objective}", glyphs.bullet),
                Style::default().fg(palette.text),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Virtual Tools",
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )));
        for tool in summary.tools {
            lines.push(Line::from(Span::styled(
                format!("{} {tool}", glyphs.bullet),
                Style::default().fg(palette.text_muted),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter to start this experiment",
            Style::default().fg(palette.accent),
        )));
        lines
    });
    let panel = Paragraph::new(detail)
        .block(bordered(palette, "Details"))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, columns[1]);
}

fn draw_experiment(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
    page: &ExperimentPage,
    accent: ratatui::style::Color,
) {
    let snapshot = page.session.snapshot();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress
            Constraint::Length(6), // Simulation
            Constraint::Min(4),    // Data
        ])
        .split(columns[0]);

    let progress = Gauge::default()
        .block(bordered(palette, "Experiment Progress"))
        .gauge_style(Style::default().fg(accent))
        .ratio((snapshot.progress_percent() / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "Step {} of {}",
            snapshot.current_step + 1,
            snapshot.step_count
        ));
    frame.render_widget(progress, main[0]);

    draw_simulation(frame, main[1], palette, &snapshot, page, accent);
    draw_data(frame, main[2], palette, &snapshot);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(columns[1]);

    let tabs = Tabs::new(vec!["Instructions", "Theory", "Results"])
        .select(page.tab.index())
        .style(Style::default().fg(palette.text_muted))
        .highlight_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .divider("│");
    frame.render_widget(tabs, sidebar[0]);

    match page.tab {
        SidebarTab::Instructions => {
            draw_instructions(frame, sidebar[1], palette, glyphs, &snapshot, page, accent);
        }
        SidebarTab::Theory => {
            let theory = Paragraph::new(page.session.definition().theory().to_owned())
                .style(Style::default().fg(palette.text))
                .block(bordered(palette, "Theoretical Background"))
                .wrap(Wrap { trim: true });
            frame.render_widget(theory, sidebar[1]);
        }
        SidebarTab::Results => draw_results(frame, sidebar[1], palette, glyphs, &snapshot),
    }
}

fn draw_simulation(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    snapshot: &SessionSnapshot<'_>,
    page: &ExperimentPage,
    accent: ratatui::style::Color,
) {
    let kind = page.session.definition().simulation();
    let caption = if snapshot.run_state.is_running() {
        "Experiment in progress..."
    } else {
        "Ready to start"
    };
    let state_span = match snapshot.run_state {
        RunState::Idle => Span::styled("idle", Style::default().fg(palette.text_muted)),
        RunState::Running => Span::styled("running", Style::default().fg(palette.warning)),
        RunState::Completed => Span::styled("completed", Style::default().fg(palette.success)),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(caption, Style::default().fg(palette.text)),
        Span::raw("  ["),
        state_span,
        Span::raw("]"),
    ])];
    for art in simulation_art(kind) {
        lines.push(Line::from(Span::styled(
            art,
            Style::default().fg(accent),
        )));
    }

    let simulation = Paragraph::new(lines).block(bordered(palette, "Virtual Simulation"));
    frame.render_widget(simulation, area);
}

fn simulation_art(kind: SimulationKind) -> [&'static str; 2] {
    match kind {
        SimulationKind::Pendulum => ["        │", "        ●"],
        SimulationKind::Circuit => ["  ──[R]──(A)──", "  ─────V──────"],
        SimulationKind::Titration => ["    ╷▒╷", "    └─┘"],
        SimulationKind::Microscope => ["    (◎)", "    /▔\\"],
    }
}

fn draw_data(frame: &mut Frame, area: Rect, palette: &Palette, snapshot: &SessionSnapshot<'_>) {
    if snapshot.samples.is_empty() {
        let hint = Paragraph::new("No data yet - press s to start the experiment")
            .style(Style::default().fg(palette.text_muted))
            .block(bordered(palette, "Real-time Data"));
        frame.render_widget(hint, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    // Values sit in [-20, 120]; clamp the negative tail for the bar heights.
    let points: Vec<u64> = snapshot
        .samples
        .iter()
        .map(|sample| sample.value.max(0.0).round() as u64)
        .collect();
    let sparkline = Sparkline::default()
        .block(bordered(palette, "Real-time Data"))
        .style(Style::default().fg(palette.accent))
        .data(points.iter().copied())
        .max(120);
    frame.render_widget(sparkline, rows[0]);

    let caption = Paragraph::new(format!("Data points collected: {}", snapshot.samples.len()))
        .style(Style::default().fg(palette.text_muted));
    frame.render_widget(caption, rows[1]);
}

fn draw_instructions(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
    snapshot: &SessionSnapshot<'_>,
    page: &ExperimentPage,
    accent: ratatui::style::Color,
) {
    let mut lines = Vec::new();
    for (index, step) in page.session.definition().steps().iter().enumerate() {
        let (marker, style) = if index == snapshot.current_step {
            (
                glyphs.pointer,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )
        } else if index < snapshot.current_step {
            (glyphs.step_done, Style::default().fg(palette.success))
        } else {
            (" ", Style::default().fg(palette.text_muted))
        };
        lines.push(Line::from(Span::styled(
            format!("{marker} {}. {step}", index + 1),
            style,
        )));
    }

    let guide = Paragraph::new(lines)
        .block(bordered(palette, "Step-by-Step Guide"))
        .wrap(Wrap { trim: false });
    frame.render_widget(guide, area);
}

fn draw_results(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
    snapshot: &SessionSnapshot<'_>,
) {
    let Some(results) = snapshot.results else {
        let placeholder = Paragraph::new("Complete the experiment to view results")
            .style(Style::default().fg(palette.text_muted))
            .block(bordered(palette, "Experiment Results"))
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, area);
        return;
    };

    let heading = Style::default()
        .fg(palette.text)
        .add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled("Conclusion", heading)),
        Line::from(Span::styled(
            results.conclusion.clone(),
            Style::default().fg(palette.text),
        )),
        Line::from(""),
        Line::from(Span::styled("Observations", heading)),
    ];
    for observation in &results.observations {
        lines.push(Line::from(Span::styled(
            format!("{} {observation}", glyphs.bullet),
            Style::default().fg(palette.success),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Calculations", heading)));
    lines.push(Line::from(Span::styled(
        results.calculations.clone(),
        Style::default().fg(palette.accent),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press d to download the lab report",
        Style::default().fg(palette.text_muted),
    )));

    let panel = Paragraph::new(lines)
        .block(bordered(palette, "Experiment Results"))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn draw_not_found(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    subject: &str,
    experiment: &str,
) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Experiment Not Found",
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("No experiment `{experiment}` exists in subject `{subject}`."),
            Style::default().fg(palette.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to return to the lab",
            Style::default().fg(palette.text_muted),
        )),
    ];
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(bordered(palette, ""));
    frame.render_widget(panel, area);
}

fn draw_status_bar(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    status: Option<&StatusLine>,
    hints: &str,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    if let Some(status) = status {
        let color = match status.level {
            NoticeLevel::Info => palette.text_muted,
            NoticeLevel::Success => palette.success,
        };
        let message = Paragraph::new(status.message).style(Style::default().fg(color));
        frame.render_widget(message, columns[0]);
    }

    let hints = Paragraph::new(hints)
        .style(Style::default().fg(palette.text_muted))
        .alignment(Alignment::Right);
    frame.render_widget(hints, columns[1]);
}

fn bordered<'a>(palette: &Palette, title: &'a str) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    if title.is_empty() {
        block
    } else {
        block.title(Span::styled(
            title,
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use virtlab_catalog::StaticCatalog;
    use virtlab_engine::{RunTiming, UiConfig};

    use super::*;

    fn test_app() -> LabApp {
        LabApp::new(StaticCatalog::new(), RunTiming::default(), UiConfig::default())
    }

    fn press(app: &mut LabApp, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn render(app: &LabApp) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        format!("{:?}", terminal.backend().buffer())
    }

    #[test]
    fn index_lists_the_subjects() {
        let app = test_app();
        let screen = render(&app);
        assert!(screen.contains("Virtual Science Labs"));
        assert!(screen.contains("Physics Lab"));
        assert!(screen.contains("Chemistry Lab"));
        assert!(screen.contains("Biology Lab"));
    }

    #[test]
    fn lab_page_lists_experiment_cards() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter); // open physics
        let screen = render(&app);
        assert!(screen.contains("Simple Pendulum"));
        assert!(screen.contains("Ohm's Law Circuit"));
        assert!(screen.contains("Beginner"));
        assert!(screen.contains("15 mins"));
    }

    #[test]
    fn experiment_page_shows_progress_and_steps() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter); // physics lab
        press(&mut app, KeyCode::Enter); // pendulum
        let screen = render(&app);
        assert!(screen.contains("Simple Pendulum"));
        assert!(screen.contains("Step 1 of 6"));
        assert!(screen.contains("Ready to start"));
        assert!(screen.contains("Step-by-Step Guide"));
    }

    #[test]
    fn theory_tab_shows_background() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('2'));
        let screen = render(&app);
        assert!(screen.contains("Theoretical Background"));
    }

    #[test]
    fn missing_definition_dead_ends_in_not_found() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter); // physics lab
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down); // select wave interference
        press(&mut app, KeyCode::Enter);
        let screen = render(&app);
        assert!(screen.contains("Experiment Not Found"));
        assert!(screen.contains("waves"));
    }

    #[test]
    fn quit_keys_request_exit() {
        let mut app = test_app();
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = test_app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit());
    }
}
