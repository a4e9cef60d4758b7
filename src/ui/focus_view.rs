use crate::app::App;
use crate::timer::FocusSession;
use crate::ui::styles::{default_style, error_style, gauge_style, hint_style, title_style};
use crate::ui::timer_pane::phase_style;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

/// Render the full-screen focus view
pub fn render_focus_view(f: &mut Frame, app: &App, session: &FocusSession, area: Rect, now: Instant) {
    let settings = &app.state.settings;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Focus ", title_style(settings.accent)))
        .style(default_style(settings.theme));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(2), // current task
            Constraint::Length(2), // phase + countdown
            Constraint::Length(1), // progress
            Constraint::Length(2),
            Constraint::Length(1), // shield / hold
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let current = app
        .current_task()
        .map(|t| t.text.clone())
        .unwrap_or_else(|| "All tasks done. Enjoy the quiet.".to_string());
    f.render_widget(
        Paragraph::new(Line::styled(current, title_style(settings.accent)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[1],
    );

    let timer = &session.clock.timer;
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}  {}", timer.phase().label(), timer.display()),
                phase_style(timer.phase()),
            ),
            Span::styled(
                if timer.is_running() { "" } else { "  (paused)" },
                hint_style(),
            ),
        ]))
        .alignment(Alignment::Center),
        rows[2],
    );

    f.render_widget(
        Gauge::default()
            .gauge_style(gauge_style(settings.accent))
            .ratio(timer.progress())
            .label(""),
        rows[3],
    );

    if session.exit.is_holding() {
        let held = session.exit.progress(now);
        f.render_widget(
            Gauge::default()
                .gauge_style(error_style())
                .ratio(held)
                .label(format!("Keep holding to leave… {}%", (held * 100.0).round() as u32)),
            rows[5],
        );
    } else {
        let shield = if session.exit.shield() {
            "🛡 Distraction shield on: hold Esc to leave"
        } else {
            "Distraction shield off"
        };
        f.render_widget(
            Paragraph::new(Line::styled(shield, hint_style())).alignment(Alignment::Center),
            rows[5],
        );
    }

    f.render_widget(
        Paragraph::new(Line::styled(
            "space start/pause   r reset   h shield   Esc/x leave",
            hint_style(),
        ))
        .alignment(Alignment::Center),
        rows[7],
    );
}
