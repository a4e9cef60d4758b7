use crate::app::App;
use crate::timer::{Phase, PomodoroTimer};
use crate::ui::styles::{border_style, default_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// "Focus Time · 24:13 · running"
pub fn timer_headline(timer: &PomodoroTimer) -> String {
    let state = if timer.is_running() { "running" } else { "paused" };
    format!("{} · {} · {}", timer.phase().label(), timer.display(), state)
}

/// Color of the countdown for a phase
pub fn phase_style(phase: Phase) -> Style {
    let color = match phase {
        Phase::Work => Color::LightRed,
        Phase::Break => Color::LightGreen,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Render the compact Pomodoro widget
pub fn render_timer_pane(f: &mut Frame, app: &App, area: Rect) {
    let settings = &app.state.settings;
    let timer = &app.widget.timer;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Pomodoro ", title_style(settings.accent)))
        .style(default_style(settings.theme));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let headline = Paragraph::new(Line::from(Span::styled(
        timer_headline(timer),
        phase_style(timer.phase()),
    )))
    .alignment(Alignment::Center);
    f.render_widget(headline, rows[0]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style(settings.accent))
        .ratio(timer.progress())
        .label("");
    f.render_widget(gauge, rows[1]);

    let durations = timer.durations();
    let hint = Paragraph::new(Line::styled(
        format!(
            "s start/pause  r reset  ({}m / {}m)",
            durations.work / 60,
            durations.break_secs / 60
        ),
        hint_style(),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hint, rows[2]);
}
