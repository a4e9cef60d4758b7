use crate::app::App;
use crate::ui::styles::{border_style, default_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Render the header: mood, quote of the day and today's weighted progress
pub fn render_header_pane(f: &mut Frame, app: &App, area: Rect) {
    let settings = &app.state.settings;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" FocusForge · {} ", app.state.last_reset_date.format("%a %b %d")),
            title_style(settings.accent),
        ))
        .style(default_style(settings.theme));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1)])
        .split(inner);

    let mood = app.state.mood.value;
    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} {}  ", mood.symbol(), mood.name())),
            Span::styled(
                format!("\"{}\"", app.state.quote_of_day.text),
                hint_style(),
            ),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[0]);

    let progress = app.progress();
    let label = format!(
        "{}% ({}/{} weighted)",
        progress.percentage, progress.completed_weighted, progress.total_weighted
    );
    let gauge = Gauge::default()
        .gauge_style(gauge_style(settings.accent))
        .percent(progress.percentage.min(100) as u16)
        .label(label);
    f.render_widget(gauge, rows[1]);
}
