use crate::app::{App, SettingsRow};
use crate::domain::{Theme, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{accent_color, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw `lines` in a centered modal with a title
fn render_boxed(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title.to_string(), modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn setting_value(app: &App, row: SettingsRow) -> Span<'static> {
    let settings = &app.state.settings;
    match row {
        SettingsRow::Theme => Span::raw(match settings.theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }),
        SettingsRow::Accent => Span::styled(
            settings.accent.name(),
            Style::default().fg(accent_color(settings.accent)),
        ),
        SettingsRow::WorkMinutes => Span::raw(format!("{} min", settings.pomodoro.work / 60)),
        SettingsRow::BreakMinutes => {
            Span::raw(format!("{} min", settings.pomodoro.break_secs / 60))
        }
        SettingsRow::Sounds => Span::raw(if settings.sounds_on { "on" } else { "off" }),
        SettingsRow::Export | SettingsRow::Import | SettingsRow::Reset => Span::raw(""),
    }
}

fn setting_label(row: SettingsRow) -> &'static str {
    match row {
        SettingsRow::Theme => "Theme",
        SettingsRow::Accent => "Accent",
        SettingsRow::WorkMinutes => "Focus length",
        SettingsRow::BreakMinutes => "Break length",
        SettingsRow::Sounds => "Completion sound",
        SettingsRow::Export => "Export backup",
        SettingsRow::Import => "Import backup…",
        SettingsRow::Reset => "Reset all data…",
    }
}

/// Render the settings panel
pub fn render_settings_modal(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::raw("")];

    for row in SettingsRow::ALL {
        let selected = row == app.selected_setting();
        let marker = if selected { "▸ " } else { "  " };
        let label = format!("{}{:<18}", marker, setting_label(row));
        let label = if selected {
            Span::styled(label, modal_title_style())
        } else {
            Span::raw(label)
        };
        lines.push(Line::from(vec![label, setting_value(app, row)]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw("  ↑/↓ select   ←/→ change   Enter activate   Esc close"));

    render_boxed(f, area, " Settings ", lines);
}

/// Render the prompt for the path of a backup to import
pub fn render_import_prompt(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::raw("  Path of the backup file:"),
        Line::from(vec![
            Span::raw("  > "),
            Span::styled(app.path_input.clone(), modal_title_style()),
            Span::styled("█", modal_title_style()),
        ]),
        Line::raw(""),
        Line::raw("  Enter continue   Esc cancel"),
    ];
    render_boxed(f, area, " Import ", lines);
}

/// Render the yes/no confirmation for a destructive action
pub fn render_confirm_modal(f: &mut Frame, app: &App, area: Rect) {
    if app.ui_mode != UiMode::Confirm {
        return;
    }
    let Some(pending) = &app.pending else {
        return;
    };

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  {}", pending.prompt())),
        Line::raw(""),
        Line::raw("  This cannot be undone."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Yes  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" No"),
        ]),
    ];
    render_boxed(f, area, " Are you sure? ", lines);
}
