use crate::domain::{Accent, Priority, Theme};
use ratatui::style::{Color, Modifier, Style};

/// Terminal color for an accent choice
pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Blue => Color::LightBlue,
        Accent::Purple => Color::LightMagenta,
        Accent::Green => Color::LightGreen,
        Accent::Orange => Color::Rgb(255, 165, 0),
    }
}

/// Default text style
pub fn default_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
        Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
    }
}

/// Selected row highlight style
pub fn selected_style(accent: Accent) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(accent_color(accent))
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style(accent: Accent) -> Style {
    Style::default()
        .fg(accent_color(accent))
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Progress gauge style
pub fn gauge_style(accent: Accent) -> Style {
    Style::default().fg(accent_color(accent)).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Tag badge style
pub fn tag_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Priority badge style
pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Gray),
    }
}
