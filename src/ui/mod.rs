pub mod focus_view;
pub mod header_pane;
pub mod history_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod timer_pane;

use crate::app::App;
use crate::domain::UiMode;
use focus_view::render_focus_view;
use header_pane::render_header_pane;
use history_pane::render_history_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_confirm_modal, render_import_prompt, render_settings_modal};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;
use styles::{hint_style, modal_title_style};
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &App, now: Instant) {
    let size = f.size();

    // The focus view replaces everything else
    if let Some(session) = &app.focus {
        render_focus_view(f, app, session, size, now);
        return;
    }

    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_header_pane(f, app, layout.header_area);
    render_list_pane(f, app, layout.list_area);
    render_timer_pane(f, app, layout.timer_area);
    render_history_pane(f, app, layout.history_area);
    render_status_line(f, app, layout.status_area);

    match app.ui_mode {
        UiMode::AddingTask => render_input_form(f, app, size),
        UiMode::Settings => render_settings_modal(f, app, size),
        UiMode::ImportPath => render_import_prompt(f, app, size),
        UiMode::Confirm => render_confirm_modal(f, app, size),
        UiMode::Normal | UiMode::Searching => {}
    }
}

/// Bottom line: search prompt, last status message, or the data file in use
fn render_status_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if app.ui_mode == UiMode::Searching {
        Line::from(vec![
            Span::styled(" /", modal_title_style()),
            Span::raw(app.search.clone()),
            Span::styled("█", modal_title_style()),
        ])
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(format!(" {}", status), modal_title_style()))
    } else {
        Line::from(Span::styled(
            format!(" {}", app.store_path().display()),
            hint_style(),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}
