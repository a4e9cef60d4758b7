use crate::app::App;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, priority_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label line and "> value█" line for a text field
fn text_field<'a>(label: &'a str, value: &'a str, editing: bool) -> [Line<'a>; 2] {
    let label = if editing {
        Line::raw(format!("{} (editing)", label))
    } else {
        Line::raw(label)
    };
    let value = Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]);
    [label, value]
}

/// Render the input form for adding or editing a task
pub fn render_input_form(f: &mut Frame, app: &App, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        lines.extend(text_field("Task:", &form.text, form.editing_field == 0));
        lines.extend(text_field(
            "Tags (comma-separated):",
            &form.tags,
            form.editing_field == 1,
        ));
        lines.extend(text_field("Notes:", &form.notes, form.editing_field == 2));
        lines.push(Line::raw(""));

        let marker = |field: usize| if form.editing_field == field { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::raw(format!("{}Priority: ", marker(3))),
            Span::styled(form.priority.label(), priority_style(form.priority)),
        ]));
        lines.push(Line::raw(format!(
            "{}Repeat daily: {}",
            marker(4),
            if form.repeat_daily { "yes" } else { "no" }
        )));
        lines.push(Line::raw(""));

        let (title, submit) = if form.is_edit() {
            (" Edit Task ", "save")
        } else {
            (" Add Task ", "add")
        };
        lines.push(Line::raw(format!(
            "Tab next field  ·  Space changes priority/repeat  ·  Enter {}  ·  Esc cancel",
            submit
        )));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
