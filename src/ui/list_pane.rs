use crate::app::App;
use crate::domain::Task;
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, priority_style, selected_style,
    tag_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the task list pane (filtered, canonical order)
pub fn render_list_pane(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.state.settings.theme;
    let accent = app.state.settings.accent;
    let tasks = app.visible_tasks();

    let items: Vec<ListItem> = if tasks.is_empty() {
        let hint = if app.state.tasks.is_empty() {
            "No tasks yet. Press n to add one."
        } else {
            "Nothing matches the current filter. Esc clears it."
        };
        vec![ListItem::new(Line::styled(hint, hint_style()))]
    } else {
        tasks
            .iter()
            .map(|task| ListItem::new(create_task_line(task)).style(default_style(theme)))
            .collect()
    };

    let mut title = format!(" Tasks ({}) ", tasks.len());
    if !app.search.is_empty() {
        title.push_str(&format!("/{} ", app.search));
    }
    if let Some(tag) = &app.tag_filter {
        title.push_str(&format!("#{} ", tag));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style(accent))),
        )
        .style(default_style(theme))
        .highlight_style(selected_style(accent));

    let mut state = ListState::default();
    if !tasks.is_empty() {
        state.select(Some(app.selected_index.min(tasks.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a task
/// Format: [x] Read 20 pages  HIGH ↻ #study
fn create_task_line(task: &Task) -> Line<'static> {
    let mut spans = Vec::new();

    let check = if task.done { "[x] " } else { "[ ] " };
    spans.push(Span::raw(check));

    if task.done {
        spans.push(Span::styled(task.text.clone(), done_style()));
    } else {
        spans.push(Span::raw(task.text.clone()));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        task.priority().label().to_uppercase(),
        priority_style(task.priority()),
    ));

    if task.repeat_daily {
        spans.push(Span::raw(" ↻"));
    }

    for tag in &task.tags {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("#{}", tag), tag_style()));
    }

    if !task.notes.is_empty() {
        spans.push(Span::styled(" ✎", hint_style()));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_tags, Priority};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_create_task_line() {
        let mut task = Task::new("Read 20 pages", Priority::High);
        task.repeat_daily = true;
        task.tags = parse_tags("study");

        let text = line_text(&create_task_line(&task));
        assert_eq!(text, "[ ] Read 20 pages  HIGH ↻ #study");
    }

    #[test]
    fn test_done_task_line() {
        let mut task = Task::new("Jog", Priority::Low);
        task.done = true;
        task.notes = "5k".to_string();

        let text = line_text(&create_task_line(&task));
        assert!(text.starts_with("[x] Jog"));
        assert!(text.ends_with("✎"));
    }
}
