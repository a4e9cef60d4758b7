use crate::app::App;
use crate::domain::HistoryEntry;
use crate::rollover::recent_history;
use crate::ui::styles::{border_style, default_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Days shown in the history pane
const HISTORY_DAYS: usize = 7;

/// Width of the text bar in characters
const BAR_WIDTH: usize = 10;

/// "Mon 03-04 ██████░░░░  63%"
fn history_line(entry: &HistoryEntry) -> String {
    let pct = entry.percentage().min(100) as usize;
    let filled = (pct * BAR_WIDTH + 50) / 100;
    format!(
        "{} {}{} {:>3}%",
        entry.date.format("%a %m-%d"),
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        pct
    )
}

/// Render the last week of daily progress, newest first
pub fn render_history_pane(f: &mut Frame, app: &App, area: Rect) {
    let settings = &app.state.settings;
    let recent = recent_history(&app.state.history, HISTORY_DAYS);

    let items: Vec<ListItem> = if recent.is_empty() {
        vec![ListItem::new(Line::styled(
            "History appears after your first day.",
            hint_style(),
        ))]
    } else {
        recent
            .iter()
            .rev()
            .map(|entry| ListItem::new(history_line(entry)))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Last 7 days ", title_style(settings.accent))),
        )
        .style(default_style(settings.theme));

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_history_line() {
        let entry = HistoryEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            completed_weighted: 5,
            total_weighted: 8,
        };
        assert_eq!(history_line(&entry), "Mon 03-04 ██████░░░░  63%");
    }

    #[test]
    fn test_history_line_empty_day() {
        let entry = HistoryEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            completed_weighted: 0,
            total_weighted: 0,
        };
        assert_eq!(history_line(&entry), "Tue 03-05 ░░░░░░░░░░   0%");
    }
}
