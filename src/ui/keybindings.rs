use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" j/k select   "),
        Span::raw("space done   "),
        Span::raw("n new   "),
        Span::raw("enter edit   "),
        Span::raw("p priority   "),
        Span::raw("e notes   "),
        Span::raw("d delete   "),
        Span::raw("/ search   "),
        Span::raw("t tag   "),
        Span::raw("s/r timer   "),
        Span::raw("f focus   "),
        Span::raw("m mood   "),
        Span::raw("o settings   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
