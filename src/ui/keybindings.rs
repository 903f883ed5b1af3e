use crate::app::AppState;
use crate::ui::styles::{hint_style, notice_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" Tab pane   "),
        Span::raw("↑/↓ select   "),
        Span::raw("Enter done   "),
        Span::raw("+/-/0 counter   "),
        Span::raw("1-4 move   "),
        Span::raw("s sort   "),
        Span::raw("o order   "),
        Span::raw("g group   "),
        Span::raw("r rescan   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the latest notice, or the task count when there is none
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status {
        Some(notice) => Line::from(Span::styled(format!(" {}", notice.message), notice_style(notice.level))),
        None => Line::from(Span::styled(
            format!(" {} tasks · {}", app.tasks.len(), app.today.format("%a %b %d")),
            hint_style(),
        )),
    };

    f.render_widget(Paragraph::new(line), area);
}
