use crate::app::{AppState, Pane};
use crate::domain::{Quadrant, TaskRecord};
use crate::report::format_minutes;
use crate::ui::styles::{
    border_style, default_style, focused_border_style, meta_style, quadrant_style, selected_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render one cell of the matrix
pub fn render_quadrant_pane(f: &mut Frame, app: &AppState, quadrant: Quadrant, area: Rect) {
    let tasks = app.matrix.get(quadrant);
    let focused = app.focus == Pane::Matrix(quadrant);

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let style = if focused && idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(create_task_line(task)).style(style)
        })
        .collect();

    let planned: u32 = tasks.iter().map(|t| t.duration_minutes).sum();
    let mut title = format!(" {} ({}) ", quadrant.name(), tasks.len());
    if planned > 0 {
        title.push_str(&format!("⏳ {} ", format_minutes(planned)));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if focused { focused_border_style() } else { border_style() })
            .title(Span::styled(title, quadrant_style(quadrant))),
    );

    f.render_widget(list, area);
}

/// Single matrix row: title, duration, scheduled date, file location
fn create_task_line(task: &TaskRecord) -> Line<'static> {
    let mut spans = vec![Span::raw(task.title.clone())];

    if task.duration_minutes > 0 {
        spans.push(Span::styled(format!("  ⏳{}", format_minutes(task.duration_minutes)), meta_style()));
    }
    if let Some(date) = task.scheduled_date {
        spans.push(Span::styled(format!("  📅 {}", date.format("%b %d")), meta_style()));
    }
    spans.push(Span::styled(format!("  {}", task.location()), border_style()));

    Line::from(spans)
}
