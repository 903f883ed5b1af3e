use crate::app::{AppState, HabitRow, Pane};
use crate::domain::{HabitType, TaskRecord, TaskType};
use crate::ui::styles::{
    badge_style, border_style, default_style, done_style, focused_border_style, group_header_style,
    meta_style, selected_style, title_style, warning_style,
};
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the habit list with the current sort and grouping
pub fn render_habits_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Pane::Habits;
    let mut task_index = 0;

    let items: Vec<ListItem> = app
        .habit_rows()
        .into_iter()
        .map(|row| match row {
            HabitRow::Header(group, count) => ListItem::new(Line::from(Span::styled(
                format!("── {} ({}) ", group.name(), count),
                group_header_style(),
            ))),
            HabitRow::Task(task) => {
                let style = if focused && task_index == app.selected_index {
                    selected_style()
                } else {
                    default_style()
                };
                task_index += 1;
                ListItem::new(create_habit_line(task, app.today, app.use_emoji)).style(style)
            }
        })
        .collect();

    let title = format!(
        " Habits · {} {} ",
        app.sort_key.name(),
        app.sort_direction.symbol()
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if focused { focused_border_style() } else { border_style() })
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

fn kind_marker(task: &TaskRecord, use_emoji: bool) -> &'static str {
    match (task.task_type, task.habit_type, use_emoji) {
        (TaskType::Scheduled, _, true) => "📅",
        (TaskType::Scheduled, _, false) => "S",
        (_, Some(HabitType::Daily), true) => "🔁",
        (_, Some(HabitType::Daily), false) => "D",
        (_, Some(HabitType::Weekly), _) => "W",
        _ if use_emoji => "📈",
        _ => "+",
    }
}

/// Single habit row: done mark, kind, title, streak or counter badge
fn create_habit_line(task: &TaskRecord, today: NaiveDate, use_emoji: bool) -> Line<'static> {
    let mut spans = Vec::new();

    let done = task.done_on(today);
    spans.push(if done {
        Span::styled("[✓] ", done_style())
    } else {
        Span::raw("[ ] ")
    });
    spans.push(Span::raw(format!("{} ", kind_marker(task, use_emoji))));
    spans.push(Span::raw(task.title.clone()));

    let badge = task.habit_badge(use_emoji);
    if !badge.is_empty() {
        let style = if task.progress() < 0 { warning_style() } else { badge_style() };
        spans.push(Span::styled(format!("  {}", badge), style));
    }

    if let Some(date) = task.scheduled_date.or(task.start_date) {
        spans.push(Span::styled(format!("  {}", date.format("%b %d")), meta_style()));
    }

    Line::from(spans)
}
