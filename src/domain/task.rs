use super::enums::{HabitType, Level, Quadrant, TaskType};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// One annotated checklist line, rebuilt from the text on every scan.
///
/// Nothing here is authored independently: the only durable state is the
/// annotation text inside `content`. Location (`file`, `line`) is where the
/// line was found during the scan and is re-validated before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    /// The raw source line, unmodified
    pub content: String,
    /// Text between the checkbox and the first annotation
    pub title: String,
    pub importance: Level,
    pub urgency: Level,
    pub duration_minutes: u32,
    pub habit_type: Option<HabitType>,
    pub accumulated: bool,
    /// Present if and only if `accumulated`
    pub accumulated_count: Option<i64>,
    pub last_done_date: Option<NaiveDate>,
    pub last_streak_date: Option<NaiveDate>,
    pub current_streak: u32,
    pub max_streak: u32,
    pub task_type: TaskType,
    pub scheduled_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    /// Daily-note attribute incremented when this habit is completed
    pub attribute_name: Option<String>,
    pub file: PathBuf,
    /// 1-based line number at scan time
    pub line: usize,
}

impl TaskRecord {
    pub fn quadrant(&self) -> Quadrant {
        Quadrant::from_levels(self.importance, self.urgency)
    }

    /// Habits are tracked either by completion dates or by a counter
    pub fn is_habit(&self) -> bool {
        self.habit_type.is_some() || self.accumulated
    }

    pub fn is_daily_habit(&self) -> bool {
        self.habit_type == Some(HabitType::Daily)
    }

    pub fn done_on(&self, day: NaiveDate) -> bool {
        self.last_done_date == Some(day)
    }

    /// Counter value, or zero for non-accumulated tasks
    pub fn progress(&self) -> i64 {
        self.accumulated_count.unwrap_or(0)
    }

    /// Short location label like "Projects/work.md:12"
    pub fn location(&self) -> String {
        format!("{}:{}", self.file.display(), self.line)
    }

    /// Compact badges describing the habit state, e.g. "🔥4 (max 9)"
    pub fn habit_badge(&self, use_emoji: bool) -> String {
        if let Some(count) = self.accumulated_count {
            let marker = if count < 0 { "⚠" } else { "" };
            return format!("{}{}", marker, count);
        }

        if self.habit_type.is_none() {
            return String::new();
        }

        let flame = if use_emoji { "🔥" } else { "streak " };
        if self.max_streak > self.current_streak {
            format!("{}{} (max {})", flame, self.current_streak, self.max_streak)
        } else {
            format!("{}{}", flame, self.current_streak)
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_record(content: &str) -> TaskRecord {
    TaskRecord {
        content: content.to_string(),
        title: content.to_string(),
        importance: Level::Low,
        urgency: Level::Low,
        duration_minutes: 0,
        habit_type: None,
        accumulated: false,
        accumulated_count: None,
        last_done_date: None,
        last_streak_date: None,
        current_streak: 0,
        max_streak: 0,
        task_type: TaskType::Regular,
        scheduled_date: None,
        start_date: None,
        attribute_name: None,
        file: PathBuf::from("tasks.md"),
        line: 1,
    }
}
