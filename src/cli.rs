//! Plain-text output and argument parsing for the non-interactive commands.

use crate::domain::{
    group_by_quadrant, group_habits, habit_tasks, sort_habits, CounterDelta, GroupKey, Quadrant, SortDirection,
    SortKey, TaskRecord,
};
use crate::persistence::lexer::parse_date;
use crate::persistence::mutate::line_at;
use crate::persistence::DocumentStore;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

/// A `path:line` reference to a task line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    pub line: usize,
}

impl Location {
    pub fn parse(s: &str) -> Result<Self, String> {
        let (path, line) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected <file>:<line>, got \"{}\"", s))?;
        let line: usize = line
            .parse()
            .map_err(|_| format!("invalid line number \"{}\"", line))?;
        if path.is_empty() || line == 0 {
            return Err(format!("expected <file>:<line>, got \"{}\"", s));
        }
        Ok(Self {
            path: PathBuf::from(path),
            line,
        })
    }

    /// Current text of the referenced line
    pub fn read(&self, store: &dyn DocumentStore) -> Result<String> {
        let content = store.read_document(&self.path)?;
        line_at(&content, self.line)
            .map(str::to_string)
            .with_context(|| format!("{} has no line {}", self.path.display(), self.line))
    }
}

pub fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date \"{}\", use YYYY-MM-DD", s))
}

pub fn parse_sort(s: &str) -> Result<SortKey, String> {
    SortKey::from_tag(s).ok_or_else(|| format!("unknown sort key \"{}\" (default, progress, start-date)", s))
}

pub fn parse_direction(s: &str) -> Result<SortDirection, String> {
    SortDirection::from_tag(s).ok_or_else(|| format!("unknown direction \"{}\" (asc, desc)", s))
}

pub fn parse_group(s: &str) -> Result<GroupKey, String> {
    GroupKey::from_tag(s).ok_or_else(|| format!("unknown grouping \"{}\" (none, accumulated, category)", s))
}

pub fn parse_delta(s: &str) -> Result<CounterDelta, String> {
    CounterDelta::from_tag(s).ok_or_else(|| format!("unknown counter change \"{}\" (up, down, reset)", s))
}

pub fn parse_quadrant(s: &str) -> Result<Quadrant, String> {
    Quadrant::from_tag(s).ok_or_else(|| format!("unknown quadrant \"{}\" (1-4 or do-first, schedule, delegate, eliminate)", s))
}

/// The four quadrants with their tasks
pub fn format_matrix(tasks: &[TaskRecord]) -> String {
    let matrix = group_by_quadrant(tasks);
    let mut out = String::new();

    for (quadrant, members) in matrix.iter() {
        out.push_str(&format!("## {} ({}) - {}\n", quadrant.name(), quadrant.label(), members.len()));
        for task in members {
            out.push_str(&format!("- {}", task.title));
            if task.duration_minutes > 0 {
                out.push_str(&format!(" [{}m]", task.duration_minutes));
            }
            out.push_str(&format!("  ({})\n", task.location()));
        }
        out.push('\n');
    }

    out
}

/// Habit list under a sort key, direction and grouping
pub fn format_habits(
    tasks: &[TaskRecord],
    key: SortKey,
    direction: SortDirection,
    group: GroupKey,
    today: NaiveDate,
    use_emoji: bool,
) -> String {
    let sorted = sort_habits(&habit_tasks(tasks), key, direction);
    let mut out = String::new();

    for (habit_group, members) in group_habits(&sorted, group) {
        if group != GroupKey::None {
            out.push_str(&format!("## {} ({})\n", habit_group.name(), members.len()));
        }
        for task in &members {
            let mark = if task.done_on(today) { "x" } else { " " };
            out.push_str(&format!("- [{}] {}", mark, task.title));
            let badge = task.habit_badge(use_emoji);
            if !badge.is_empty() {
                out.push_str(&format!("  {}", badge));
            }
            out.push_str(&format!("  ({})\n", task.location()));
        }
    }

    out
}
