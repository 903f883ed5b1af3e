use super::lexer::{checkbox, lex};
use super::store::DocumentStore;
use crate::domain::{TaskRecord, TaskType};
use std::path::Path;

/// Build a task record from one line, or nothing if the line is not a task
/// of interest.
///
/// Only open checklist items (`- [ ]`) carrying at least one recognised
/// signal are admitted: an importance or urgency level, a habit type, the
/// accumulated flag, a scheduled or start date, or an attribute name.
pub fn build(line: &str, file: &Path, line_number: usize) -> Option<TaskRecord> {
    let mark = checkbox(line)?;
    if !mark.open {
        return None;
    }

    let a = lex(line);
    let accumulated = a.accumulated == Some(true);

    let has_signal = a.importance.is_some()
        || a.urgency.is_some()
        || a.habit_type.is_some()
        || accumulated
        || a.scheduled.is_some()
        || a.start.is_some()
        || a.attribute.is_some();
    if !has_signal {
        return None;
    }

    let task_type = if a.scheduled.is_some() {
        TaskType::Scheduled
    } else if a.habit_type.is_some() {
        TaskType::RepeatedDaily
    } else {
        TaskType::Regular
    };

    let title_end = a.boundary.unwrap_or(line.len());
    let title = line
        .get(mark.mark.end..title_end)
        .unwrap_or_default()
        .trim()
        .to_string();

    Some(TaskRecord {
        content: line.to_string(),
        title,
        importance: a.importance.unwrap_or_default(),
        urgency: a.urgency.unwrap_or_default(),
        duration_minutes: a.duration_minutes.unwrap_or(0),
        habit_type: a.habit_type,
        accumulated,
        accumulated_count: accumulated.then(|| a.counter.unwrap_or(0)),
        last_done_date: a.last_done,
        last_streak_date: a.last_streak_date,
        current_streak: a.streak.unwrap_or(0),
        max_streak: a.max_streak.unwrap_or(0),
        task_type,
        scheduled_date: a.scheduled,
        start_date: a.start,
        attribute_name: a.attribute,
        file: file.to_path_buf(),
        line: line_number,
    })
}

/// Build records for every task line of a document, in document order
pub fn scan_document(file: &Path, content: &str) -> Vec<TaskRecord> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| build(line, file, idx + 1))
        .collect()
}

/// Scan every document in the store.
///
/// A document that cannot be read is logged and skipped; the rest of the
/// scan still completes.
pub fn scan_store(store: &dyn DocumentStore) -> anyhow::Result<Vec<TaskRecord>> {
    let mut tasks = Vec::new();

    for path in store.list_documents()? {
        match store.read_document(&path) {
            Ok(content) => tasks.extend(scan_document(&path, &content)),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document"),
        }
    }

    tracing::debug!(count = tasks.len(), "scan complete");
    Ok(tasks)
}
