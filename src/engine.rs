use crate::domain::{apply_delta, update_streak, CounterDelta, Quadrant, StreakUpdate, TaskRecord, TaskType};
use crate::notifications::{Notice, Notifier};
use crate::persistence::mutate::{
    line_at, mark_done, replace_line, set_counter, set_last_done, set_quadrant, set_streak,
};
use crate::persistence::{build, scan_store, DailyNotes, DocumentStore, LineMatch, StoreError};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a mutation was not applied. The document is left untouched in every case.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("line {line} of {} no longer exists; rescan and try again", path.display())]
    LineMissing { path: PathBuf, line: usize },

    #[error("line {line} of {} has changed since it was read; rescan and try again", path.display())]
    LineDiverged {
        path: PathBuf,
        line: usize,
        expected: String,
        found: String,
    },

    #[error("\"{0}\" is not an open task")]
    NotATask(String),

    #[error("\"{0}\" is not an accumulated counter")]
    NotAccumulated(String),
}

/// Outcome of rewriting one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub old_text: String,
    pub new_text: String,
}

impl LineEdit {
    pub fn changed(&self) -> bool {
        self.old_text != self.new_text
    }
}

/// Outcome of completing a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub edit: LineEdit,
    /// Streak evaluation, for daily habits only
    pub streak: Option<StreakUpdate>,
    /// New daily-note attribute value, when one was incremented
    pub attribute_value: Option<i64>,
}

/// Outcome of a counter change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterChange {
    pub edit: LineEdit,
    pub old_count: i64,
    pub new_count: i64,
}

/// Actions the terminal UI can trigger. Implemented by [`Engine`] and
/// handed to the UI when it is built.
pub trait TaskActions {
    fn rescan(&self) -> anyhow::Result<Vec<TaskRecord>>;
    fn complete(&self, task: &TaskRecord) -> bool;
    fn bump(&self, task: &TaskRecord, delta: CounterDelta) -> bool;
    fn reclassify(&self, task: &TaskRecord, quadrant: Quadrant) -> bool;
}

/// Performs user actions against a document store
pub struct Engine<'a> {
    store: &'a dyn DocumentStore,
    notifier: &'a dyn Notifier,
    daily_notes: DailyNotes,
    today_override: Option<NaiveDate>,
}

impl<'a> Engine<'a> {
    pub fn new(store: &'a dyn DocumentStore, notifier: &'a dyn Notifier, daily_notes: DailyNotes) -> Self {
        Self {
            store,
            notifier,
            daily_notes,
            today_override: None,
        }
    }

    /// Pin "today" instead of reading the local clock
    pub fn with_today(mut self, today: Option<NaiveDate>) -> Self {
        self.today_override = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store
    }

    pub fn scan(&self) -> anyhow::Result<Vec<TaskRecord>> {
        scan_store(self.store)
    }

    /// Read `path` and check that `line` still matches `original`.
    ///
    /// Returns the whole document and the current text of the line.
    fn validated_line(
        &self,
        path: &Path,
        line: usize,
        original: &str,
        mode: LineMatch,
    ) -> Result<(String, String), MutationError> {
        let content = self.store.read_document(path)?;
        let current = line_at(&content, line).ok_or_else(|| MutationError::LineMissing {
            path: path.to_path_buf(),
            line,
        })?;

        if !mode.matches(current, original) {
            return Err(MutationError::LineDiverged {
                path: path.to_path_buf(),
                line,
                expected: original.to_string(),
                found: current.to_string(),
            });
        }

        let current = current.to_string();
        Ok((content, current))
    }

    /// Re-validate the target line and rewrite it with `edit`.
    ///
    /// Nothing is written when the line has diverged, is gone, or would not
    /// change.
    fn rewrite_line<F>(
        &self,
        path: &Path,
        line: usize,
        original: &str,
        mode: LineMatch,
        edit: F,
    ) -> Result<LineEdit, MutationError>
    where
        F: FnOnce(&str) -> Result<String, MutationError>,
    {
        let (content, current) = self.validated_line(path, line, original, mode)?;
        let current = current.as_str();

        let new_text = edit(current)?;
        if new_text != current {
            let updated = replace_line(&content, line, &new_text).ok_or_else(|| {
                MutationError::LineMissing {
                    path: path.to_path_buf(),
                    line,
                }
            })?;
            self.store.write_document(path, &updated)?;
            tracing::debug!(path = %path.display(), line, "line rewritten");
        }

        Ok(LineEdit {
            old_text: current.to_string(),
            new_text,
        })
    }

    /// Complete the task at `path:line`.
    ///
    /// Habits record today's date and update their streak; other tasks get
    /// their checkbox ticked (the line must still match exactly).
    pub fn apply_completion(&self, path: &Path, line: usize, original: &str) -> Result<Completion, MutationError> {
        let task = build(original, path, line).ok_or_else(|| MutationError::NotATask(original.to_string()))?;
        let today = self.today();

        if task.task_type != TaskType::RepeatedDaily {
            let edit = self.rewrite_line(path, line, original, LineMatch::Exact, |current| {
                mark_done(current).ok_or_else(|| MutationError::NotATask(current.to_string()))
            })?;
            self.notifier.notify(Notice::info(format!("Completed \"{}\"", task.title)));
            return Ok(Completion {
                edit,
                streak: None,
                attribute_value: None,
            });
        }

        // Nothing outside the line is touched until the line checks out
        let (_, current) = self.validated_line(path, line, original, LineMatch::Prefix)?;
        let done_today = build(&current, path, line).is_some_and(|record| record.done_on(today));

        // The daily-note counter and the local mark are independent: a
        // failure in one is reported without dropping the other.
        let attribute_value = match &task.attribute_name {
            Some(name) if !done_today => match self.daily_notes.increment(self.store, name, today) {
                Ok(value) => Some(value),
                Err(e) => {
                    self.notifier.notify(Notice::warning(format!(
                        "Could not update \"{}\" in today's daily note: {}",
                        name, e
                    )));
                    None
                }
            },
            _ => None,
        };

        let mut streak = None;
        let edit = self.rewrite_line(path, line, original, LineMatch::Prefix, |current| {
            let Some(record) = build(current, path, line) else {
                return Err(MutationError::NotATask(current.to_string()));
            };
            let updated = set_last_done(current, today);
            if !record.is_daily_habit() {
                return Ok(updated);
            }

            let update = update_streak(Some(today), record.last_streak_date, record.current_streak, today);
            streak = Some(update);
            if update.should_update {
                Ok(set_streak(&updated, update.streak, update.max_streak(record.max_streak), Some(today)))
            } else {
                Ok(updated)
            }
        })?;

        if !edit.changed() {
            self.notifier
                .notify(Notice::info(format!("\"{}\" is already done today", task.title)));
        } else if let Some(update) = streak.filter(|u| u.is_increment()) {
            self.notifier.notify(Notice::info(format!(
                "🔥 \"{}\" streak: {} day{}",
                task.title,
                update.streak,
                if update.streak == 1 { "" } else { "s" }
            )));
        } else {
            self.notifier.notify(Notice::info(format!("Completed \"{}\"", task.title)));
        }

        Ok(Completion {
            edit,
            streak,
            attribute_value,
        })
    }

    /// Increment, decrement or reset the counter of an accumulated task
    pub fn apply_counter_delta(
        &self,
        path: &Path,
        line: usize,
        original: &str,
        delta: CounterDelta,
    ) -> Result<CounterChange, MutationError> {
        let mut counts = (0, 0);
        let edit = self.rewrite_line(path, line, original, LineMatch::Prefix, |current| {
            let record = build(current, path, line)
                .filter(|r| r.accumulated)
                .ok_or_else(|| MutationError::NotAccumulated(current.to_string()))?;
            let old = record.progress();
            let new = apply_delta(old, delta);
            counts = (old, new);
            Ok(set_counter(current, new))
        })?;

        tracing::info!(path = %path.display(), line, old = counts.0, new = counts.1, "counter updated");
        Ok(CounterChange {
            edit,
            old_count: counts.0,
            new_count: counts.1,
        })
    }

    /// Move a task to another quadrant by rewriting its level tags
    pub fn apply_quadrant(
        &self,
        path: &Path,
        line: usize,
        original: &str,
        quadrant: Quadrant,
    ) -> Result<LineEdit, MutationError> {
        self.rewrite_line(path, line, original, LineMatch::Prefix, |current| {
            if build(current, path, line).is_none() {
                return Err(MutationError::NotATask(current.to_string()));
            }
            Ok(set_quadrant(current, quadrant))
        })
    }

    /// Persist resets for daily habits whose streak broke before today.
    ///
    /// Returns the number of lines rewritten. Individual failures are
    /// reported and skipped.
    pub fn refresh_streaks(&self) -> anyhow::Result<usize> {
        let today = self.today();
        let mut rewritten = 0;

        for task in self.scan()? {
            if !task.is_daily_habit() || task.current_streak == 0 {
                continue;
            }
            let update = update_streak(task.last_done_date, task.last_streak_date, task.current_streak, today);
            if !update.should_update || update.streak != 0 {
                continue;
            }

            let result = self.rewrite_line(&task.file, task.line, &task.content, LineMatch::Prefix, |current| {
                Ok(set_streak(current, 0, task.max_streak, None))
            });
            match result {
                Ok(edit) if edit.changed() => {
                    rewritten += 1;
                    self.notifier.notify(Notice::info(format!(
                        "Streak for \"{}\" reset (was {})",
                        task.title, task.current_streak
                    )));
                }
                Ok(_) => {}
                Err(e) => self.report(&e),
            }
        }

        Ok(rewritten)
    }

    pub fn report(&self, error: &MutationError) {
        tracing::warn!(error = %error, "mutation aborted");
        self.notifier.notify(Notice::error(error.to_string()));
    }
}

impl TaskActions for Engine<'_> {
    fn rescan(&self) -> anyhow::Result<Vec<TaskRecord>> {
        self.scan()
    }

    fn complete(&self, task: &TaskRecord) -> bool {
        match self.apply_completion(&task.file, task.line, &task.content) {
            Ok(completion) => completion.edit.changed(),
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    fn bump(&self, task: &TaskRecord, delta: CounterDelta) -> bool {
        match self.apply_counter_delta(&task.file, task.line, &task.content, delta) {
            Ok(change) => change.edit.changed(),
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    fn reclassify(&self, task: &TaskRecord, quadrant: Quadrant) -> bool {
        match self.apply_quadrant(&task.file, task.line, &task.content, quadrant) {
            Ok(edit) => {
                if edit.changed() {
                    self.notifier
                        .notify(Notice::info(format!("Moved \"{}\" to {}", task.title, quadrant.name())));
                }
                edit.changed()
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }
}
