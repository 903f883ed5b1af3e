use crate::domain::{
    group_by_quadrant, group_habits, habit_tasks, sort_habits, CounterDelta, GroupKey, HabitGroup, Quadrant,
    QuadrantMap, SortDirection, SortKey, TaskRecord,
};
use crate::engine::TaskActions;
use crate::notifications::Notice;
use crate::persistence::Settings;
use crate::watch::Reconciler;
use chrono::NaiveDate;
use std::time::Instant;

/// Pane with keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Matrix(Quadrant),
    Habits,
}

impl Pane {
    /// Tab order: the four quadrants, then the habits pane
    pub fn next(&self) -> Self {
        match self {
            Pane::Matrix(Quadrant::DoFirst) => Pane::Matrix(Quadrant::Schedule),
            Pane::Matrix(Quadrant::Schedule) => Pane::Matrix(Quadrant::Delegate),
            Pane::Matrix(Quadrant::Delegate) => Pane::Matrix(Quadrant::Eliminate),
            Pane::Matrix(Quadrant::Eliminate) => Pane::Habits,
            Pane::Habits => Pane::Matrix(Quadrant::DoFirst),
        }
    }
}

/// One row of the habits pane
#[derive(Debug, Clone, PartialEq)]
pub enum HabitRow<'a> {
    Header(HabitGroup, usize),
    Task(&'a TaskRecord),
}

/// Main application state
pub struct AppState {
    pub tasks: Vec<TaskRecord>,
    pub matrix: QuadrantMap,
    pub habit_groups: Vec<(HabitGroup, Vec<TaskRecord>)>,
    pub focus: Pane,
    pub selected_index: usize,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub group_key: GroupKey,
    pub use_emoji: bool,
    pub today: NaiveDate,
    pub status: Option<Notice>,
    pub reconciler: Reconciler,
}

impl AppState {
    pub fn new(settings: &Settings, today: NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            matrix: QuadrantMap::default(),
            habit_groups: Vec::new(),
            focus: Pane::Matrix(Quadrant::DoFirst),
            selected_index: 0,
            sort_key: settings.default_sort,
            sort_direction: settings.sort_direction(),
            group_key: settings.default_group,
            use_emoji: settings.use_emoji,
            today,
            status: None,
            reconciler: Reconciler::new(settings.poll_interval()),
        }
    }

    /// Replace the scan result and rebuild every derived view
    pub fn set_tasks(&mut self, tasks: Vec<TaskRecord>) {
        self.tasks = tasks;
        self.rebuild_views();
    }

    fn rebuild_views(&mut self) {
        self.matrix = group_by_quadrant(&self.tasks);
        let habits = sort_habits(&habit_tasks(&self.tasks), self.sort_key, self.sort_direction);
        self.habit_groups = group_habits(&habits, self.group_key);
        self.clamp_selection();
    }

    /// Tasks of the focused pane, in display order
    pub fn visible_tasks(&self) -> Vec<&TaskRecord> {
        match self.focus {
            Pane::Matrix(quadrant) => self.matrix.get(quadrant).iter().collect(),
            Pane::Habits => self
                .habit_groups
                .iter()
                .flat_map(|(_, tasks)| tasks.iter())
                .collect(),
        }
    }

    /// Habits pane rows with group headers (headers are skipped for `GroupKey::None`)
    pub fn habit_rows(&self) -> Vec<HabitRow<'_>> {
        let mut rows = Vec::new();
        for (group, tasks) in &self.habit_groups {
            if self.group_key != GroupKey::None {
                rows.push(HabitRow::Header(*group, tasks.len()));
            }
            rows.extend(tasks.iter().map(HabitRow::Task));
        }
        rows
    }

    pub fn selected_task(&self) -> Option<&TaskRecord> {
        self.visible_tasks().get(self.selected_index).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn next_pane(&mut self) {
        self.focus = self.focus.next();
        self.selected_index = 0;
    }

    /// Next sort key, resetting the direction to the key's natural one
    pub fn cycle_sort(&mut self) {
        self.sort_key = self.sort_key.next();
        self.sort_direction = self.sort_key.natural_direction();
        self.rebuild_views();
    }

    pub fn flip_direction(&mut self) {
        self.sort_direction = self.sort_direction.flip();
        self.rebuild_views();
    }

    pub fn cycle_group(&mut self) {
        self.group_key = self.group_key.next();
        self.rebuild_views();
    }

    pub fn set_status(&mut self, notice: Notice) {
        self.status = Some(notice);
    }

    /// Rescan immediately and keep the reconciler in sync
    pub fn rescan(&mut self, actions: &dyn TaskActions) {
        match actions.rescan() {
            Ok(tasks) => {
                self.reconciler.remember(&tasks);
                self.reconciler.mark_polled(Instant::now());
                self.set_tasks(tasks);
            }
            Err(e) => self.set_status(Notice::error(format!("Scan failed: {:#}", e))),
        }
    }

    /// Poll the documents if the interval elapsed; returns true when the view changed
    pub fn poll(&mut self, actions: &dyn TaskActions, now: Instant) -> bool {
        if !self.reconciler.is_due(now) {
            return false;
        }
        self.reconciler.mark_polled(now);

        match actions.rescan() {
            Ok(tasks) => match self.reconciler.reconcile(tasks) {
                Some(tasks) => {
                    self.set_tasks(tasks);
                    true
                }
                None => false,
            },
            Err(e) => {
                tracing::warn!(error = %e, "background scan failed");
                false
            }
        }
    }

    /// Complete the selected task, then rescan
    pub fn complete_selected(&mut self, actions: &dyn TaskActions) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        if actions.complete(&task) {
            self.rescan(actions);
        }
    }

    pub fn bump_selected(&mut self, actions: &dyn TaskActions, delta: CounterDelta) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        if !task.accumulated {
            self.set_status(Notice::warning(format!("\"{}\" has no counter", task.title)));
            return;
        }
        if actions.bump(&task, delta) {
            self.rescan(actions);
        }
    }

    pub fn move_selected(&mut self, actions: &dyn TaskActions, quadrant: Quadrant) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        if task.quadrant() == quadrant {
            return;
        }
        if actions.reclassify(&task, quadrant) {
            self.rescan(actions);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HabitType, Level};
    use crate::domain::task::sample_record;
    use std::cell::RefCell;
    use std::time::Duration;

    /// Records calls and serves a fixed scan
    #[derive(Default)]
    struct FakeActions {
        tasks: RefCell<Vec<TaskRecord>>,
        calls: RefCell<Vec<String>>,
    }

    impl TaskActions for FakeActions {
        fn rescan(&self) -> anyhow::Result<Vec<TaskRecord>> {
            self.calls.borrow_mut().push("rescan".to_string());
            Ok(self.tasks.borrow().clone())
        }

        fn complete(&self, task: &TaskRecord) -> bool {
            self.calls.borrow_mut().push(format!("complete {}", task.title));
            true
        }

        fn bump(&self, task: &TaskRecord, delta: CounterDelta) -> bool {
            self.calls.borrow_mut().push(format!("bump {} {:?}", task.title, delta));
            true
        }

        fn reclassify(&self, task: &TaskRecord, quadrant: Quadrant) -> bool {
            self.calls.borrow_mut().push(format!("move {} {:?}", task.title, quadrant));
            true
        }
    }

    fn sample_tasks() -> Vec<TaskRecord> {
        let mut report = sample_record("Report");
        report.importance = Level::High;
        report.urgency = Level::High;

        let mut plan = sample_record("Plan");
        plan.importance = Level::High;
        plan.line = 2;

        let mut run = sample_record("Run");
        run.habit_type = Some(HabitType::Daily);
        run.line = 3;

        let mut pushups = sample_record("Pushups");
        pushups.accumulated = true;
        pushups.accumulated_count = Some(4);
        pushups.line = 4;

        vec![report, plan, run, pushups]
    }

    fn test_app() -> AppState {
        let mut app = AppState::new(&Settings::default(), NaiveDate::from_ymd_opt(2025, 6, 8).unwrap());
        app.set_tasks(sample_tasks());
        app
    }

    #[test]
    fn test_views_are_built_from_scan() {
        let app = test_app();
        assert_eq!(app.matrix.get(Quadrant::DoFirst).len(), 1);
        assert_eq!(app.matrix.get(Quadrant::Schedule).len(), 1);
        assert_eq!(app.matrix.get(Quadrant::Eliminate).len(), 2);
        assert_eq!(app.habit_groups.len(), 1);
        assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("Report"));
    }

    #[test]
    fn test_pane_cycle_resets_selection() {
        let mut app = test_app();
        app.focus = Pane::Matrix(Quadrant::Eliminate);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.next_pane();
        assert_eq!(app.focus, Pane::Habits);
        assert_eq!(app.selected_index, 0);
        app.next_pane();
        assert_eq!(app.focus, Pane::Matrix(Quadrant::DoFirst));
    }

    #[test]
    fn test_selection_is_bounded() {
        let mut app = test_app();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
        app.move_selection_down();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_selection_clamped_after_rescan() {
        let mut app = test_app();
        app.focus = Pane::Habits;
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.set_tasks(sample_tasks().into_iter().take(3).collect());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_sort_cycle_uses_natural_direction() {
        let mut app = test_app();
        app.focus = Pane::Habits;
        app.cycle_sort();
        assert_eq!(app.sort_key, SortKey::Progress);
        assert_eq!(app.sort_direction, SortDirection::Desc);
        assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("Pushups"));

        app.flip_direction();
        assert_eq!(app.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_habit_rows_with_headers() {
        let mut app = test_app();
        assert_eq!(app.habit_rows().len(), 2);

        app.cycle_group();
        let rows = app.habit_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], HabitRow::Header(HabitGroup::Accumulated, 1));
    }

    #[test]
    fn test_actions_trigger_rescan() {
        let mut app = test_app();
        let actions = FakeActions::default();
        *actions.tasks.borrow_mut() = sample_tasks();

        app.complete_selected(&actions);
        app.move_selected(&actions, Quadrant::Delegate);
        app.move_selected(&actions, Quadrant::DoFirst);
        assert_eq!(
            *actions.calls.borrow(),
            vec!["complete Report", "rescan", "move Report Delegate", "rescan"]
        );
    }

    #[test]
    fn test_bump_requires_counter() {
        let mut app = test_app();
        let actions = FakeActions::default();

        app.bump_selected(&actions, CounterDelta::Increment);
        assert!(actions.calls.borrow().is_empty());
        assert!(app.status.is_some());
    }

    #[test]
    fn test_poll_only_reports_changes() {
        let mut app = test_app();
        let actions = FakeActions::default();
        *actions.tasks.borrow_mut() = sample_tasks();
        let start = Instant::now();

        assert!(app.poll(&actions, start));
        assert!(!app.poll(&actions, start + Duration::from_secs(1)));
        assert!(!app.poll(&actions, start + Duration::from_secs(6)));

        actions.tasks.borrow_mut().pop();
        assert!(app.poll(&actions, start + Duration::from_secs(12)));
        assert_eq!(app.tasks.len(), 3);
    }
}
