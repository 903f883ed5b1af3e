use super::enums::{GroupKey, HabitType, Quadrant, SortDirection, SortKey, TaskType};
use super::task::TaskRecord;
use std::cmp::Ordering;

/// Tasks partitioned into the four matrix quadrants, input order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadrantMap {
    do_first: Vec<TaskRecord>,
    schedule: Vec<TaskRecord>,
    delegate: Vec<TaskRecord>,
    eliminate: Vec<TaskRecord>,
}

impl QuadrantMap {
    pub fn get(&self, quadrant: Quadrant) -> &[TaskRecord] {
        match quadrant {
            Quadrant::DoFirst => &self.do_first,
            Quadrant::Schedule => &self.schedule,
            Quadrant::Delegate => &self.delegate,
            Quadrant::Eliminate => &self.eliminate,
        }
    }

    fn get_mut(&mut self, quadrant: Quadrant) -> &mut Vec<TaskRecord> {
        match quadrant {
            Quadrant::DoFirst => &mut self.do_first,
            Quadrant::Schedule => &mut self.schedule,
            Quadrant::Delegate => &mut self.delegate,
            Quadrant::Eliminate => &mut self.eliminate,
        }
    }

    /// Quadrants in matrix reading order with their tasks
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &[TaskRecord])> {
        Quadrant::all().iter().map(move |q| (*q, self.get(*q)))
    }

    /// Total number of tasks across all quadrants
    pub fn len(&self) -> usize {
        self.iter().map(|(_, tasks)| tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition tasks by importance x urgency
pub fn group_by_quadrant(tasks: &[TaskRecord]) -> QuadrantMap {
    let mut map = QuadrantMap::default();
    for task in tasks {
        map.get_mut(task.quadrant()).push(task.clone());
    }
    map
}

/// Order tasks for the habit list.
///
/// - `Default`: input order.
/// - `Progress`: accumulated tasks first, by counter (highest first when
///   descending).
/// - `StartDate`: dated tasks first, by date (earliest first when ascending).
///
/// The sort is stable, and tasks without the sort attribute always stay at the end.
pub fn sort_habits(tasks: &[TaskRecord], key: SortKey, direction: SortDirection) -> Vec<TaskRecord> {
    let mut sorted = tasks.to_vec();

    let directed = |ord: Ordering| match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    };

    match key {
        SortKey::Default => {}
        SortKey::Progress => sorted.sort_by(|a, b| match (a.accumulated, b.accumulated) {
            (true, true) => directed(a.progress().cmp(&b.progress())),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }),
        SortKey::StartDate => sorted.sort_by(|a, b| match (a.start_date, b.start_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }

    sorted
}

/// Display partition of the habit list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HabitGroup {
    /// Everything, when no grouping is selected
    All,
    Accumulated,
    /// Habits tracked by completion dates rather than a counter
    Tracked,
    Daily,
    Weekly,
    Scheduled,
}

impl HabitGroup {
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Accumulated => "Accumulated",
            Self::Tracked => "Tracked",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Scheduled => "Scheduled",
        }
    }

    /// Group of a task under `key`, or None when it falls outside the grouping
    pub fn of(task: &TaskRecord, key: GroupKey) -> Option<Self> {
        match key {
            GroupKey::None => Some(Self::All),
            GroupKey::Accumulated => Some(if task.accumulated {
                Self::Accumulated
            } else {
                Self::Tracked
            }),
            GroupKey::Category => match (task.task_type, task.habit_type) {
                (TaskType::Scheduled, _) => Some(Self::Scheduled),
                (_, Some(HabitType::Daily)) => Some(Self::Daily),
                (_, Some(HabitType::Weekly)) => Some(Self::Weekly),
                _ => None,
            },
        }
    }

    fn order(key: GroupKey) -> &'static [HabitGroup] {
        match key {
            GroupKey::None => &[HabitGroup::All],
            GroupKey::Accumulated => &[HabitGroup::Accumulated, HabitGroup::Tracked],
            GroupKey::Category => &[HabitGroup::Daily, HabitGroup::Weekly, HabitGroup::Scheduled],
        }
    }
}

/// Partition tasks into display groups.
///
/// Groups come in a fixed order, empty groups are omitted, and each group
/// keeps the order of `tasks`. Every task appears in at most one group.
pub fn group_habits(tasks: &[TaskRecord], key: GroupKey) -> Vec<(HabitGroup, Vec<TaskRecord>)> {
    HabitGroup::order(key)
        .iter()
        .map(|group| {
            let members: Vec<TaskRecord> = tasks
                .iter()
                .filter(|task| HabitGroup::of(task, key) == Some(*group))
                .cloned()
                .collect();
            (*group, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}

/// Habits (date-tracked or accumulated) and scheduled tasks, for the habit list
pub fn habit_tasks(tasks: &[TaskRecord]) -> Vec<TaskRecord> {
    tasks
        .iter()
        .filter(|t| t.is_habit() || t.task_type == TaskType::Scheduled)
        .cloned()
        .collect()
}
