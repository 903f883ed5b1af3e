pub mod counter;
pub mod enums;
pub mod streak;
pub mod task;
pub mod views;

pub use counter::apply_delta;
pub use enums::{CounterDelta, GroupKey, HabitType, Level, Quadrant, SortDirection, SortKey, TaskType};
pub use streak::{update_streak, StreakUpdate};
pub use task::TaskRecord;
pub use views::{group_by_quadrant, group_habits, habit_tasks, sort_habits, HabitGroup, QuadrantMap};
