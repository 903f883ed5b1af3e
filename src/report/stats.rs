use crate::domain::{HabitType, Quadrant, TaskRecord};
use chrono::NaiveDate;

/// Habit statistics for one day
#[derive(Debug, Default, PartialEq)]
pub struct HabitStats {
    pub habit_count: usize,
    pub daily_count: usize,
    pub weekly_count: usize,
    pub done_today: usize,
    /// Daily habits with a live streak
    pub active_streaks: usize,
    pub best_current: Option<(String, u32)>,
    pub best_max: Option<(String, u32)>,
}

/// Accumulated counter totals
#[derive(Debug, Default, PartialEq)]
pub struct CounterStats {
    pub counter_count: usize,
    pub total: i64,
    pub negative_count: usize,
    pub highest: Option<(String, i64)>,
}

/// Tasks and planned minutes per quadrant
#[derive(Debug, PartialEq)]
pub struct QuadrantStats {
    pub quadrant: Quadrant,
    pub task_count: usize,
    pub planned_minutes: u32,
}

fn best_by<T: Ord + Copy>(tasks: &[&TaskRecord], value: impl Fn(&TaskRecord) -> T) -> Option<(String, T)> {
    tasks
        .iter()
        .copied()
        .fold(None::<(&TaskRecord, T)>, |best, task| {
            let v = value(task);
            match best {
                Some((_, b)) if b >= v => best,
                _ => Some((task, v)),
            }
        })
        .map(|(task, v)| (task.title.clone(), v))
}

/// Calculate habit statistics as of `today`
pub fn calculate_habit_stats(tasks: &[TaskRecord], today: NaiveDate) -> HabitStats {
    let habits: Vec<&TaskRecord> = tasks.iter().filter(|t| t.habit_type.is_some()).collect();
    let daily: Vec<&TaskRecord> = habits.iter().copied().filter(|t| t.is_daily_habit()).collect();

    HabitStats {
        habit_count: habits.len(),
        daily_count: daily.len(),
        weekly_count: habits
            .iter()
            .filter(|t| t.habit_type == Some(HabitType::Weekly))
            .count(),
        done_today: habits.iter().filter(|t| t.done_on(today)).count(),
        active_streaks: daily.iter().filter(|t| t.current_streak > 0).count(),
        best_current: best_by(&daily, |t| t.current_streak).filter(|(_, v)| *v > 0),
        best_max: best_by(&daily, |t| t.max_streak.max(t.current_streak)).filter(|(_, v)| *v > 0),
    }
}

pub fn calculate_counter_stats(tasks: &[TaskRecord]) -> CounterStats {
    let counters: Vec<&TaskRecord> = tasks.iter().filter(|t| t.accumulated).collect();

    CounterStats {
        counter_count: counters.len(),
        total: counters.iter().map(|t| t.progress()).sum(),
        negative_count: counters.iter().filter(|t| t.progress() < 0).count(),
        highest: best_by(&counters, |t| t.progress()),
    }
}

pub fn calculate_quadrant_stats(tasks: &[TaskRecord]) -> Vec<QuadrantStats> {
    Quadrant::all()
        .iter()
        .map(|&quadrant| {
            let members = tasks.iter().filter(|t| t.quadrant() == quadrant);
            QuadrantStats {
                quadrant,
                task_count: members.clone().count(),
                planned_minutes: members.map(|t| t.duration_minutes).sum(),
            }
        })
        .collect()
}
