use chrono::{Duration, NaiveDate};

/// Result of evaluating the streak policy for one habit on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: u32,
    /// Whether the streak fields must be written back to the line
    pub should_update: bool,
}

impl StreakUpdate {
    fn keep(streak: u32) -> Self {
        Self {
            streak,
            should_update: false,
        }
    }

    fn write(streak: u32) -> Self {
        Self {
            streak,
            should_update: true,
        }
    }

    /// New max-streak value after applying this update
    pub fn max_streak(&self, previous_max: u32) -> u32 {
        if self.should_update {
            previous_max.max(self.streak)
        } else {
            previous_max
        }
    }

    /// True when this update extends or starts a streak rather than resetting it
    pub fn is_increment(&self) -> bool {
        self.should_update && self.streak > 0
    }
}

/// Compute the streak for a habit as of `today`.
///
/// Rules are evaluated in order, first match wins:
/// 1. never done: `{0, false}`
/// 2. done today, streak already updated today: unchanged, no write
/// 3. done today, streak last updated yesterday: `+1`
/// 4. done today otherwise: fresh streak of 1
/// 5. done yesterday and streak updated yesterday: unchanged, no write
/// 6. anything else: broken, reset to 0 and write
pub fn update_streak(
    last_done: Option<NaiveDate>,
    last_streak: Option<NaiveDate>,
    current_streak: u32,
    today: NaiveDate,
) -> StreakUpdate {
    let Some(last_done) = last_done else {
        return StreakUpdate::keep(0);
    };
    let yesterday = today - Duration::days(1);

    if last_done == today {
        match last_streak {
            Some(day) if day == today => StreakUpdate::keep(current_streak),
            Some(day) if day == yesterday => StreakUpdate::write(current_streak.saturating_add(1)),
            _ => StreakUpdate::write(1),
        }
    } else if last_done == yesterday && last_streak == Some(yesterday) {
        StreakUpdate::keep(current_streak)
    } else {
        StreakUpdate::write(0)
    }
}
