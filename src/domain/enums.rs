use serde::{Deserialize, Serialize};

/// Importance or urgency level of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    #[default]
    Low,
}

impl Level {
    /// Parse level from annotation value like "high" (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "high" => Some(Self::High),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Convert level to annotation value
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

/// Recurrence of a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    Daily,
    Weekly,
}

impl HabitType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

/// Derived kind of a task, mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    /// Carries a scheduled date
    Scheduled,
    /// Carries a habit type (daily or weekly)
    RepeatedDaily,
    Regular,
}

/// One of the four importance x urgency buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    /// Important and urgent
    DoFirst,
    /// Important, not urgent
    Schedule,
    /// Urgent, not important
    Delegate,
    /// Neither
    Eliminate,
}

impl Quadrant {
    /// Quadrant for an (importance, urgency) pair
    pub fn from_levels(importance: Level, urgency: Level) -> Self {
        match (importance, urgency) {
            (Level::High, Level::High) => Self::DoFirst,
            (Level::High, Level::Low) => Self::Schedule,
            (Level::Low, Level::High) => Self::Delegate,
            (Level::Low, Level::Low) => Self::Eliminate,
        }
    }

    /// (importance, urgency) pair for this quadrant
    pub fn levels(&self) -> (Level, Level) {
        match self {
            Self::DoFirst => (Level::High, Level::High),
            Self::Schedule => (Level::High, Level::Low),
            Self::Delegate => (Level::Low, Level::High),
            Self::Eliminate => (Level::Low, Level::Low),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DoFirst => "Do First",
            Self::Schedule => "Schedule",
            Self::Delegate => "Delegate",
            Self::Eliminate => "Eliminate",
        }
    }

    /// Short "importance/urgency" label, e.g. "high/low"
    pub fn label(&self) -> String {
        let (importance, urgency) = self.levels();
        format!("{}/{}", importance.to_tag(), urgency.to_tag())
    }

    /// Parse from a 1-based matrix position or a name like "do-first"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().replace(['_', ' '], "-").as_str() {
            "1" | "do-first" | "high/high" => Some(Self::DoFirst),
            "2" | "schedule" | "high/low" => Some(Self::Schedule),
            "3" | "delegate" | "low/high" => Some(Self::Delegate),
            "4" | "eliminate" | "low/low" => Some(Self::Eliminate),
            _ => None,
        }
    }

    /// All quadrants in matrix reading order
    pub fn all() -> &'static [Quadrant] {
        &[
            Quadrant::DoFirst,
            Quadrant::Schedule,
            Quadrant::Delegate,
            Quadrant::Eliminate,
        ]
    }
}

/// Habit ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Default,
    Progress,
    StartDate,
}

impl SortKey {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().replace('_', "-").as_str() {
            "default" | "none" => Some(Self::Default),
            "progress" => Some(Self::Progress),
            "start-date" | "start" | "startdate" => Some(Self::StartDate),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Progress => "progress",
            Self::StartDate => "start date",
        }
    }

    /// The direction each key reads best in
    pub fn natural_direction(&self) -> SortDirection {
        match self {
            Self::Progress => SortDirection::Desc,
            Self::Default | Self::StartDate => SortDirection::Asc,
        }
    }

    /// Next key when cycling through keys in the UI
    pub fn next(&self) -> Self {
        match self {
            Self::Default => Self::Progress,
            Self::Progress => Self::StartDate,
            Self::StartDate => Self::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn flip(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// How the habit list is partitioned for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    #[default]
    None,
    /// Accumulated counters vs. date-tracked habits
    Accumulated,
    /// Daily, weekly and scheduled tasks
    Category,
}

impl GroupKey {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "accumulated" => Some(Self::Accumulated),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::None => Self::Accumulated,
            Self::Accumulated => Self::Category,
            Self::Category => Self::None,
        }
    }
}

/// Requested change to an accumulated counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterDelta {
    Increment,
    Decrement,
    Reset,
}

impl CounterDelta {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "+1" | "up" | "inc" | "increment" => Some(Self::Increment),
            "-1" | "down" | "dec" | "decrement" => Some(Self::Decrement),
            "0" | "reset" | "clear" => Some(Self::Reset),
            _ => None,
        }
    }
}
