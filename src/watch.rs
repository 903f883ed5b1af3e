use crate::domain::TaskRecord;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

/// Default input poll interval of the terminal UI in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Hash of a full scan, used to tell whether anything changed between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn of(tasks: &[TaskRecord]) -> Self {
        let mut hasher = DefaultHasher::new();
        match serde_json::to_string(tasks) {
            Ok(json) => json.hash(&mut hasher),
            // Serialising plain records cannot fail in practice; hash the
            // raw lines instead of giving up on change detection.
            Err(_) => {
                for task in tasks {
                    task.content.hash(&mut hasher);
                    task.file.hash(&mut hasher);
                    task.line.hash(&mut hasher);
                }
            }
        }
        Self(hasher.finish())
    }
}

/// Periodic reconciliation of the in-memory view with the documents.
///
/// Each poll rescans everything; the new records are only handed back when
/// their fingerprint differs from the last one seen.
#[derive(Debug)]
pub struct Reconciler {
    interval: Duration,
    last_poll: Option<Instant>,
    previous: Option<Fingerprint>,
}

impl Reconciler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_poll: None,
            previous: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a poll is due at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_poll {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        }
    }

    pub fn mark_polled(&mut self, now: Instant) {
        self.last_poll = Some(now);
    }

    /// Remember a scan produced locally (e.g. right after a mutation)
    pub fn remember(&mut self, tasks: &[TaskRecord]) {
        self.previous = Some(Fingerprint::of(tasks));
    }

    /// Return the scan if it differs from the previous one
    pub fn reconcile(&mut self, tasks: Vec<TaskRecord>) -> Option<Vec<TaskRecord>> {
        let fingerprint = Fingerprint::of(&tasks);
        if self.previous == Some(fingerprint) {
            return None;
        }
        tracing::debug!(count = tasks.len(), "documents changed");
        self.previous = Some(fingerprint);
        Some(tasks)
    }
}
