use serde::{Deserialize, Serialize};

/// Summary of one queue builder pass. Soft failures are accumulated here
/// instead of raised, one bad client cannot abort the rest of the cohort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueBuildReport {
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl QueueBuildReport {
    pub fn absorb(&mut self, other: QueueBuildReport) {
        self.created += other.created;
        self.skipped += other.skipped;
        self.errors.extend(other.errors);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The run did its work at this hour.
    Completed,
    /// No configured send hour matched the current UK hour. Expected and
    /// frequent, not a failure.
    SkippedWrongHour,
    /// Another run holds the lock. The next invocation retries.
    LockHeld,
}

/// Summary of one batch invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRunReport {
    pub outcome: BatchOutcome,
    pub queue: QueueBuildReport,
    pub due: usize,
    pub marked_pending: usize,
    pub rendered: usize,
    pub render_failures: usize,
    pub rollovers: usize,
    pub errors: Vec<String>,
}

impl BatchRunReport {
    pub fn new(outcome: BatchOutcome) -> Self {
        Self {
            outcome,
            queue: QueueBuildReport::default(),
            due: 0,
            marked_pending: 0,
            rendered: 0,
            render_failures: 0,
            rollovers: 0,
            errors: Vec::new(),
        }
    }

    pub fn lock_held() -> Self {
        Self::new(BatchOutcome::LockHeld)
    }

    pub fn skipped_wrong_hour() -> Self {
        Self::new(BatchOutcome::SkippedWrongHour)
    }
}
