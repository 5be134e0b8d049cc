use crate::duration::Duration;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecurrencePattern {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

/// Recurrence definition attached to at most one task.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecurringTask {
    pub start: Option<NaiveDate>,
    pub finish: Option<NaiveDate>,
    pub duration: Option<Duration>,
    pub occurrences: Option<u32>,
    pub pattern: RecurrencePattern,
    /// Recur every `interval` periods of `pattern`.
    pub interval: u32,
}
