use crate::duration::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RelationType {
    #[default]
    FinishToStart,
    StartToStart,
    FinishToFinish,
    StartToFinish,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::FinishToStart => "FS",
            RelationType::StartToStart => "SS",
            RelationType::FinishToFinish => "FF",
            RelationType::StartToFinish => "SF",
        }
    }
}

/// Link to another task, by id or by unique id depending on which list holds it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub task_id: i32,
    pub kind: RelationType,
    pub lag: Duration,
}

impl Relation {
    pub fn new(task_id: i32, kind: RelationType, lag: Duration) -> Self {
        Self { task_id, kind, lag }
    }

    pub fn finish_to_start(task_id: i32) -> Self {
        Self::new(task_id, RelationType::FinishToStart, Duration::days(0.0))
    }
}
