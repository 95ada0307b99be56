use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use uuid::Uuid;

/// Write-once record of a finished quiz session persisted by the storage
/// layer. Carries aggregates only, never question content.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecordEntity {
    /// Primary key of the record.
    pub id: Uuid,
    /// Chat-level identifier of the player.
    pub user_id: i64,
    /// Name of the category that was played.
    pub category_name: String,
    /// Number of correctly answered questions.
    pub score: u32,
    /// Number of questions answered before the session ended.
    pub questions_answered: u32,
    /// When the category was chosen.
    pub started_at: SystemTime,
    /// When the session ended, by completion or cancellation.
    pub ended_at: SystemTime,
    /// Wall-clock session duration, serialized as whole seconds.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub duration: Duration,
}
