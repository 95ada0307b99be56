use serde::Serialize;
use uuid::Uuid;

use crate::dao::models::SessionRecordEntity;
use crate::dto::format_system_time;

/// One persisted session as shown in a player's history.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub category: String,
    pub score: u32,
    pub questions_answered: u32,
    /// RFC 3339 rendering of the session start.
    pub started_at: String,
    /// RFC 3339 rendering of the session end.
    pub ended_at: String,
    pub duration_seconds: u64,
}

impl From<SessionRecordEntity> for HistoryEntry {
    fn from(value: SessionRecordEntity) -> Self {
        Self {
            id: value.id,
            category: value.category_name,
            score: value.score,
            questions_answered: value.questions_answered,
            started_at: format_system_time(value.started_at),
            ended_at: format_system_time(value.ended_at),
            duration_seconds: value.duration.as_secs(),
        }
    }
}

/// Best result a player reached in one category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HighScore {
    pub category: String,
    /// Best score across recorded sessions; 0 when the category was never
    /// played.
    pub best_score: u32,
}
