//! Service helpers exposing recorded quiz history.

use crate::{
    dto::history::{HighScore, HistoryEntry},
    error::ServiceError,
    state::{SharedState, session::UserId},
};

/// Return the player's most recent recorded runs, newest first.
pub async fn history(
    state: &SharedState,
    user_id: UserId,
) -> Result<Vec<HistoryEntry>, ServiceError> {
    let store = state.session_store().await.ok_or(ServiceError::Degraded)?;
    let records = store.history(user_id, state.config().history_limit).await?;
    Ok(records.into_iter().map(HistoryEntry::from).collect())
}

/// Return the player's best recorded score in one category, zero when the
/// category has never been played.
pub async fn high_score(
    state: &SharedState,
    user_id: UserId,
    category: &str,
) -> Result<HighScore, ServiceError> {
    let store = state.session_store().await.ok_or(ServiceError::Degraded)?;
    let best = store.high_score(user_id, category).await?;
    Ok(HighScore {
        category: category.to_string(),
        best_score: best.unwrap_or(0),
    })
}
