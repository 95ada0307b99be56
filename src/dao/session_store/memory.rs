//! In-memory session store for tests and storage-less deployments.

use dashmap::DashMap;
use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::SessionRecordEntity;
use crate::dao::session_store::{RecordId, SessionStore};
use crate::dao::storage::{StorageError, StorageResult};

/// Keeps session records in process memory.
///
/// Enforces the same write-once contract as the durable backends so the
/// two stay interchangeable behind [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: DashMap<Uuid, SessionRecordEntity>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn insert(&self, record: SessionRecordEntity) -> StorageResult<RecordId> {
        use dashmap::mapref::entry::Entry;

        let id = record.id;
        match self.records.entry(id) {
            Entry::Occupied(_) => Err(StorageError::Duplicate { id }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(id)
            }
        }
    }

    fn user_history(&self, user_id: i64, limit: u32) -> Vec<SessionRecordEntity> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        records.truncate(limit as usize);
        records
    }

    fn user_high_score(&self, user_id: i64, category: &str) -> Option<u32> {
        self.records
            .iter()
            .filter(|entry| entry.user_id == user_id && entry.category_name == category)
            .map(|entry| entry.score)
            .max()
    }
}

impl SessionStore for MemorySessionStore {
    fn record(&self, record: SessionRecordEntity) -> BoxFuture<'static, StorageResult<RecordId>> {
        let result = self.insert(record);
        Box::pin(async move { result })
    }

    fn history(
        &self,
        user_id: i64,
        limit: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<SessionRecordEntity>>> {
        let records = self.user_history(user_id, limit);
        Box::pin(async move { Ok(records) })
    }

    fn high_score(
        &self,
        user_id: i64,
        category: &str,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>> {
        let best = self.user_high_score(user_id, category);
        Box::pin(async move { Ok(best) })
    }
}
