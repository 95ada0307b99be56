mod memory;
#[cfg(feature = "sqlite-store")]
pub mod sqlite;

pub use memory::MemorySessionStore;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::SessionRecordEntity;
use crate::dao::storage::StorageResult;

/// Identifier a stored session record is addressable by.
pub type RecordId = Uuid;

/// Abstraction over the persistence layer for finished session records.
///
/// Records are write-once: a second `record` call with an id already stored
/// is rejected by every backend.
pub trait SessionStore: Send + Sync {
    fn record(&self, record: SessionRecordEntity) -> BoxFuture<'static, StorageResult<RecordId>>;
    fn history(
        &self,
        user_id: i64,
        limit: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<SessionRecordEntity>>>;
    fn high_score(
        &self,
        user_id: i64,
        category: &str,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>>;
}
