use std::error::Error;

use thiserror::Error;
use uuid::Uuid;

/// Outcome of a storage call, shared by every backend.
pub type StorageResult<T> = Result<T, StorageError>;

/// Backend-agnostic storage failure.
///
/// Backends map their driver errors into these two cases so the service
/// layer never depends on a concrete database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not serve the call at all.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A record with this identifier was already written once.
    #[error("session record `{id}` already exists")]
    Duplicate { id: Uuid },
}

impl StorageError {
    /// Wrap a driver failure as [`StorageError::Unavailable`].
    pub fn unavailable(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        StorageError::Unavailable {
            message: message.into(),
            source: Box::new(source),
        }
    }
}
