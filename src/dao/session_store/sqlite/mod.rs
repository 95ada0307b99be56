mod config;
mod error;
mod store;

#[allow(unused_imports)]
pub use config::SqliteConfig;
#[allow(unused_imports)]
pub use store::SqliteSessionStore;

use crate::dao::storage::StorageError;
use error::SqliteDaoError;

impl From<SqliteDaoError> for StorageError {
    fn from(err: SqliteDaoError) -> Self {
        match err {
            SqliteDaoError::DuplicateRecord { id } => StorageError::Duplicate { id },
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
