//! Error types shared by the SQLite storage implementation.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Convenient result alias returning [`SqliteDaoError`] failures.
pub type SqliteResult<T> = Result<T, SqliteDaoError>;

/// Failures that can occur while interacting with the SQLite database.
#[derive(Debug, Error)]
pub enum SqliteDaoError {
    /// The directory that should hold the database could not be created.
    #[error("failed to create database directory `{}`", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The database file could not be opened or created.
    #[error("failed to open SQLite database at `{}`", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },
    /// Schema bootstrap failed.
    #[error("failed to prepare SQLite schema")]
    Schema {
        #[source]
        source: sqlx::Error,
    },
    /// Inserting a session record failed.
    #[error("failed to insert session record `{id}`")]
    InsertRecord {
        id: Uuid,
        #[source]
        source: sqlx::Error,
    },
    /// A record with the same primary key already exists.
    #[error("session record `{id}` already exists")]
    DuplicateRecord { id: Uuid },
    /// Reading session records failed.
    #[error("failed to load session history for user {user_id}")]
    LoadHistory {
        user_id: i64,
        #[source]
        source: sqlx::Error,
    },
    /// Reading the per-category best score failed.
    #[error("failed to load high score for user {user_id}")]
    LoadHighScore {
        user_id: i64,
        #[source]
        source: sqlx::Error,
    },
    /// A timestamp could not be rendered or parsed as RFC 3339.
    #[error("invalid timestamp: {reason}")]
    Timestamp { reason: String },
    /// A stored row could not be converted back into an entity.
    #[error("invalid row in quiz_sessions: {reason}")]
    InvalidRow { reason: String },
}
