use std::time::{Duration, SystemTime};

use futures::future::BoxFuture;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::dao::{
    models::SessionRecordEntity,
    session_store::{RecordId, SessionStore},
    storage::StorageResult,
};

use super::{
    config::SqliteConfig,
    error::{SqliteDaoError, SqliteResult},
};

const CREATE_SESSIONS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS quiz_sessions (
    id TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL,
    category_name TEXT NOT NULL,
    score INTEGER NOT NULL,
    questions_answered INTEGER NOT NULL,
    started_at TEXT NOT NULL,
    ended_at TEXT NOT NULL,
    duration_secs INTEGER NOT NULL
)";

const CREATE_SESSIONS_INDEX: &str = "\
CREATE INDEX IF NOT EXISTS idx_quiz_sessions_user_started
    ON quiz_sessions (user_id, started_at DESC)";

const RECORD_COLUMNS: &str =
    "id, user_id, category_name, score, questions_answered, started_at, ended_at, duration_secs";

/// SQLite-backed [`SessionStore`] keeping records in one `quiz_sessions`
/// table. Timestamps are stored as RFC 3339 text, which also makes the
/// newest-first ordering a plain text sort.
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Open the database file, creating it and the schema when missing.
    pub async fn connect(config: SqliteConfig) -> SqliteResult<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| SqliteDaoError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|source| SqliteDaoError::Open {
                path: config.path.clone(),
                source,
            })?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> SqliteResult<()> {
        for statement in [CREATE_SESSIONS_TABLE, CREATE_SESSIONS_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|source| SqliteDaoError::Schema { source })?;
        }
        Ok(())
    }

    async fn insert(&self, record: SessionRecordEntity) -> SqliteResult<RecordId> {
        let id = record.id;
        let started_at = format_timestamp(record.started_at)?;
        let ended_at = format_timestamp(record.ended_at)?;

        sqlx::query(
            "INSERT INTO quiz_sessions \
             (id, user_id, category_name, score, questions_answered, started_at, ended_at, duration_secs) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(record.user_id)
        .bind(&record.category_name)
        .bind(record.score as i64)
        .bind(record.questions_answered as i64)
        .bind(started_at)
        .bind(ended_at)
        .bind(record.duration.as_secs() as i64)
        .execute(&self.pool)
        .await
        .map_err(|source| {
            if is_unique_violation(&source) {
                SqliteDaoError::DuplicateRecord { id }
            } else {
                SqliteDaoError::InsertRecord { id, source }
            }
        })?;

        Ok(id)
    }

    async fn load_history(
        &self,
        user_id: i64,
        limit: u32,
    ) -> SqliteResult<Vec<SessionRecordEntity>> {
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM quiz_sessions \
             WHERE user_id = ? ORDER BY started_at DESC LIMIT ?"
        ))
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|source| SqliteDaoError::LoadHistory { user_id, source })?;

        rows.iter().map(decode_row).collect()
    }

    async fn load_high_score(&self, user_id: i64, category: String) -> SqliteResult<Option<u32>> {
        let row = sqlx::query(
            "SELECT MAX(score) AS best FROM quiz_sessions \
             WHERE user_id = ? AND category_name = ?",
        )
        .bind(user_id)
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|source| SqliteDaoError::LoadHighScore { user_id, source })?;

        let best: Option<i64> = row
            .try_get("best")
            .map_err(|source| SqliteDaoError::LoadHighScore { user_id, source })?;
        Ok(best.map(|value| value as u32))
    }
}

impl SessionStore for SqliteSessionStore {
    fn record(&self, record: SessionRecordEntity) -> BoxFuture<'static, StorageResult<RecordId>> {
        let store = self.clone();
        Box::pin(async move { store.insert(record).await.map_err(Into::into) })
    }

    fn history(
        &self,
        user_id: i64,
        limit: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<SessionRecordEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.load_history(user_id, limit).await.map_err(Into::into) })
    }

    fn high_score(
        &self,
        user_id: i64,
        category: &str,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>> {
        let store = self.clone();
        let category = category.to_owned();
        Box::pin(async move {
            store
                .load_high_score(user_id, category)
                .await
                .map_err(Into::into)
        })
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation),
        _ => false,
    }
}

fn format_timestamp(time: SystemTime) -> SqliteResult<String> {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .map_err(|source| SqliteDaoError::Timestamp {
            reason: source.to_string(),
        })
}

fn parse_timestamp(value: &str) -> SqliteResult<SystemTime> {
    let parsed =
        OffsetDateTime::parse(value, &Rfc3339).map_err(|source| SqliteDaoError::Timestamp {
            reason: format!("`{value}`: {source}"),
        })?;
    Ok(parsed.into())
}

fn decode_row(row: &SqliteRow) -> SqliteResult<SessionRecordEntity> {
    let id: String = get_column(row, "id")?;
    let user_id: i64 = get_column(row, "user_id")?;
    let category_name: String = get_column(row, "category_name")?;
    let score: i64 = get_column(row, "score")?;
    let questions_answered: i64 = get_column(row, "questions_answered")?;
    let started_at: String = get_column(row, "started_at")?;
    let ended_at: String = get_column(row, "ended_at")?;
    let duration_secs: i64 = get_column(row, "duration_secs")?;

    let id = Uuid::parse_str(&id).map_err(|_| SqliteDaoError::InvalidRow {
        reason: format!("bad record id `{id}`"),
    })?;

    Ok(SessionRecordEntity {
        id,
        user_id,
        category_name,
        score: score as u32,
        questions_answered: questions_answered as u32,
        started_at: parse_timestamp(&started_at)?,
        ended_at: parse_timestamp(&ended_at)?,
        duration: Duration::from_secs(duration_secs.max(0) as u64),
    })
}

fn get_column<'r, T>(row: &'r SqliteRow, column: &str) -> SqliteResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|source| SqliteDaoError::InvalidRow {
            reason: format!("column `{column}`: {source}"),
        })
}
