use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reading_core::model::SessionId;
use sqlx::Row;

use crate::repository::{SessionHint, SessionHintRepository, StorageError};

use super::SqliteRepository;

#[async_trait]
impl SessionHintRepository for SqliteRepository {
    async fn save_hint(&self, hint: &SessionHint) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO active_session (id, session_id, started_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                session_id = excluded.session_id,
                started_at = excluded.started_at
            ",
        )
        .bind(hint.session_id.as_str())
        .bind(hint.started_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn load_hint(&self) -> Result<Option<SessionHint>, StorageError> {
        let row = sqlx::query("SELECT session_id, started_at FROM active_session WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw_id: String = row
            .try_get("session_id")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let started_at: DateTime<Utc> = row
            .try_get("started_at")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let session_id = SessionId::new(raw_id)
            .ok_or_else(|| StorageError::Serialization("blank session_id".into()))?;

        Ok(Some(SessionHint {
            session_id,
            started_at,
        }))
    }

    async fn clear_hint(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM active_session WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
