use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reading_core::model::SessionId;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Locally persisted pointer to the attempt that is currently running.
///
/// This is a recovery hint only: the live session id is owned by the
/// in-memory session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHint {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
}

/// Repository contract for the single active-session hint.
#[async_trait]
pub trait SessionHintRepository: Send + Sync {
    /// Store `hint`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the hint cannot be stored.
    async fn save_hint(&self, hint: &SessionHint) -> Result<(), StorageError>;

    /// Fetch the stored hint, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the hint cannot be read or decoded.
    async fn load_hint(&self) -> Result<Option<SessionHint>, StorageError>;

    /// Remove the stored hint. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the hint cannot be removed.
    async fn clear_hint(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    hint: Arc<Mutex<Option<SessionHint>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionHintRepository for InMemoryRepository {
    async fn save_hint(&self, hint: &SessionHint) -> Result<(), StorageError> {
        let mut guard = self
            .hint
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(hint.clone());
        Ok(())
    }

    async fn load_hint(&self) -> Result<Option<SessionHint>, StorageError> {
        let guard = self
            .hint
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn clear_hint(&self) -> Result<(), StorageError> {
        let mut guard = self
            .hint
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.take();
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub session_hints: Arc<dyn SessionHintRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let session_hints: Arc<dyn SessionHintRepository> = Arc::new(repo);
        Self { session_hints }
    }
}
