use std::sync::Arc;

use reading_core::model::SessionId;
use storage::repository::{SessionHintRepository, Storage, StorageError};

use crate::Clock;
use crate::backend::{BackendConfig, ExamBackend, HttpExamBackend};
use crate::error::AppServicesError;
use crate::sessions::{SessionController, recover_abandoned_session};

/// Default time limit of one attempt.
pub const DEFAULT_TEST_MINUTES: u32 = 60;

/// Assembles app-facing services and hands out one controller per attempt.
#[derive(Clone)]
pub struct AppServices {
    backend: Arc<dyn ExamBackend>,
    hints: Arc<dyn SessionHintRepository>,
    clock: Clock,
    test_minutes: u32,
}

impl AppServices {
    #[must_use]
    pub fn new(
        backend: Arc<dyn ExamBackend>,
        storage: &Storage,
        clock: Clock,
        test_minutes: u32,
    ) -> Self {
        Self {
            backend,
            hints: Arc::clone(&storage.session_hints),
            clock,
            test_minutes,
        }
    }

    /// Build services talking HTTP to the backend, with `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client or storage cannot be initialized.
    pub async fn new_sqlite(
        config: BackendConfig,
        db_url: &str,
        clock: Clock,
        test_minutes: u32,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let backend = Arc::new(HttpExamBackend::new(config)?);
        Ok(Self::new(backend, &storage, clock, test_minutes))
    }

    /// A controller for a fresh attempt, starting in `Idle`.
    #[must_use]
    pub fn new_attempt(&self) -> Arc<SessionController> {
        Arc::new(SessionController::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.hints),
            self.clock,
            self.test_minutes,
        ))
    }

    /// End and forget an attempt abandoned by a previous run.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session hint cannot be read or cleared.
    pub async fn recover_abandoned(&self) -> Result<Option<SessionId>, StorageError> {
        recover_abandoned_session(self.backend.as_ref(), self.hints.as_ref()).await
    }

    #[must_use]
    pub fn test_minutes(&self) -> u32 {
        self.test_minutes
    }
}
