//! The external exam backend: test content, session lifecycle and scoring.

mod config;
mod http;
mod wire;

use async_trait::async_trait;

use reading_core::model::{AnswerSet, ReadingTest, SessionId, SubmissionResult};

use crate::error::BackendError;

pub use config::{BackendConfig, DEFAULT_API_URL};
pub use http::HttpExamBackend;

/// The four calls the client makes against the backend.
#[async_trait]
pub trait ExamBackend: Send + Sync {
    /// Load the passage and its questions.
    async fn fetch_test(&self) -> Result<ReadingTest, BackendError>;

    /// Open a session. Only a `201 Created` carrying a session id counts as success.
    async fn start_session(&self) -> Result<SessionId, BackendError>;

    /// Tell the backend the attempt is over. Callers treat this as best-effort.
    async fn end_session(&self, session_id: &SessionId) -> Result<(), BackendError>;

    /// Submit the answer set for scoring.
    async fn submit(
        &self,
        session_id: &SessionId,
        answers: &AnswerSet,
    ) -> Result<SubmissionResult, BackendError>;
}
