//! Shared error types for the services crate.

use thiserror::Error;

use reading_core::TransitionError;
use reading_core::model::QuestionError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ExamBackend` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("backend request failed with status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
    #[error("backend did not return a session id")]
    MissingSessionId,
    #[error("backend returned an invalid question: {0}")]
    InvalidQuestion(#[from] QuestionError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `SessionController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("failed to start test: {0}")]
    Start(#[source] BackendError),
    #[error("failed to submit answers: {0}")]
    Submit(#[source] BackendError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
