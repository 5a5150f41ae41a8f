#![forbid(unsafe_code)]

pub mod app_services;
pub mod backend;
pub mod error;
pub mod sessions;
pub mod timer;

pub use reading_core::Clock;

pub use app_services::{AppServices, DEFAULT_TEST_MINUTES};
pub use backend::{BackendConfig, ExamBackend, HttpExamBackend};
pub use error::{AppServicesError, BackendError, SessionError};
pub use sessions::{CompletedAttempt, SessionController, SessionSnapshot, SubmitOutcome};
pub use timer::{CountdownTimer, TimerEvent};
