use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use reading_core::model::{AnswerSet, QuestionId, ReadingTest, SessionId, SubmissionResult};
use reading_core::report::Report;
use reading_core::session::SessionEvent;
use reading_core::{Countdown, ReadingSession, SessionState, TransitionError};
use storage::repository::{SessionHint, SessionHintRepository};

use crate::Clock;
use crate::backend::ExamBackend;
use crate::error::SessionError;

/// A finished attempt, handed to the report view.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedAttempt {
    pub result: SubmissionResult,
    /// Client-measured duration of the attempt.
    pub elapsed_secs: Option<u32>,
}

impl CompletedAttempt {
    #[must_use]
    pub fn report(&self) -> Report {
        Report::from_result(&self.result, self.elapsed_secs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed(CompletedAttempt),
    /// The guard rejected the request: a submission is already in flight, or
    /// the attempt has not started or is already complete.
    Ignored,
}

/// Read model of the session for the views.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub session_id: Option<SessionId>,
    pub test: Option<ReadingTest>,
    pub answers: AnswerSet,
    pub started_at: Option<DateTime<Utc>>,
    pub time_expired: bool,
    pub submitting: bool,
    /// Whether `record_answer` would currently be accepted.
    pub accepts_answers: bool,
    pub last_failure: Option<String>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.answered_count()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.test.as_ref().map_or(0, ReadingTest::len)
    }
}

/// Drives one attempt through the backend.
///
/// The session mutex is only taken for synchronous transitions and is never
/// held across an await point.
pub struct SessionController {
    session: Mutex<ReadingSession>,
    backend: Arc<dyn ExamBackend>,
    hints: Arc<dyn SessionHintRepository>,
    clock: Clock,
    test_minutes: u32,
}

impl SessionController {
    #[must_use]
    pub fn new(
        backend: Arc<dyn ExamBackend>,
        hints: Arc<dyn SessionHintRepository>,
        clock: Clock,
        test_minutes: u32,
    ) -> Self {
        Self {
            session: Mutex::new(ReadingSession::new()),
            backend,
            hints,
            clock,
            test_minutes,
        }
    }

    fn with_session<T>(&self, f: impl FnOnce(&mut ReadingSession) -> T) -> T {
        let mut guard = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    #[must_use]
    pub fn test_minutes(&self) -> u32 {
        self.test_minutes
    }

    /// A fresh countdown for this attempt's time limit.
    #[must_use]
    pub fn countdown(&self) -> Countdown {
        Countdown::from_minutes(self.test_minutes)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.with_session(|session| session.state())
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.with_session(|session| SessionSnapshot {
            state: session.state(),
            session_id: session.session_id().cloned(),
            test: session.test().cloned(),
            answers: session.answers().clone(),
            started_at: session.started_at(),
            time_expired: session.time_expired(),
            submitting: session.is_submitting(),
            accepts_answers: session.accepts_answers(),
            last_failure: session.last_failure().map(str::to_string),
        })
    }

    /// # Errors
    ///
    /// Returns `SessionError::Transition` outside `Idle`.
    pub fn request_start(&self) -> Result<(), SessionError> {
        Ok(self.with_session(ReadingSession::request_start)?)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Transition` outside `AwaitingConfirmation`.
    pub fn cancel_start(&self) -> Result<(), SessionError> {
        Ok(self.with_session(ReadingSession::cancel_start)?)
    }

    /// Open a backend session, load the test and enter `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Start` when the backend refuses the session or
    /// the test cannot be loaded; the session stays in `AwaitingConfirmation`.
    pub async fn confirm_start(&self) -> Result<(), SessionError> {
        let state = self.state();
        if state != SessionState::AwaitingConfirmation {
            return Err(TransitionError::InvalidTransition {
                state,
                event: SessionEvent::ConfirmStart,
            }
            .into());
        }

        let session_id = match self.backend.start_session().await {
            Ok(session_id) => session_id,
            Err(err) => {
                warn!(error = %err, "session start refused");
                self.reset_failed_start();
                return Err(SessionError::Start(err));
            }
        };

        let test = match self.backend.fetch_test().await {
            Ok(test) => test,
            Err(err) => {
                warn!(error = %err, %session_id, "failed to load reading test");
                self.end_best_effort(&session_id).await;
                self.reset_failed_start();
                return Err(SessionError::Start(err));
            }
        };

        let started_at = self.clock.now();
        let questions = test.len();
        let confirmed =
            self.with_session(|session| session.confirm_start(session_id.clone(), test, started_at));
        if let Err(err) = confirmed {
            // Cancelled while the calls were in flight.
            self.end_best_effort(&session_id).await;
            return Err(err.into());
        }
        info!(%session_id, questions, minutes = self.test_minutes, "reading test started");

        let hint = SessionHint {
            session_id,
            started_at,
        };
        if let Err(err) = self.hints.save_hint(&hint).await {
            warn!(error = %err, "failed to save session hint");
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::Transition` while answers are locked or for a
    /// question that is not part of the loaded test.
    pub fn record_answer(
        &self,
        question_id: QuestionId,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        Ok(self.with_session(|session| session.record_answer(question_id, value))?)
    }

    /// Submit the current answers. At most one submission is in flight.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Submit` when the backend call fails; the
    /// session moves to `SubmitFailed` and may be retried.
    pub async fn submit(&self) -> Result<SubmitOutcome, SessionError> {
        let Some(request) = self.with_session(ReadingSession::begin_submission) else {
            return Ok(SubmitOutcome::Ignored);
        };
        info!(
            session_id = %request.session_id,
            answered = request.answers.answered_count(),
            forced = request.forced,
            "submitting reading test"
        );

        match self
            .backend
            .submit(&request.session_id, &request.answers)
            .await
        {
            Ok(result) => {
                let now = self.clock.now();
                let elapsed_secs = self.with_session(|session| {
                    let elapsed = session.elapsed_secs(now);
                    session
                        .complete_submission(result.clone())
                        .map(|()| elapsed)
                })?;
                info!(score = result.score, total = result.total, "reading test completed");
                if let Err(err) = self.hints.clear_hint().await {
                    warn!(error = %err, "failed to clear session hint");
                }
                Ok(SubmitOutcome::Completed(CompletedAttempt {
                    result,
                    elapsed_secs,
                }))
            }
            Err(err) => {
                error!(error = %err, session_id = %request.session_id, "submission failed");
                self.with_session(|session| session.fail_submission(err.to_string()))?;
                Err(SessionError::Submit(err))
            }
        }
    }

    /// Timer ran out: end the backend session and force a submission.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Submit` when the forced submission fails.
    pub async fn expire_time(&self) -> Result<SubmitOutcome, SessionError> {
        let Some(session_id) = self.with_session(ReadingSession::expire) else {
            return Ok(SubmitOutcome::Ignored);
        };
        info!(%session_id, "time expired");
        self.end_best_effort(&session_id).await;
        self.submit().await
    }

    fn reset_failed_start(&self) {
        // A start cancelled mid-flight is already back in `Idle`.
        let _ = self.with_session(ReadingSession::start_failed);
    }

    async fn end_best_effort(&self, session_id: &SessionId) {
        if let Err(err) = self.backend.end_session(session_id).await {
            warn!(error = %err, %session_id, "failed to end session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;
    use async_trait::async_trait;
    use reading_core::model::{Question, QuestionMeta};
    use reading_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    struct StaticBackend;

    #[async_trait]
    impl ExamBackend for StaticBackend {
        async fn fetch_test(&self) -> Result<ReadingTest, BackendError> {
            let meta = QuestionMeta {
                id: QuestionId::new(1),
                number: 1,
                text: "Is the canal old?".into(),
                marks: 1,
            };
            let question = Question::from_parts(meta, "TRUE_FALSE", Default::default())?;
            Ok(ReadingTest::new(Some(1), "Canal", "Passage", vec![question]))
        }

        async fn start_session(&self) -> Result<SessionId, BackendError> {
            SessionId::new("s-1").ok_or(BackendError::MissingSessionId)
        }

        async fn end_session(&self, _session_id: &SessionId) -> Result<(), BackendError> {
            Ok(())
        }

        async fn submit(
            &self,
            _session_id: &SessionId,
            answers: &AnswerSet,
        ) -> Result<SubmissionResult, BackendError> {
            Ok(SubmissionResult::new(1, 1, answers.clone(), answers.clone()))
        }
    }

    fn controller() -> SessionController {
        SessionController::new(
            Arc::new(StaticBackend),
            Arc::new(InMemoryRepository::new()),
            Clock::fixed(fixed_now()),
            60,
        )
    }

    #[tokio::test]
    async fn confirm_requires_prior_request() {
        let controller = controller();
        let err = controller.confirm_start().await.unwrap_err();
        assert!(matches!(err, SessionError::Transition(_)));
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn snapshot_tracks_progress() {
        let controller = controller();
        controller.request_start().unwrap();
        controller.confirm_start().await.unwrap();
        controller
            .record_answer(QuestionId::new(1), "TRUE")
            .unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, SessionState::InProgress);
        assert_eq!(snapshot.answered_count(), 1);
        assert_eq!(snapshot.question_count(), 1);
        assert_eq!(snapshot.started_at, Some(fixed_now()));
        assert_eq!(controller.countdown().remaining().to_string(), "60:00");
    }

    #[tokio::test]
    async fn completed_attempt_reports_measured_time() {
        let controller = controller();
        controller.request_start().unwrap();
        controller.confirm_start().await.unwrap();

        let SubmitOutcome::Completed(attempt) = controller.submit().await.unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(attempt.elapsed_secs, Some(0));
        assert_eq!(attempt.report().time_taken, Some(0));
        assert_eq!(controller.submit().await.unwrap(), SubmitOutcome::Ignored);
    }
}
