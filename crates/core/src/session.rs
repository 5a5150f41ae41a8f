//! Lifecycle of a single reading-test attempt.
//!
//! The machine is synchronous and owns every piece of attempt state: the
//! server-issued session id, the loaded test, and the answer set. Network
//! calls happen outside of it, between `begin_*` and `complete_*`/`fail_*`
//! steps, so the machine never blocks.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerSet, QuestionId, ReadingTest, SessionId, SubmissionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    AwaitingConfirmation,
    InProgress,
    TimeExpired,
    Submitting,
    Completed,
    SubmitFailed,
}

impl SessionState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::InProgress => "in_progress",
            Self::TimeExpired => "time_expired",
            Self::Submitting => "submitting",
            Self::Completed => "completed",
            Self::SubmitFailed => "submit_failed",
        }
    }

}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event names used in transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    RequestStart,
    CancelStart,
    ConfirmStart,
    StartFailed,
    AnswerChanged,
    CompleteSubmission,
    FailSubmission,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RequestStart => "request_start",
            Self::CancelStart => "cancel_start",
            Self::ConfirmStart => "confirm_start",
            Self::StartFailed => "start_failed",
            Self::AnswerChanged => "answer_changed",
            Self::CompleteSubmission => "complete_submission",
            Self::FailSubmission => "fail_submission",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("{event} is not allowed while {state}")]
    InvalidTransition {
        state: SessionState,
        event: SessionEvent,
    },

    #[error("question {0} is not part of the loaded test")]
    UnknownQuestion(QuestionId),
}

/// Payload for the single outstanding submission call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub session_id: SessionId,
    pub answers: AnswerSet,
    /// True when the submission was forced by timer expiry.
    pub forced: bool,
}

#[derive(Debug, Clone)]
pub struct ReadingSession {
    state: SessionState,
    session_id: Option<SessionId>,
    test: Option<ReadingTest>,
    answers: AnswerSet,
    started_at: Option<DateTime<Utc>>,
    time_expired: bool,
    submission_in_flight: bool,
    result: Option<SubmissionResult>,
    last_failure: Option<String>,
}

impl Default for ReadingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            session_id: None,
            test: None,
            answers: AnswerSet::new(),
            started_at: None,
            time_expired: false,
            submission_in_flight: false,
            result: None,
            last_failure: None,
        }
    }

    fn invalid(&self, event: SessionEvent) -> TransitionError {
        TransitionError::InvalidTransition {
            state: self.state,
            event,
        }
    }

    /// Idle → AwaitingConfirmation.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidTransition` outside `Idle`.
    pub fn request_start(&mut self) -> Result<(), TransitionError> {
        if self.state != SessionState::Idle {
            return Err(self.invalid(SessionEvent::RequestStart));
        }
        self.state = SessionState::AwaitingConfirmation;
        Ok(())
    }

    /// AwaitingConfirmation → Idle.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidTransition` outside `AwaitingConfirmation`.
    pub fn cancel_start(&mut self) -> Result<(), TransitionError> {
        if self.state != SessionState::AwaitingConfirmation {
            return Err(self.invalid(SessionEvent::CancelStart));
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    /// AwaitingConfirmation → InProgress, once the backend issued a session
    /// and the test content has been loaded.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidTransition` outside `AwaitingConfirmation`.
    pub fn confirm_start(
        &mut self,
        session_id: SessionId,
        test: ReadingTest,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        if self.state != SessionState::AwaitingConfirmation {
            return Err(self.invalid(SessionEvent::ConfirmStart));
        }
        self.session_id = Some(session_id);
        self.test = Some(test);
        self.started_at = Some(now);
        self.state = SessionState::InProgress;
        Ok(())
    }

    /// Session creation failed; stay in AwaitingConfirmation with no session id.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidTransition` outside `AwaitingConfirmation`.
    pub fn start_failed(&mut self) -> Result<(), TransitionError> {
        if self.state != SessionState::AwaitingConfirmation {
            return Err(self.invalid(SessionEvent::StartFailed));
        }
        self.session_id = None;
        Ok(())
    }

    /// Merge one answer into the answer set (last write wins).
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidTransition` unless answers are editable
    /// and `TransitionError::UnknownQuestion` for ids not in the loaded test.
    pub fn record_answer(
        &mut self,
        question_id: QuestionId,
        value: impl Into<String>,
    ) -> Result<(), TransitionError> {
        if !self.accepts_answers() {
            return Err(self.invalid(SessionEvent::AnswerChanged));
        }
        let known = self
            .test
            .as_ref()
            .is_some_and(|test| test.contains(question_id));
        if !known {
            return Err(TransitionError::UnknownQuestion(question_id));
        }
        self.answers.record(question_id, value);
        Ok(())
    }

    /// Timer ran out: InProgress/SubmitFailed → TimeExpired.
    ///
    /// Returns the session id to end at the backend, or `None` when expiry
    /// does not apply in the current state (e.g. a submission is in flight).
    pub fn expire(&mut self) -> Option<SessionId> {
        if !matches!(
            self.state,
            SessionState::InProgress | SessionState::SubmitFailed
        ) {
            return None;
        }
        self.time_expired = true;
        self.state = SessionState::TimeExpired;
        self.session_id.clone()
    }

    /// Enter `Submitting` and arm the submission guard.
    ///
    /// Returns `None` (a no-op) while a submission is already in flight, before
    /// the attempt has started, or after it completed.
    pub fn begin_submission(&mut self) -> Option<SubmissionRequest> {
        if self.submission_in_flight {
            return None;
        }
        if !matches!(
            self.state,
            SessionState::InProgress | SessionState::TimeExpired | SessionState::SubmitFailed
        ) {
            return None;
        }
        let session_id = self.session_id.clone()?;

        self.submission_in_flight = true;
        self.state = SessionState::Submitting;
        Some(SubmissionRequest {
            session_id,
            answers: self.answers.clone(),
            forced: self.time_expired,
        })
    }

    /// Submitting → Completed.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidTransition` outside `Submitting`.
    pub fn complete_submission(&mut self, result: SubmissionResult) -> Result<(), TransitionError> {
        if self.state != SessionState::Submitting {
            return Err(self.invalid(SessionEvent::CompleteSubmission));
        }
        self.submission_in_flight = false;
        self.last_failure = None;
        self.result = Some(result);
        self.state = SessionState::Completed;
        Ok(())
    }

    /// Submitting → SubmitFailed; releases the guard so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidTransition` outside `Submitting`.
    pub fn fail_submission(&mut self, reason: impl Into<String>) -> Result<(), TransitionError> {
        if self.state != SessionState::Submitting {
            return Err(self.invalid(SessionEvent::FailSubmission));
        }
        self.submission_in_flight = false;
        self.last_failure = Some(reason.into());
        self.state = SessionState::SubmitFailed;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Answers stay editable while running and after a failed submission,
    /// until the time limit has passed.
    #[must_use]
    pub fn accepts_answers(&self) -> bool {
        match self.state {
            SessionState::InProgress => true,
            SessionState::SubmitFailed => !self.time_expired,
            _ => false,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    #[must_use]
    pub fn test(&self) -> Option<&ReadingTest> {
        self.test.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn time_expired(&self) -> bool {
        self.time_expired
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submission_in_flight
    }

    #[must_use]
    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Seconds elapsed since the attempt started, clamped at zero.
    #[must_use]
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> Option<u32> {
        let started_at = self.started_at?;
        let secs = (now - started_at).num_seconds().max(0);
        Some(u32::try_from(secs).unwrap_or(u32::MAX))
    }
}
