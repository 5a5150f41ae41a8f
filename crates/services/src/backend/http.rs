use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use reading_core::model::{AnswerSet, ReadingTest, SessionId, SubmissionResult};

use super::config::BackendConfig;
use super::wire::{EndSessionRequest, ReadingTestResponse, StartSessionResponse, SubmitRequest};
use super::ExamBackend;
use crate::error::BackendError;

const READING_TEST_PATH: &str = "reading-test/";
const START_SESSION_PATH: &str = "start-reading-test/";
const END_SESSION_PATH: &str = "end-session/";
const SUBMIT_PATH: &str = "submit-reading/";

/// `ExamBackend` speaking JSON over HTTP.
#[derive(Clone)]
pub struct HttpExamBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpExamBackend {
    /// # Errors
    ///
    /// Returns `BackendError::Http` if the HTTP client cannot be built.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }
}

#[async_trait]
impl ExamBackend for HttpExamBackend {
    async fn fetch_test(&self) -> Result<ReadingTest, BackendError> {
        let url = self.config.endpoint(READING_TEST_PATH)?;
        debug!(%url, "fetching reading test");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::UnexpectedStatus(response.status()));
        }
        let body: ReadingTestResponse = response.json().await?;
        body.into_test()
    }

    async fn start_session(&self) -> Result<SessionId, BackendError> {
        let url = self.config.endpoint(START_SESSION_PATH)?;
        debug!(%url, "starting session");
        let response = self.client.post(url).send().await?;
        if response.status() != StatusCode::CREATED {
            return Err(BackendError::UnexpectedStatus(response.status()));
        }
        let body: StartSessionResponse = response.json().await?;
        body.into_session_id()
    }

    async fn end_session(&self, session_id: &SessionId) -> Result<(), BackendError> {
        let url = self.config.endpoint(END_SESSION_PATH)?;
        debug!(%url, %session_id, "ending session");
        let response = self
            .client
            .post(url)
            .json(&EndSessionRequest { session_id })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::UnexpectedStatus(response.status()));
        }
        Ok(())
    }

    async fn submit(
        &self,
        session_id: &SessionId,
        answers: &AnswerSet,
    ) -> Result<SubmissionResult, BackendError> {
        let url = self.config.endpoint(SUBMIT_PATH)?;
        debug!(%url, %session_id, answers = answers.len(), "submitting answers");
        let response = self
            .client
            .post(url)
            .json(&SubmitRequest {
                answers,
                session_id,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BackendError::UnexpectedStatus(response.status()));
        }
        Ok(response.json().await?)
    }
}
