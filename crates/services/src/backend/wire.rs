//! JSON shapes exchanged with the exam backend.

use reading_core::model::{AnswerSet, Question, QuestionId, QuestionMeta, ReadingTest, SessionId};
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

#[derive(Debug, Deserialize)]
pub(crate) struct ReadingTestResponse {
    #[serde(default)]
    test_id: Option<u64>,
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    passage: Option<String>,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRecord {
    id: u64,
    question_type: String,
    question_text: String,
    #[serde(default)]
    question_number: Option<u32>,
    #[serde(default)]
    option_a: Option<String>,
    #[serde(default)]
    option_b: Option<String>,
    #[serde(default)]
    option_c: Option<String>,
    #[serde(default)]
    option_d: Option<String>,
    #[serde(default)]
    marks: Option<u32>,
}

impl QuestionRecord {
    fn into_question(self, position: u32) -> Result<Question, BackendError> {
        let meta = QuestionMeta {
            id: QuestionId::new(self.id),
            number: self.question_number.unwrap_or(position),
            text: self.question_text,
            marks: self.marks.unwrap_or(1),
        };
        let options = [self.option_a, self.option_b, self.option_c, self.option_d];
        Ok(Question::from_parts(meta, &self.question_type, options)?)
    }
}

impl ReadingTestResponse {
    /// Passage text comes from `content`, falling back to `passage`.
    pub(crate) fn into_test(self) -> Result<ReadingTest, BackendError> {
        let passage = self
            .content
            .filter(|text| !text.trim().is_empty())
            .or(self.passage)
            .unwrap_or_default();
        let questions = self
            .questions
            .into_iter()
            .zip(1_u32..)
            .map(|(record, position)| record.into_question(position))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReadingTest::new(
            self.test_id.or(self.id),
            self.title.unwrap_or_default(),
            passage,
            questions,
        ))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartSessionResponse {
    #[serde(default)]
    session_id: Option<String>,
}

impl StartSessionResponse {
    pub(crate) fn into_session_id(self) -> Result<SessionId, BackendError> {
        self.session_id
            .and_then(SessionId::new)
            .ok_or(BackendError::MissingSessionId)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EndSessionRequest<'a> {
    pub session_id: &'a SessionId,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub answers: &'a AnswerSet,
    pub session_id: &'a SessionId,
}
