use serde::{Deserialize, Serialize};

use crate::model::{AnswerSet, QuestionId};

/// Per-question breakdown returned by backends that grade individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub question_id: QuestionId,
    #[serde(default)]
    pub question_number: u32,
    #[serde(default)]
    pub question_type: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default = "default_marks")]
    pub marks: u32,
}

fn default_marks() -> u32 {
    1
}

/// Scored outcome of a submitted attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub score: u32,
    pub total: u32,
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default)]
    pub correct_answers: AnswerSet,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub band_score: Option<f64>,
    /// Seconds, as measured by the backend.
    #[serde(default)]
    pub time_taken: Option<u32>,
    #[serde(default)]
    pub question_details: Vec<QuestionDetail>,
}

impl SubmissionResult {
    /// A result carrying only the fields every backend returns.
    #[must_use]
    pub fn new(score: u32, total: u32, answers: AnswerSet, correct_answers: AnswerSet) -> Self {
        Self {
            score,
            total,
            answers,
            correct_answers,
            percentage: None,
            band_score: None,
            time_taken: None,
            question_details: Vec::new(),
        }
    }
}
