use reading_core::SessionState;
use reading_core::model::{Question, QuestionId, TRUE_FALSE_NOT_GIVEN};
use services::SessionSnapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestIntent {
    RequestStart,
    CancelStart,
    ConfirmStart,
    Answer(QuestionId, String),
    Submit,
    TimeExpired,
    DismissAlert,
}

/// Which screen of the test page is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestPhase {
    Welcome,
    Confirm,
    Running,
    Finished,
}

impl TestPhase {
    #[must_use]
    pub fn from_state(state: SessionState) -> Self {
        match state {
            SessionState::Idle => Self::Welcome,
            SessionState::AwaitingConfirmation => Self::Confirm,
            SessionState::InProgress
            | SessionState::TimeExpired
            | SessionState::Submitting
            | SessionState::SubmitFailed => Self::Running,
            SessionState::Completed => Self::Finished,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub value: &'static str,
    pub label: String,
}

/// Input affordance for one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerInput {
    Choice(Vec<ChoiceVm>),
    Line { placeholder: &'static str },
    Paragraph,
    Unsupported { tag: String },
}

impl AnswerInput {
    #[must_use]
    pub fn for_question(question: &Question) -> Self {
        match question {
            Question::MultipleChoice { options, .. } => Self::Choice(
                options
                    .iter()
                    .map(|option| ChoiceVm {
                        value: option.key.as_str(),
                        label: format!("{}. {}", option.key.as_str(), option.text),
                    })
                    .collect(),
            ),
            Question::TrueFalseNotGiven { .. } => Self::Choice(
                TRUE_FALSE_NOT_GIVEN
                    .iter()
                    .map(|&(value, label)| ChoiceVm {
                        value,
                        label: label.to_string(),
                    })
                    .collect(),
            ),
            Question::FillBlank { .. } => Self::Line {
                placeholder: "Type your answer",
            },
            Question::Matching { .. } => Self::Line {
                placeholder: "Enter the matching letter or number",
            },
            Question::FreeText { .. } => Self::Paragraph,
            Question::Unsupported { tag, .. } => Self::Unsupported { tag: tag.clone() },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub number: u32,
    pub text: String,
    pub type_label: String,
    pub input: AnswerInput,
    pub value: String,
    pub answered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadingVm {
    pub phase: TestPhase,
    pub title: String,
    pub paragraphs: Vec<String>,
    pub questions: Vec<QuestionVm>,
    pub progress_label: String,
    /// Share of questions answered, 0 to 100.
    pub progress_percent: usize,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub inputs_locked: bool,
    pub time_expired: bool,
    pub failure: Option<String>,
}

impl ReadingVm {
    /// `pending` covers the gap between a submit click and the controller
    /// arming its guard.
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot, pending: bool) -> Self {
        let submitting = snapshot.submitting || pending;
        let (title, paragraphs, questions) = match snapshot.test.as_ref() {
            Some(test) => (
                test.title().to_string(),
                split_paragraphs(test.passage()),
                test.questions()
                    .iter()
                    .map(|question| {
                        let value = snapshot
                            .answers
                            .get(question.id())
                            .unwrap_or_default()
                            .to_string();
                        QuestionVm {
                            id: question.id(),
                            number: question.meta().number,
                            text: question.text().to_string(),
                            type_label: question.type_label().to_string(),
                            input: AnswerInput::for_question(question),
                            answered: !value.trim().is_empty(),
                            value,
                        }
                    })
                    .collect::<Vec<_>>(),
            ),
            None => (String::new(), Vec::new(), Vec::new()),
        };

        let failure = (snapshot.state == SessionState::SubmitFailed)
            .then(|| snapshot.last_failure.clone())
            .flatten();

        let answered = snapshot.answered_count();
        let progress_percent = if questions.is_empty() {
            0
        } else {
            (answered * 100 / questions.len()).min(100)
        };

        Self {
            phase: TestPhase::from_state(snapshot.state),
            title,
            paragraphs,
            progress_label: format!(
                "Progress: {answered} of {} questions answered",
                questions.len()
            ),
            progress_percent,
            questions,
            submit_label: submit_label(submitting, snapshot.time_expired, failure.is_some()),
            submit_disabled: submitting
                || !matches!(
                    snapshot.state,
                    SessionState::InProgress | SessionState::TimeExpired | SessionState::SubmitFailed
                ),
            inputs_locked: !snapshot.accepts_answers || submitting,
            time_expired: snapshot.time_expired,
            failure,
        }
    }
}

fn submit_label(submitting: bool, time_expired: bool, failed: bool) -> &'static str {
    if submitting {
        "Submitting..."
    } else if failed {
        "Retry Submission"
    } else if time_expired {
        "Time's Up!"
    } else {
        "Submit Reading Test"
    }
}

/// Blank lines separate paragraphs.
fn split_paragraphs(passage: &str) -> Vec<String> {
    passage
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(str::to_string)
        .collect()
}
