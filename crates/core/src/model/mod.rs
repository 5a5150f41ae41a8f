mod answers;
mod ids;
mod question;
mod result;

pub use answers::AnswerSet;
pub use ids::{ParseIdError, QuestionId, SessionId};
pub use question::{
    ChoiceKey, ChoiceOption, Question, QuestionError, QuestionKind, QuestionMeta,
    TRUE_FALSE_NOT_GIVEN,
};
pub use result::{QuestionDetail, SubmissionResult};
pub use reading_test::ReadingTest;
