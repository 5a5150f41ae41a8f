mod reading_vm;
mod result_vm;
mod time_fmt;

pub use reading_vm::{AnswerInput, ChoiceVm, QuestionVm, ReadingVm, TestIntent, TestPhase};
pub use result_vm::{FeedbackVm, ResultRowVm, ResultVm, map_attempt};
pub use time_fmt::format_duration;
