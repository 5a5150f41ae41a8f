use reading_core::report::{AnswerStatus, BandScore, BandTier, Report, format_percentage};
use services::CompletedAttempt;

use crate::vm::time_fmt::format_duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub number: u32,
    pub question: String,
    pub given: String,
    pub expected: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

/// Tier-specific advice shown under the breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub class: &'static str,
    pub title: &'static str,
    pub message: String,
    pub focus: Vec<&'static str>,
}

impl FeedbackVm {
    fn for_band(band: BandScore) -> Self {
        match band.tier() {
            BandTier::Excellent => Self {
                class: "feedback feedback-excellent",
                title: "Excellent Performance!",
                message: format!(
                    "You've achieved a strong band score of {band}. Your reading comprehension \
                     skills are well-developed. Continue practicing to maintain this level of \
                     performance."
                ),
                focus: Vec::new(),
            },
            BandTier::Competent => Self {
                class: "feedback feedback-competent",
                title: "Good Performance",
                message: format!(
                    "You've achieved a competent band score of {band}. Focus on improving your \
                     reading speed and comprehension of complex passages to reach higher band \
                     scores."
                ),
                focus: Vec::new(),
            },
            BandTier::NeedsImprovement => Self {
                class: "feedback feedback-low",
                title: "Needs Improvement",
                message: format!(
                    "Your current band score of {band} indicates areas for improvement. Focus on:"
                ),
                focus: vec![
                    "Reading comprehension strategies",
                    "Time management",
                    "Vocabulary building",
                    "Practice with different question types",
                ],
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score_label: String,
    pub band_label: String,
    pub tier_label: &'static str,
    pub tier_class: &'static str,
    pub accuracy_label: String,
    pub time_label: String,
    pub answered_label: String,
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub rows: Vec<ResultRowVm>,
    pub feedback: FeedbackVm,
}

impl From<&Report> for ResultVm {
    fn from(report: &Report) -> Self {
        let tier = report.band.tier();
        Self {
            score_label: format!("{} / {}", report.score, report.total),
            band_label: format!("Band {}", report.band),
            tier_label: tier.label(),
            tier_class: tier_class(tier),
            accuracy_label: format!("{} Accuracy", format_percentage(report.percentage)),
            time_label: report
                .time_taken
                .map_or_else(|| "Not recorded".to_string(), format_duration),
            answered_label: format!("Answered: {} of {}", report.answered, report.total),
            correct: report.count(AnswerStatus::Correct),
            incorrect: report.count(AnswerStatus::Incorrect),
            unanswered: report.count(AnswerStatus::Unanswered),
            rows: report
                .rows
                .iter()
                .map(|row| {
                    let (status_label, status_class) = status_chip(row.status);
                    ResultRowVm {
                        number: row.number,
                        question: row.question_text.clone().unwrap_or_default(),
                        given: row.given.clone().unwrap_or_else(|| "-".to_string()),
                        expected: row.expected.clone().unwrap_or_else(|| "-".to_string()),
                        status_label,
                        status_class,
                    }
                })
                .collect(),
            feedback: FeedbackVm::for_band(report.band),
        }
    }
}

#[must_use]
pub fn map_attempt(attempt: &CompletedAttempt) -> ResultVm {
    ResultVm::from(&attempt.report())
}

fn tier_class(tier: BandTier) -> &'static str {
    match tier {
        BandTier::Excellent => "band band-excellent",
        BandTier::Competent => "band band-competent",
        BandTier::NeedsImprovement => "band band-low",
    }
}

fn status_chip(status: AnswerStatus) -> (&'static str, &'static str) {
    match status {
        AnswerStatus::Correct => ("Correct", "status status-correct"),
        AnswerStatus::Incorrect => ("Incorrect", "status status-incorrect"),
        AnswerStatus::Unanswered => ("Unanswered", "status status-unanswered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reading_core::model::{AnswerSet, QuestionId, SubmissionResult};

    fn answers(pairs: &[(u64, &str)]) -> AnswerSet {
        pairs
            .iter()
            .map(|(id, value)| (QuestionId::new(*id), (*value).to_string()))
            .collect()
    }

    #[test]
    fn seven_of_thirteen_maps_to_band_five() {
        let given = answers(&[(1, "B"), (2, "true"), (3, "")]);
        let expected = answers(&[(1, "B"), (2, "FALSE"), (3, "canal")]);
        let mut result = SubmissionResult::new(7, 13, given, expected);
        result.time_taken = Some(1800);
        let vm = map_attempt(&CompletedAttempt {
            result,
            elapsed_secs: Some(12),
        });

        assert_eq!(vm.score_label, "7 / 13");
        assert_eq!(vm.band_label, "Band 5.0");
        assert_eq!(vm.tier_label, "Needs Improvement");
        assert_eq!(vm.accuracy_label, "53.8% Accuracy");
        assert_eq!(vm.time_label, "30m 0s");
        assert_eq!(vm.answered_label, "Answered: 2 of 13");
        assert_eq!((vm.correct, vm.incorrect, vm.unanswered), (1, 1, 1));
        assert_eq!(vm.rows[2].given, "-");
        assert_eq!(vm.feedback.title, "Needs Improvement");
        assert!(vm.feedback.message.contains("band score of 5.0"));
        assert_eq!(vm.feedback.focus.len(), 4);
    }

    #[test]
    fn falls_back_to_measured_time() {
        let result = SubmissionResult::new(12, 13, AnswerSet::new(), AnswerSet::new());
        let vm = map_attempt(&CompletedAttempt {
            result,
            elapsed_secs: Some(75),
        });
        assert_eq!(vm.band_label, "Band 9.0");
        assert_eq!(vm.tier_label, "Excellent");
        assert_eq!(vm.time_label, "1m 15s");
        assert_eq!(vm.feedback.title, "Excellent Performance!");
        assert!(vm.feedback.focus.is_empty());
    }

    #[test]
    fn competent_band_gets_speed_advice() {
        let result = SubmissionResult::new(8, 13, AnswerSet::new(), AnswerSet::new());
        let vm = map_attempt(&CompletedAttempt {
            result,
            elapsed_secs: None,
        });
        assert_eq!(vm.band_label, "Band 6.0");
        assert_eq!(vm.feedback.title, "Good Performance");
        assert!(vm.feedback.message.contains("competent band score of 6.0"));
    }
}
