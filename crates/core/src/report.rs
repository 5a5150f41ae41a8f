//! Scoring helpers for the result report.

use std::fmt;

use crate::model::{AnswerSet, QuestionDetail, QuestionId, SubmissionResult};

/// Percentage of marks earned, `0.0` when there is nothing to score.
#[must_use]
pub fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(total) * 100.0
}

/// One-decimal percentage label, e.g. `53.8%`. Exact halves round away
/// from zero (`31.25` shows as `31.3%`).
#[must_use]
pub fn format_percentage(value: f64) -> String {
    // Only odd multiples of 0.25 sit exactly on a tenths tie.
    let quarters = value * 4.0;
    let value = if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        (value * 10.0).round() / 10.0
    } else {
        value
    };
    format!("{value:.1}%")
}

/// Coarse 3.5–9.0 rating in half-band steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BandScore(u8);

// Lowest percentage for each band, highest first. Values are half-bands.
const BAND_THRESHOLDS: [(f64, u8); 11] = [
    (90.0, 18),
    (85.0, 17),
    (80.0, 16),
    (75.0, 15),
    (70.0, 14),
    (65.0, 13),
    (60.0, 12),
    (55.0, 11),
    (50.0, 10),
    (45.0, 9),
    (40.0, 8),
];
const LOWEST_BAND: u8 = 7;

impl BandScore {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        let half_bands = BAND_THRESHOLDS
            .iter()
            .find(|(min, _)| percentage >= *min)
            .map_or(LOWEST_BAND, |(_, band)| *band);
        Self(half_bands)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    #[must_use]
    pub fn tier(self) -> BandTier {
        match self.0 {
            14.. => BandTier::Excellent,
            12..=13 => BandTier::Competent,
            _ => BandTier::NeedsImprovement,
        }
    }
}

impl fmt::Display for BandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandTier {
    Excellent,
    Competent,
    NeedsImprovement,
}

impl BandTier {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Competent => "Competent",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Correct,
    Incorrect,
    Unanswered,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Grade one answer against its key.
///
/// Comparison ignores case and surrounding whitespace; a key may list
/// comma-separated alternatives.
#[must_use]
pub fn answer_status(given: Option<&str>, expected: Option<&str>) -> AnswerStatus {
    let Some(given) = given.map(normalize).filter(|value| !value.is_empty()) else {
        return AnswerStatus::Unanswered;
    };
    let Some(expected) = expected else {
        return AnswerStatus::Incorrect;
    };
    if normalize(expected) == given || expected.split(',').any(|alt| normalize(alt) == given) {
        AnswerStatus::Correct
    } else {
        AnswerStatus::Incorrect
    }
}

/// One row of the per-question breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub question_id: QuestionId,
    pub number: u32,
    pub question_text: Option<String>,
    pub given: Option<String>,
    pub expected: Option<String>,
    pub status: AnswerStatus,
}

/// Derived, display-independent view of a `SubmissionResult`.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    pub band: BandScore,
    pub answered: usize,
    /// Seconds spent on the attempt, if known.
    pub time_taken: Option<u32>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Build the report; `measured_secs` is used when the backend did not
    /// report the time taken itself.
    #[must_use]
    pub fn from_result(result: &SubmissionResult, measured_secs: Option<u32>) -> Self {
        let percentage = percentage(result.score, result.total);
        let rows = if result.question_details.is_empty() {
            rows_from_answer_sets(&result.answers, &result.correct_answers)
        } else {
            result.question_details.iter().map(row_from_detail).collect()
        };

        Self {
            score: result.score,
            total: result.total,
            percentage,
            band: BandScore::from_percentage(percentage),
            answered: result.answers.answered_count(),
            time_taken: result.time_taken.or(measured_secs),
            rows,
        }
    }

    #[must_use]
    pub fn count(&self, status: AnswerStatus) -> usize {
        self.rows.iter().filter(|row| row.status == status).count()
    }
}

fn row_from_detail(detail: &QuestionDetail) -> ReportRow {
    let given = Some(detail.user_answer.clone()).filter(|value| !value.trim().is_empty());
    let status = match (&given, detail.is_correct) {
        (None, _) => AnswerStatus::Unanswered,
        (Some(_), true) => AnswerStatus::Correct,
        (Some(_), false) => AnswerStatus::Incorrect,
    };
    ReportRow {
        question_id: detail.question_id,
        number: detail.question_number,
        question_text: Some(detail.question_text.clone()).filter(|text| !text.is_empty()),
        given,
        expected: Some(detail.correct_answer.clone()),
        status,
    }
}

fn rows_from_answer_sets(answers: &AnswerSet, correct: &AnswerSet) -> Vec<ReportRow> {
    let mut ids = correct.ids().chain(answers.ids()).collect::<Vec<_>>();
    ids.sort();
    ids.dedup();

    ids.into_iter()
        .zip(1_u32..)
        .map(|(id, number)| {
            let given = answers.get(id).map(str::to_string);
            let expected = correct.get(id).map(str::to_string);
            ReportRow {
                question_id: id,
                number,
                question_text: None,
                status: answer_status(given.as_deref(), expected.as_deref()),
                given: given.filter(|value| !value.trim().is_empty()),
                expected,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_of_thirteen_is_band_five() {
        let value = percentage(7, 13);
        assert_eq!(format_percentage(value), "53.8%");
        let band = BandScore::from_percentage(value);
        assert_eq!(band.value(), 5.0);
        assert_eq!(band.to_string(), "5.0");
        assert_eq!(band.tier(), BandTier::NeedsImprovement);
    }

    #[test]
    fn twelve_of_thirteen_is_band_nine() {
        let value = percentage(12, 13);
        assert_eq!(format_percentage(value), "92.3%");
        let band = BandScore::from_percentage(value);
        assert_eq!(band.value(), 9.0);
        assert_eq!(band.tier().label(), "Excellent");
    }

    #[test]
    fn band_thresholds_are_inclusive() {
        assert_eq!(BandScore::from_percentage(85.0).value(), 8.5);
        assert_eq!(BandScore::from_percentage(60.0).value(), 6.0);
        assert_eq!(BandScore::from_percentage(59.9).value(), 5.5);
        assert_eq!(BandScore::from_percentage(39.9).value(), 3.5);
        assert_eq!(BandScore::from_percentage(0.0).value(), 3.5);
        assert_eq!(BandScore::from_percentage(60.0).tier(), BandTier::Competent);
    }

    #[test]
    fn exact_halves_round_up() {
        assert_eq!(format_percentage(percentage(5, 16)), "31.3%");
        assert_eq!(format_percentage(percentage(1, 16)), "6.3%");
        assert_eq!(format_percentage(percentage(3, 16)), "18.8%");
        assert_eq!(format_percentage(percentage(1, 2)), "50.0%");
        assert_eq!(format_percentage(percentage(1, 3)), "33.3%");
        assert_eq!(format_percentage(percentage(2, 3)), "66.7%");
    }

    #[test]
    fn zero_total_is_zero_percent() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(format_percentage(percentage(0, 0)), "0.0%");
    }

    #[test]
    fn answer_status_normalizes_and_accepts_alternatives() {
        assert_eq!(answer_status(Some(" true "), Some("TRUE")), AnswerStatus::Correct);
        assert_eq!(
            answer_status(Some("Canal"), Some("canal, waterway")),
            AnswerStatus::Correct
        );
        assert_eq!(
            answer_status(Some("waterway"), Some("canal, waterway")),
            AnswerStatus::Correct
        );
        assert_eq!(answer_status(Some("B"), Some("C")), AnswerStatus::Incorrect);
        assert_eq!(answer_status(Some(""), Some("C")), AnswerStatus::Unanswered);
        assert_eq!(answer_status(None, Some("C")), AnswerStatus::Unanswered);
    }

    #[test]
    fn report_from_answer_sets_counts_statuses() {
        let answers: AnswerSet = [
            (QuestionId::new(1), "A".to_string()),
            (QuestionId::new(2), "FALSE".to_string()),
        ]
        .into_iter()
        .collect();
        let correct: AnswerSet = [
            (QuestionId::new(1), "A".to_string()),
            (QuestionId::new(2), "TRUE".to_string()),
            (QuestionId::new(3), "delta".to_string()),
        ]
        .into_iter()
        .collect();
        let result = SubmissionResult::new(1, 3, answers, correct);

        let report = Report::from_result(&result, Some(95));
        assert_eq!(report.answered, 2);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.count(AnswerStatus::Correct), 1);
        assert_eq!(report.count(AnswerStatus::Incorrect), 1);
        assert_eq!(report.count(AnswerStatus::Unanswered), 1);
        assert_eq!(report.time_taken, Some(95));
    }

    #[test]
    fn backend_details_are_authoritative() {
        let mut result = SubmissionResult::new(0, 1, AnswerSet::new(), AnswerSet::new());
        result.time_taken = Some(600);
        result.question_details = vec![QuestionDetail {
            question_id: QuestionId::new(9),
            question_number: 4,
            question_type: "TEXT".into(),
            question_text: "Describe the canal.".into(),
            user_answer: "long".into(),
            correct_answer: "long".into(),
            is_correct: false,
            marks: 1,
        }];

        let report = Report::from_result(&result, Some(10));
        assert_eq!(report.time_taken, Some(600));
        assert_eq!(report.rows[0].number, 4);
        assert_eq!(report.rows[0].status, AnswerStatus::Incorrect);
    }
}
