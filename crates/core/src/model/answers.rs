use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Answers entered by the candidate, keyed by question.
///
/// Entries are only ever inserted or overwritten (last write wins), never
/// removed. Serializes as a JSON object with stringified question ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, String>);

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the answer for `id`, returning the previous value.
    pub fn record(&mut self, id: QuestionId, value: impl Into<String>) -> Option<String> {
        self.0.insert(id, value.into())
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries with a non-blank value.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.0.values().filter(|value| !value.trim().is_empty()).count()
    }

    pub fn ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(QuestionId, String)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_per_question() {
        let events = [
            (1, "A"),
            (3, "TRUE"),
            (1, "C"),
            (7, "river"),
            (3, "NOT_GIVEN"),
            (1, "B"),
        ];
        let mut answers = AnswerSet::new();
        for (id, value) in events {
            answers.record(QuestionId::new(id), value);
        }

        let touched = answers.ids().map(|id| id.value()).collect::<Vec<_>>();
        assert_eq!(touched, vec![1, 3, 7]);
        assert_eq!(answers.get(QuestionId::new(1)), Some("B"));
        assert_eq!(answers.get(QuestionId::new(3)), Some("NOT_GIVEN"));
        assert_eq!(answers.get(QuestionId::new(7)), Some("river"));
    }

    #[test]
    fn answered_count_ignores_blank_values() {
        let mut answers = AnswerSet::new();
        answers.record(QuestionId::new(1), "A");
        answers.record(QuestionId::new(2), "  ");
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.answered_count(), 1);
    }

    #[test]
    fn serializes_with_string_keys() {
        let mut answers = AnswerSet::new();
        answers.record(QuestionId::new(12), "FALSE");
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"12":"FALSE"}"#);

        let parsed: AnswerSet = serde_json::from_str(r#"{"4":"D","12":"x"}"#).unwrap();
        assert_eq!(parsed.get(QuestionId::new(4)), Some("D"));
        assert_eq!(parsed.len(), 2);
    }
}
