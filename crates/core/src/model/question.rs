use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id must be positive")]
    InvalidId,

    #[error("question {id} has no text")]
    EmptyText { id: QuestionId },
}

//
// ─── TYPE TAG ─────────────────────────────────────────────────────────────────
//

/// Wire-level question type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalseNotGiven,
    FillBlank,
    Matching,
    FreeText,
}

impl QuestionKind {
    /// Parses a backend tag (`MCQ`, `TRUE_FALSE`, `FILL_BLANK`, `MATCHING`, `TEXT`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "MCQ" => Some(Self::MultipleChoice),
            "TRUE_FALSE" => Some(Self::TrueFalseNotGiven),
            "FILL_BLANK" => Some(Self::FillBlank),
            "MATCHING" => Some(Self::Matching),
            "TEXT" => Some(Self::FreeText),
            _ => None,
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::MultipleChoice => "MCQ",
            Self::TrueFalseNotGiven => "TRUE_FALSE",
            Self::FillBlank => "FILL_BLANK",
            Self::Matching => "MATCHING",
            Self::FreeText => "TEXT",
        }
    }

    /// Human-readable label shown next to each question.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MultipleChoice => "Multiple Choice",
            Self::TrueFalseNotGiven => "True/False/Not Given",
            Self::FillBlank => "Fill in the Blanks",
            Self::Matching => "Matching",
            Self::FreeText => "Written Answer",
        }
    }
}

//
// ─── OPTIONS ──────────────────────────────────────────────────────────────────
//

/// Answer key of a multiple-choice option. The key is what gets submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChoiceKey {
    A,
    B,
    C,
    D,
}

impl ChoiceKey {
    pub const ALL: [ChoiceKey; 4] = [ChoiceKey::A, ChoiceKey::B, ChoiceKey::C, ChoiceKey::D];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub key: ChoiceKey,
    pub text: String,
}

/// Submitted values and labels for a true/false/not-given question.
pub const TRUE_FALSE_NOT_GIVEN: [(&str, &str); 3] = [
    ("TRUE", "True"),
    ("FALSE", "False"),
    ("NOT_GIVEN", "Not Given"),
];

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// Fields every question carries regardless of its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionMeta {
    pub id: QuestionId,
    pub number: u32,
    pub text: String,
    pub marks: u32,
}

/// A read-only question supplied by the backend.
///
/// Each variant carries only what its input affordance needs. Unknown backend
/// tags are kept as `Unsupported` so a single bad question does not fail the
/// whole test load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    MultipleChoice {
        meta: QuestionMeta,
        options: Vec<ChoiceOption>,
    },
    TrueFalseNotGiven {
        meta: QuestionMeta,
    },
    FillBlank {
        meta: QuestionMeta,
    },
    Matching {
        meta: QuestionMeta,
    },
    FreeText {
        meta: QuestionMeta,
    },
    Unsupported {
        meta: QuestionMeta,
        tag: String,
    },
}

impl Question {
    /// Build a question from its backend shape.
    ///
    /// `options` are the raw `option_a`..`option_d` slots; blank slots are
    /// skipped and only multiple-choice questions keep them.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidId` for a zero id and
    /// `QuestionError::EmptyText` when the prompt is blank.
    pub fn from_parts(
        meta: QuestionMeta,
        tag: &str,
        options: [Option<String>; 4],
    ) -> Result<Self, QuestionError> {
        if meta.id.value() == 0 {
            return Err(QuestionError::InvalidId);
        }
        if meta.text.trim().is_empty() {
            return Err(QuestionError::EmptyText { id: meta.id });
        }

        let question = match QuestionKind::from_tag(tag) {
            Some(QuestionKind::MultipleChoice) => {
                let options = ChoiceKey::ALL
                    .into_iter()
                    .zip(options)
                    .filter_map(|(key, text)| {
                        text.filter(|text| !text.trim().is_empty())
                            .map(|text| ChoiceOption { key, text })
                    })
                    .collect();
                Self::MultipleChoice { meta, options }
            }
            Some(QuestionKind::TrueFalseNotGiven) => Self::TrueFalseNotGiven { meta },
            Some(QuestionKind::FillBlank) => Self::FillBlank { meta },
            Some(QuestionKind::Matching) => Self::Matching { meta },
            Some(QuestionKind::FreeText) => Self::FreeText { meta },
            None => Self::Unsupported {
                meta,
                tag: tag.to_string(),
            },
        };
        Ok(question)
    }

    #[must_use]
    pub fn meta(&self) -> &QuestionMeta {
        match self {
            Self::MultipleChoice { meta, .. }
            | Self::TrueFalseNotGiven { meta }
            | Self::FillBlank { meta }
            | Self::Matching { meta }
            | Self::FreeText { meta }
            | Self::Unsupported { meta, .. } => meta,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.meta().id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.meta().text
    }

    /// `None` for unsupported questions.
    #[must_use]
    pub fn kind(&self) -> Option<QuestionKind> {
        match self {
            Self::MultipleChoice { .. } => Some(QuestionKind::MultipleChoice),
            Self::TrueFalseNotGiven { .. } => Some(QuestionKind::TrueFalseNotGiven),
            Self::FillBlank { .. } => Some(QuestionKind::FillBlank),
            Self::Matching { .. } => Some(QuestionKind::Matching),
            Self::FreeText { .. } => Some(QuestionKind::FreeText),
            Self::Unsupported { .. } => None,
        }
    }

    /// Chip label; unsupported questions show their raw tag.
    #[must_use]
    pub fn type_label(&self) -> &str {
        match self {
            Self::Unsupported { tag, .. } => tag,
            other => other.kind().map_or("", QuestionKind::label),
        }
    }
}
