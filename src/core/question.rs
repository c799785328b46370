//! Trivia question payload.
//!
//! Constructors validate the invariant that the correct answer is one of
//! the candidates, so a `Question` that exists is always answerable.

use serde::{Deserialize, Serialize};

use crate::error::QuestionError;

/// Literal answers of a boolean question, in display order.
pub const BOOLEAN_ANSWERS: [&str; 2] = ["True", "False"];

/// Shape of a question's answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    MultipleChoice,
    Boolean,
}

impl QuestionKind {
    /// The `type` parameter used by the Open Trivia DB API.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple",
            QuestionKind::Boolean => "boolean",
        }
    }
}

/// A validated question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    candidates: Vec<String>,
    correct: String,
    kind: QuestionKind,
}

impl Question {
    /// Build a multiple choice question.
    ///
    /// Candidates are kept in the given order.
    pub fn multiple_choice(
        prompt: impl Into<String>,
        candidates: Vec<String>,
        correct: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let correct = correct.into();

        if candidates.len() < 2 {
            return Err(QuestionError::TooFewCandidates(candidates.len()));
        }
        if !candidates.contains(&correct) {
            return Err(QuestionError::CorrectNotInCandidates(correct));
        }

        Ok(Self {
            prompt: prompt.into(),
            candidates,
            correct,
            kind: QuestionKind::MultipleChoice,
        })
    }

    /// Build a true/false question from the literal correct answer.
    ///
    /// The answer must be exactly `"True"` or `"False"`.
    pub fn boolean(prompt: impl Into<String>, correct: impl Into<String>) -> Result<Self, QuestionError> {
        let correct = correct.into();

        if !BOOLEAN_ANSWERS.contains(&correct.as_str()) {
            return Err(QuestionError::InvalidBoolean(correct));
        }

        Ok(Self {
            prompt: prompt.into(),
            candidates: BOOLEAN_ANSWERS.iter().map(|s| (*s).to_string()).collect(),
            correct,
            kind: QuestionKind::Boolean,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    #[must_use]
    pub fn correct(&self) -> &str {
        &self.correct
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// Candidate at an index, if in range.
    #[must_use]
    pub fn candidate(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    /// Index of the correct answer among the candidates.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.candidates
            .iter()
            .position(|c| *c == self.correct)
            .unwrap_or_default()
    }

    /// Exact string comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct
    }
}
