//! Question sources.
//!
//! Trivia minigames obtain their question from a `QuestionSource`. The
//! engine only consumes the result shape: a validated `Question` or a
//! `QuestionUnavailable` reason, which the minigame turns into a session
//! that cannot be won.
//!
//! Implementations:
//! - [`OpenTdbSource`]: the Open Trivia DB HTTP API, bounded by a timeout
//! - [`Offline`]: always unavailable
//! - any `FnMut(&TriviaRequest) -> Result<Question, QuestionUnavailable>`

mod opentdb;

pub use opentdb::{parse_response, OpenTdbSource};

use serde::{Deserialize, Serialize};

use crate::core::{Question, QuestionKind};
use crate::error::QuestionUnavailable;

/// Trivia topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Science,
    History,
    Geography,
    English,
    Computers,
    Sports,
    Music,
    Film,
    Art,
    Politics,
    General,
}

impl Subject {
    /// Every subject, in declaration order.
    pub const ALL: [Subject; 12] = [
        Subject::Math,
        Subject::Science,
        Subject::History,
        Subject::Geography,
        Subject::English,
        Subject::Computers,
        Subject::Sports,
        Subject::Music,
        Subject::Film,
        Subject::Art,
        Subject::Politics,
        Subject::General,
    ];

    /// Open Trivia DB category id.
    ///
    /// English maps to "Books", the closest category the service offers.
    #[must_use]
    pub const fn category_id(self) -> u32 {
        match self {
            Subject::Math => 19,
            Subject::Science => 17,
            Subject::History => 23,
            Subject::Geography => 22,
            Subject::English => 10,
            Subject::Computers => 18,
            Subject::Sports => 21,
            Subject::Music => 12,
            Subject::Film => 11,
            Subject::Art => 25,
            Subject::Politics => 24,
            Subject::General => 9,
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Subject::Math => "math",
            Subject::Science => "science",
            Subject::History => "history",
            Subject::Geography => "geography",
            Subject::English => "english",
            Subject::Computers => "computers",
            Subject::Sports => "sports",
            Subject::Music => "music",
            Subject::Film => "film",
            Subject::Art => "art",
            Subject::Politics => "politics",
            Subject::General => "general",
        };
        f.write_str(name)
    }
}

/// Requested difficulty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Parameters of one question request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaRequest {
    pub subject: Subject,
    pub difficulty: Difficulty,
    pub kind: QuestionKind,
}

impl TriviaRequest {
    /// Multiple choice request at medium difficulty.
    #[must_use]
    pub const fn multiple_choice(subject: Subject) -> Self {
        Self {
            subject,
            difficulty: Difficulty::Medium,
            kind: QuestionKind::MultipleChoice,
        }
    }

    /// True/false request at medium difficulty.
    #[must_use]
    pub const fn boolean(subject: Subject) -> Self {
        Self {
            subject,
            difficulty: Difficulty::Medium,
            kind: QuestionKind::Boolean,
        }
    }

    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}

/// Provider of trivia questions.
///
/// Implementations must return within a bounded time and report every
/// failure as a `QuestionUnavailable` instead of panicking.
pub trait QuestionSource {
    fn request(&mut self, request: &TriviaRequest) -> Result<Question, QuestionUnavailable>;
}

impl<F> QuestionSource for F
where
    F: FnMut(&TriviaRequest) -> Result<Question, QuestionUnavailable>,
{
    fn request(&mut self, request: &TriviaRequest) -> Result<Question, QuestionUnavailable> {
        self(request)
    }
}

/// Source that never has a question.
///
/// Used when running without network access; trivia sessions created from
/// it are always unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Offline;

impl QuestionSource for Offline {
    fn request(&mut self, _request: &TriviaRequest) -> Result<Question, QuestionUnavailable> {
        Err(QuestionUnavailable::Network("offline".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ids_are_unique() {
        let mut ids: Vec<_> = Subject::ALL.iter().map(|s| s.category_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Subject::ALL.len());
    }

    #[test]
    fn test_subject_display_matches_serde() {
        for subject in Subject::ALL {
            let json = serde_json::to_string(&subject).unwrap();
            assert_eq!(json, format!("\"{subject}\""));
        }
    }

    #[test]
    fn test_closure_source() {
        let mut calls = 0;
        let mut source = |request: &TriviaRequest| {
            calls += 1;
            assert_eq!(request.kind, QuestionKind::Boolean);
            Question::boolean("Sky is blue.", "True").map_err(QuestionUnavailable::from)
        };

        let question = source.request(&TriviaRequest::boolean(Subject::Science)).unwrap();
        assert_eq!(question.correct(), "True");
        drop(source);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_offline() {
        let err = Offline
            .request(&TriviaRequest::multiple_choice(Subject::Art))
            .unwrap_err();
        assert!(matches!(err, QuestionUnavailable::Network(_)));
    }

    #[test]
    fn test_request_builder() {
        let request = TriviaRequest::multiple_choice(Subject::Film).with_difficulty(Difficulty::Hard);
        assert_eq!(request.difficulty.api_name(), "hard");
        assert_eq!(request.kind.api_name(), "multiple");
    }
}
