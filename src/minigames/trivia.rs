//! Trivia variants backed by a question source.
//!
//! Both compare the selected candidate to the correct answer by exact
//! string match. For true/false this means the service must answer with
//! exactly `"True"` or `"False"`; anything else is rejected when the
//! question is built rather than silently never matching.

use serde::{Deserialize, Serialize};

use crate::core::{MinigameRng, QuestionKind};
use crate::source::{Difficulty, QuestionSource, Subject, TriviaRequest};

use super::{fetch_session, Minigame, MinigameKind, MinigameSession};

/// Multiple choice question on a subject; navigate and confirm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceTrivia {
    request: TriviaRequest,
}

impl MultipleChoiceTrivia {
    #[must_use]
    pub fn new(subject: Subject) -> Self {
        Self {
            request: TriviaRequest::multiple_choice(subject),
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.request = self.request.with_difficulty(difficulty);
        self
    }

    #[must_use]
    pub fn request(&self) -> &TriviaRequest {
        &self.request
    }
}

impl Minigame for MultipleChoiceTrivia {
    fn kind(&self) -> MinigameKind {
        MinigameKind::MultipleChoiceTrivia
    }

    fn initialize(&self, source: &mut dyn QuestionSource, _rng: &mut MinigameRng) -> MinigameSession {
        fetch_session(self.kind(), source, &self.request)
    }

    fn is_correct(&self, session: &MinigameSession, answer: &str) -> bool {
        session.question().is_some_and(|q| q.is_correct(answer))
    }
}

/// True/false science question; left/right toggles, confirm submits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanTrivia {
    request: TriviaRequest,
}

impl BooleanTrivia {
    #[must_use]
    pub fn new(subject: Subject) -> Self {
        Self {
            request: TriviaRequest::boolean(subject),
        }
    }

    #[must_use]
    pub fn request(&self) -> &TriviaRequest {
        &self.request
    }
}

impl Default for BooleanTrivia {
    fn default() -> Self {
        Self::new(Subject::Science)
    }
}

impl Minigame for BooleanTrivia {
    fn kind(&self) -> MinigameKind {
        MinigameKind::BooleanTrivia
    }

    fn initialize(&self, source: &mut dyn QuestionSource, _rng: &mut MinigameRng) -> MinigameSession {
        debug_assert_eq!(self.request.kind, QuestionKind::Boolean);
        fetch_session(self.kind(), source, &self.request)
    }

    fn is_correct(&self, session: &MinigameSession, answer: &str) -> bool {
        session.question().is_some_and(|q| q.is_correct(answer))
    }
}
