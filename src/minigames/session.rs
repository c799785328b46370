//! Session state and presentation data shared by all variants.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Direction, MinigameOutcome, Question};
use crate::error::QuestionUnavailable;

use super::flags::Flag;
use super::math::MathProblem;
use super::MinigameKind;

/// Notice shown when a trivia question could not be loaded.
pub const UNAVAILABLE_NOTICE: &str = "Failed to load question!";

/// What the player is asked to solve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Challenge {
    /// Pick one of the question's candidates.
    Choice(Question),
    /// Name the country of a flag.
    Flag { flag: Flag, question: Question },
    /// Type the result of an arithmetic problem.
    Math(MathProblem),
    /// Type a word exactly as shown.
    Word(String),
    /// No question could be loaded; the session cannot be won.
    Unavailable(QuestionUnavailable),
}

impl Challenge {
    /// Question backing a choice-based challenge.
    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        match self {
            Challenge::Choice(question) | Challenge::Flag { question, .. } => Some(question),
            _ => None,
        }
    }

    fn initial_cursor(&self) -> Cursor {
        match self {
            Challenge::Math(_) | Challenge::Word(_) => Cursor::Text(String::new()),
            _ => Cursor::Selection(0),
        }
    }
}

/// Player's current selection or typed entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    Selection(usize),
    Text(String),
}

/// One launched minigame.
///
/// Sessions are plain values: input handling takes a session and returns
/// the next one, so the same event sequence always produces the same
/// sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameSession {
    pub(crate) kind: MinigameKind,
    pub(crate) challenge: Challenge,
    pub(crate) cursor: Cursor,
    pub(crate) outcome: MinigameOutcome,
}

impl MinigameSession {
    /// Fresh pending session for a challenge.
    #[must_use]
    pub fn new(kind: MinigameKind, challenge: Challenge) -> Self {
        let cursor = challenge.initial_cursor();
        Self {
            kind,
            challenge,
            cursor,
            outcome: MinigameOutcome::Pending,
        }
    }

    /// Session whose question failed to load.
    #[must_use]
    pub fn unavailable(kind: MinigameKind, reason: QuestionUnavailable) -> Self {
        Self::new(kind, Challenge::Unavailable(reason))
    }

    #[must_use]
    pub fn kind(&self) -> MinigameKind {
        self.kind
    }

    #[must_use]
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[must_use]
    pub fn outcome(&self) -> MinigameOutcome {
        self.outcome
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.challenge.question()
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self.challenge, Challenge::Unavailable(_))
    }

    /// Selected option index for choice-based sessions.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        match self.cursor {
            Cursor::Selection(index) => Some(index),
            Cursor::Text(_) => None,
        }
    }

    /// Typed text for entry-based sessions.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        match &self.cursor {
            Cursor::Text(text) => Some(text),
            Cursor::Selection(_) => None,
        }
    }

    /// Number of selectable options (zero for entry-based sessions).
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.question().map_or(0, |q| q.candidates().len())
    }

    /// The answer a confirm would submit right now.
    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        match &self.cursor {
            Cursor::Selection(index) => self.question().and_then(|q| q.candidate(*index)),
            Cursor::Text(text) => Some(text),
        }
    }

    /// Resolve a still pending session as lost.
    ///
    /// Used by the runner when the time budget runs out.
    #[must_use]
    pub fn expire(mut self) -> Self {
        self.outcome = self.outcome.resolve(false);
        self
    }
}

/// Move a selection one step, wrapping at both ends.
#[must_use]
pub fn step_selection(index: usize, count: usize, direction: Direction) -> usize {
    if count == 0 {
        return 0;
    }

    let index = index % count;
    match direction {
        Direction::Previous => (index + count - 1) % count,
        Direction::Next => (index + 1) % count,
    }
}

/// One entry of an option list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub selected: bool,
}

/// Everything a front-end needs to draw one frame of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub kind: MinigameKind,
    /// Instruction line above the prompt.
    pub heading: Option<String>,
    pub prompt: String,
    pub options: Vec<OptionView>,
    /// Typed text for entry-based variants.
    pub entry: Option<String>,
    /// Image asset to show (flag variant).
    pub image: Option<String>,
    /// Error notice replacing the prompt.
    pub notice: Option<String>,
    pub outcome: MinigameOutcome,
    pub time_remaining: Duration,
}

impl Presentation {
    /// Default presentation of a session: prompt from the question, option
    /// list with the selection highlighted, typed entry, unavailable notice.
    #[must_use]
    pub fn of(session: &MinigameSession, time_remaining: Duration) -> Self {
        let options = session
            .question()
            .map(|q| {
                q.candidates()
                    .iter()
                    .enumerate()
                    .map(|(i, label)| OptionView {
                        label: label.clone(),
                        selected: session.selected() == Some(i),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let notice = session.is_unavailable().then(|| UNAVAILABLE_NOTICE.to_string());

        Self {
            kind: session.kind(),
            heading: None,
            prompt: session.question().map(|q| q.prompt().to_string()).unwrap_or_default(),
            options,
            entry: session.entry().map(str::to_string),
            image: None,
            notice,
            outcome: session.outcome(),
            time_remaining,
        }
    }

    #[must_use]
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Whole seconds left, as shown on the countdown.
    #[must_use]
    pub fn countdown(&self) -> u64 {
        self.time_remaining.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps_both_ways() {
        assert_eq!(step_selection(0, 4, Direction::Previous), 3);
        assert_eq!(step_selection(3, 4, Direction::Next), 0);
        assert_eq!(step_selection(1, 4, Direction::Next), 2);
        assert_eq!(step_selection(0, 2, Direction::Next), 1);
        assert_eq!(step_selection(1, 2, Direction::Next), 0);
    }

    #[test]
    fn test_step_with_no_options() {
        assert_eq!(step_selection(0, 0, Direction::Next), 0);
        assert_eq!(step_selection(5, 0, Direction::Previous), 0);
    }

    #[test]
    fn test_initial_cursor() {
        let word = MinigameSession::new(MinigameKind::WordTyping, Challenge::Word("rhythm".into()));
        assert_eq!(word.entry(), Some(""));
        assert_eq!(word.selected(), None);
        assert_eq!(word.option_count(), 0);

        let q = Question::boolean("?", "True").unwrap();
        let choice = MinigameSession::new(MinigameKind::BooleanTrivia, Challenge::Choice(q));
        assert_eq!(choice.selected(), Some(0));
        assert_eq!(choice.current_answer(), Some("True"));
    }

    #[test]
    fn test_expire_only_settles_pending() {
        let session = MinigameSession::new(MinigameKind::WordTyping, Challenge::Word("rhythm".into()));
        assert_eq!(session.clone().expire().outcome(), MinigameOutcome::Failure);

        let mut won = session;
        won.outcome = MinigameOutcome::Success;
        assert_eq!(won.expire().outcome(), MinigameOutcome::Success);
    }

    #[test]
    fn test_unavailable_presentation() {
        let session = MinigameSession::unavailable(
            MinigameKind::MultipleChoiceTrivia,
            QuestionUnavailable::Timeout(Duration::from_secs(3)),
        );
        let frame = Presentation::of(&session, Duration::from_millis(4900));

        assert_eq!(frame.notice.as_deref(), Some(UNAVAILABLE_NOTICE));
        assert!(frame.options.is_empty());
        assert_eq!(frame.countdown(), 4);
    }
}
