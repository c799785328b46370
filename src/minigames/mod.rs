//! Minigame trait and its five variants.
//!
//! A minigame is a rules object, the session is the state it rules over
//! (the same split as an engine and its game state). Variants implement:
//! - how a session is created (`initialize`)
//! - which typed characters are accepted (`accepts_char`)
//! - what counts as a correct answer (`is_correct`)
//! - how a session is presented (`render`)
//!
//! The input state machine itself (`handle_input`) is shared and provided
//! by the trait.
//!
//! ```
//! use rust_minigames::core::{InputEvent, MinigameOutcome, MinigameRng};
//! use rust_minigames::minigames::{Minigame, WordTyping};
//! use rust_minigames::source::Offline;
//!
//! let game = WordTyping::with_words(["rhythm"]);
//! let mut session = game.initialize(&mut Offline, &mut MinigameRng::new(1));
//! for c in "Rhythm".chars() {
//!     session = game.handle_input(&session, InputEvent::CharacterTyped(c));
//! }
//! session = game.handle_input(&session, InputEvent::ConfirmSelection);
//! assert_eq!(session.outcome(), MinigameOutcome::Success);
//! ```

pub mod flags;
pub mod math;
mod session;
pub mod trivia;
pub mod typing;

pub use flags::{Flag, FlagIdentification};
pub use math::{MathProblem, Operator, ShortAnswerMath};
pub use session::{
    step_selection, Challenge, Cursor, MinigameSession, OptionView, Presentation, UNAVAILABLE_NOTICE,
};
pub use trivia::{BooleanTrivia, MultipleChoiceTrivia};
pub use typing::WordTyping;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{InputEvent, MinigameRng, TriviaConfig};
use crate::error::QuestionUnavailable;
use crate::source::{QuestionSource, Subject, TriviaRequest};

/// Variant tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinigameKind {
    MultipleChoiceTrivia,
    BooleanTrivia,
    ShortAnswerMath,
    WordTyping,
    FlagIdentification,
}

impl MinigameKind {
    pub const ALL: [MinigameKind; 5] = [
        MinigameKind::MultipleChoiceTrivia,
        MinigameKind::BooleanTrivia,
        MinigameKind::ShortAnswerMath,
        MinigameKind::WordTyping,
        MinigameKind::FlagIdentification,
    ];
}

impl std::fmt::Display for MinigameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MinigameKind::MultipleChoiceTrivia => "trivia",
            MinigameKind::BooleanTrivia => "true-or-false",
            MinigameKind::ShortAnswerMath => "math",
            MinigameKind::WordTyping => "typing",
            MinigameKind::FlagIdentification => "flags",
        };
        f.write_str(name)
    }
}

/// Minigame rules.
///
/// ## Implementation Notes
///
/// - `initialize` never fails: a missing question becomes an unavailable
///   session
/// - `is_correct` receives the selected candidate or the typed entry
/// - `accepts_char` is only consulted for entry-based sessions
/// - `handle_input` must stay a pure function of its arguments
pub trait Minigame {
    /// Variant tag.
    fn kind(&self) -> MinigameKind;

    /// Create a new pending session.
    ///
    /// Locally generated content must depend only on `rng`.
    fn initialize(&self, source: &mut dyn QuestionSource, rng: &mut MinigameRng) -> MinigameSession;

    /// Whether `answer` wins the session.
    fn is_correct(&self, session: &MinigameSession, answer: &str) -> bool;

    /// Whether `c` may be appended to `entry`.
    fn accepts_char(&self, _entry: &str, _c: char) -> bool {
        false
    }

    /// Presentation of a session with the given time left.
    fn render(&self, session: &MinigameSession, time_remaining: Duration) -> Presentation {
        Presentation::of(session, time_remaining)
    }

    /// Apply one input event and return the next session.
    ///
    /// Resolved and unavailable sessions, and events that do not apply to
    /// the session's cursor, come back unchanged.
    fn handle_input(&self, session: &MinigameSession, event: InputEvent) -> MinigameSession {
        if session.outcome().is_terminal() || session.is_unavailable() {
            return session.clone();
        }

        let mut next = session.clone();
        let option_count = session.option_count();

        match (event, &mut next.cursor) {
            (InputEvent::NavigatePrevious | InputEvent::NavigateNext, Cursor::Selection(index)) => {
                if let Some(direction) = event.direction() {
                    *index = step_selection(*index, option_count, direction);
                }
            }
            (InputEvent::CharacterTyped(c), Cursor::Text(entry)) => {
                if self.accepts_char(entry, c) {
                    entry.push(c);
                } else {
                    trace!(kind = %self.kind(), ?c, "ignoring rejected character");
                }
            }
            (InputEvent::Backspace, Cursor::Text(entry)) => {
                entry.pop();
            }
            (InputEvent::ConfirmSelection, _) => {
                let won = session
                    .current_answer()
                    .is_some_and(|answer| self.is_correct(session, answer));
                next.outcome = next.outcome.resolve(won);
                debug!(kind = %self.kind(), outcome = %next.outcome, "session resolved");
            }
            _ => {}
        }

        next
    }
}

/// Any of the five variants, selected by tag.
///
/// Lets a caller hold "some minigame" without boxing, and keeps the runner
/// variant-agnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyMinigame {
    MultipleChoice(MultipleChoiceTrivia),
    Boolean(BooleanTrivia),
    Math(ShortAnswerMath),
    Typing(WordTyping),
    Flags(FlagIdentification),
}

impl AnyMinigame {
    /// Default-configured variant for a tag.
    ///
    /// `subject` is only used by multiple choice trivia.
    #[must_use]
    pub fn for_kind(kind: MinigameKind, subject: Subject) -> Self {
        match kind {
            MinigameKind::MultipleChoiceTrivia => AnyMinigame::MultipleChoice(MultipleChoiceTrivia::new(subject)),
            MinigameKind::BooleanTrivia => AnyMinigame::Boolean(BooleanTrivia::default()),
            MinigameKind::ShortAnswerMath => AnyMinigame::Math(ShortAnswerMath),
            MinigameKind::WordTyping => AnyMinigame::Typing(WordTyping::default()),
            MinigameKind::FlagIdentification => AnyMinigame::Flags(FlagIdentification::default()),
        }
    }

    /// Pick a variant uniformly, trivia subject from the configured list.
    pub fn random(rng: &mut MinigameRng, trivia: &TriviaConfig) -> Self {
        let kind = MinigameKind::ALL[rng.gen_index(MinigameKind::ALL.len())];
        let subject = rng.choose(&trivia.subjects).copied().unwrap_or(Subject::General);

        match Self::for_kind(kind, subject) {
            AnyMinigame::MultipleChoice(game) => {
                AnyMinigame::MultipleChoice(game.with_difficulty(trivia.difficulty))
            }
            other => other,
        }
    }

    fn inner(&self) -> &dyn Minigame {
        match self {
            AnyMinigame::MultipleChoice(game) => game,
            AnyMinigame::Boolean(game) => game,
            AnyMinigame::Math(game) => game,
            AnyMinigame::Typing(game) => game,
            AnyMinigame::Flags(game) => game,
        }
    }
}

impl Minigame for AnyMinigame {
    fn kind(&self) -> MinigameKind {
        self.inner().kind()
    }

    fn initialize(&self, source: &mut dyn QuestionSource, rng: &mut MinigameRng) -> MinigameSession {
        self.inner().initialize(source, rng)
    }

    fn is_correct(&self, session: &MinigameSession, answer: &str) -> bool {
        self.inner().is_correct(session, answer)
    }

    fn accepts_char(&self, entry: &str, c: char) -> bool {
        self.inner().accepts_char(entry, c)
    }

    fn render(&self, session: &MinigameSession, time_remaining: Duration) -> Presentation {
        self.inner().render(session, time_remaining)
    }
}

impl From<MultipleChoiceTrivia> for AnyMinigame {
    fn from(game: MultipleChoiceTrivia) -> Self {
        AnyMinigame::MultipleChoice(game)
    }
}

impl From<BooleanTrivia> for AnyMinigame {
    fn from(game: BooleanTrivia) -> Self {
        AnyMinigame::Boolean(game)
    }
}

impl From<ShortAnswerMath> for AnyMinigame {
    fn from(game: ShortAnswerMath) -> Self {
        AnyMinigame::Math(game)
    }
}

impl From<WordTyping> for AnyMinigame {
    fn from(game: WordTyping) -> Self {
        AnyMinigame::Typing(game)
    }
}

impl From<FlagIdentification> for AnyMinigame {
    fn from(game: FlagIdentification) -> Self {
        AnyMinigame::Flags(game)
    }
}

/// Ask `source` for a question of the requested kind.
///
/// Every failure, including a question of the wrong kind, becomes an
/// unavailable session.
pub(crate) fn fetch_session(
    kind: MinigameKind,
    source: &mut dyn QuestionSource,
    request: &TriviaRequest,
) -> MinigameSession {
    match source.request(request) {
        Ok(question) if question.kind() == request.kind => MinigameSession::new(kind, Challenge::Choice(question)),
        Ok(question) => {
            let reason = QuestionUnavailable::Malformed(format!(
                "expected {:?} question, got {:?}",
                request.kind,
                question.kind()
            ));
            warn!(%kind, %reason, "question unavailable");
            MinigameSession::unavailable(kind, reason)
        }
        Err(reason) => {
            warn!(%kind, %reason, "question unavailable");
            MinigameSession::unavailable(kind, reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MinigameOutcome;
    use crate::source::Offline;

    #[test]
    fn test_for_kind_round_trips_tag() {
        for kind in MinigameKind::ALL {
            assert_eq!(AnyMinigame::for_kind(kind, Subject::Art).kind(), kind);
        }
    }

    #[test]
    fn test_random_is_seeded() {
        let trivia = TriviaConfig::default();
        let a: Vec<_> = {
            let mut rng = MinigameRng::new(11);
            (0..20).map(|_| AnyMinigame::random(&mut rng, &trivia).kind()).collect()
        };
        let b: Vec<_> = {
            let mut rng = MinigameRng::new(11);
            (0..20).map(|_| AnyMinigame::random(&mut rng, &trivia).kind()).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_covers_all_kinds() {
        let trivia = TriviaConfig::default();
        let mut rng = MinigameRng::new(3);
        let kinds: Vec<_> = (0..200).map(|_| AnyMinigame::random(&mut rng, &trivia).kind()).collect();

        for kind in MinigameKind::ALL {
            assert!(kinds.contains(&kind), "{kind} never picked");
        }
    }

    #[test]
    fn test_any_minigame_delegates_input() {
        let game = AnyMinigame::from(WordTyping::with_words(["threshold"]));
        let mut session = game.initialize(&mut Offline, &mut MinigameRng::new(1));

        for c in "threshold".chars() {
            session = game.handle_input(&session, InputEvent::CharacterTyped(c));
        }
        session = game.handle_input(&session, InputEvent::CharacterTyped('7'));
        assert_eq!(session.entry(), Some("threshold"));

        session = game.handle_input(&session, InputEvent::ConfirmSelection);
        assert_eq!(session.outcome(), MinigameOutcome::Success);
    }

    #[test]
    fn test_resolved_session_ignores_input() {
        let game = WordTyping::with_words(["rhythm"]);
        let session = game.initialize(&mut Offline, &mut MinigameRng::new(1));
        let lost = game.handle_input(&session, InputEvent::ConfirmSelection);
        assert_eq!(lost.outcome(), MinigameOutcome::Failure);

        let mut after = lost.clone();
        for c in "rhythm".chars() {
            after = game.handle_input(&after, InputEvent::CharacterTyped(c));
        }
        after = game.handle_input(&after, InputEvent::ConfirmSelection);
        assert_eq!(after, lost);
    }

    #[test]
    fn test_wrong_kind_from_source_is_unavailable() {
        let mut source = |_: &TriviaRequest| {
            crate::core::Question::boolean("?", "True").map_err(QuestionUnavailable::from)
        };
        let session = fetch_session(
            MinigameKind::MultipleChoiceTrivia,
            &mut source,
            &TriviaRequest::multiple_choice(Subject::Film),
        );
        assert!(session.is_unavailable());
    }
}
