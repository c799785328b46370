//! Spelling challenge: type the shown word.

use serde::{Deserialize, Serialize};

use crate::core::MinigameRng;
use crate::source::QuestionSource;

use super::{Challenge, Minigame, MinigameKind, MinigameSession, Presentation};

/// Commonly misspelled words.
pub const WORDS: [&str; 15] = [
    "accommodate",
    "rhythm",
    "conscience",
    "pronunciation",
    "embarrass",
    "occurrence",
    "supersede",
    "threshold",
    "miscellaneous",
    "conscientious",
    "recommendation",
    "bureaucracy",
    "entrepreneur",
    "exaggerate",
    "maintenance",
];

pub const TYPING_HEADING: &str = "Type the word:";

/// Type a word from the list; letters only, case does not matter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTyping {
    words: Vec<String>,
}

impl Default for WordTyping {
    fn default() -> Self {
        Self::with_words(WORDS)
    }
}

impl WordTyping {
    /// Draw from a custom word list. An empty list falls back to [`WORDS`].
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Self::default();
        }
        Self { words }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Session for a fixed word.
    #[must_use]
    pub fn session(word: impl Into<String>) -> MinigameSession {
        MinigameSession::new(MinigameKind::WordTyping, Challenge::Word(word.into()))
    }
}

impl Minigame for WordTyping {
    fn kind(&self) -> MinigameKind {
        MinigameKind::WordTyping
    }

    fn initialize(&self, _source: &mut dyn QuestionSource, rng: &mut MinigameRng) -> MinigameSession {
        let word = rng.choose(&self.words).cloned().unwrap_or_else(|| WORDS[0].to_string());
        Self::session(word)
    }

    fn is_correct(&self, session: &MinigameSession, answer: &str) -> bool {
        let Challenge::Word(word) = session.challenge() else {
            return false;
        };

        answer.trim().to_lowercase() == word.to_lowercase()
    }

    fn accepts_char(&self, _entry: &str, c: char) -> bool {
        c.is_alphabetic()
    }

    fn render(&self, session: &MinigameSession, time_remaining: std::time::Duration) -> Presentation {
        let frame = Presentation::of(session, time_remaining).with_heading(TYPING_HEADING);
        match session.challenge() {
            Challenge::Word(word) => frame.with_prompt(word.clone()),
            _ => frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InputEvent, MinigameOutcome};
    use crate::source::Offline;

    fn typed(session: MinigameSession, text: &str) -> MinigameSession {
        let game = WordTyping::default();
        text.chars()
            .fold(session, |s, c| game.handle_input(&s, InputEvent::CharacterTyped(c)))
    }

    #[test]
    fn test_case_insensitive_match() {
        let game = WordTyping::default();
        let session = typed(WordTyping::session("rhythm"), "RhYtHm");
        let done = game.handle_input(&session, InputEvent::ConfirmSelection);
        assert_eq!(done.outcome(), MinigameOutcome::Success);
    }

    #[test]
    fn test_misspelling_loses() {
        let game = WordTyping::default();
        let session = typed(WordTyping::session("embarrass"), "embarass");
        let done = game.handle_input(&session, InputEvent::ConfirmSelection);
        assert_eq!(done.outcome(), MinigameOutcome::Failure);
    }

    #[test]
    fn test_non_alphabetic_ignored() {
        let session = typed(WordTyping::session("rhythm"), "rh7y t-hm!");
        assert_eq!(session.entry(), Some("rhythm"));
    }

    #[test]
    fn test_backspace_on_empty() {
        let game = WordTyping::default();
        let session = WordTyping::session("rhythm");
        let after = game.handle_input(&session, InputEvent::Backspace);
        assert_eq!(after, session);
        assert_eq!(after.entry(), Some(""));
    }

    #[test]
    fn test_initialize_picks_from_list() {
        let game = WordTyping::default();
        let mut rng = MinigameRng::new(8);

        for _ in 0..50 {
            let session = game.initialize(&mut Offline, &mut rng);
            match session.challenge() {
                Challenge::Word(word) => assert!(WORDS.contains(&word.as_str())),
                other => panic!("unexpected challenge {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_custom_list_falls_back() {
        let game = WordTyping::with_words(Vec::<String>::new());
        assert_eq!(game.words().len(), WORDS.len());
    }

    #[test]
    fn test_render() {
        let game = WordTyping::default();
        let session = typed(WordTyping::session("threshold"), "thr");
        let frame = game.render(&session, std::time::Duration::from_secs(6));

        assert_eq!(frame.heading.as_deref(), Some(TYPING_HEADING));
        assert_eq!(frame.prompt, "threshold");
        assert_eq!(frame.entry.as_deref(), Some("thr"));
        assert_eq!(frame.countdown(), 6);
    }
}
