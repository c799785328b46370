//! Flag recognition: name the country a flag belongs to.

use serde::{Deserialize, Serialize};

use crate::core::{MinigameRng, Question};
use crate::error::QuestionUnavailable;
use crate::source::QuestionSource;

use super::{Challenge, Minigame, MinigameKind, MinigameSession, Presentation};

/// Countries with a bundled flag image.
pub const COUNTRIES: [&str; 7] = [
    "France",
    "Japan",
    "Brazil",
    "Australia",
    "Canada",
    "Germany",
    "South Korea",
];

/// Number of answer choices shown.
pub const CHOICE_COUNT: usize = 4;

pub const FLAG_PROMPT: &str = "Which country does this flag belong to?";

/// A country and its flag image asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub country: String,
    pub asset: String,
}

impl Flag {
    /// Flag with the conventional asset path, e.g.
    /// `"South Korea"` -> `assets/flags/south_korea.png`.
    #[must_use]
    pub fn new(country: impl Into<String>) -> Self {
        let country = country.into();
        let file = country.to_lowercase().replace(' ', "_");
        Self {
            asset: format!("assets/flags/{file}.png"),
            country,
        }
    }
}

/// Pick the right country out of four.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagIdentification {
    flags: Vec<Flag>,
}

impl Default for FlagIdentification {
    fn default() -> Self {
        Self {
            flags: COUNTRIES.iter().map(|c| Flag::new(*c)).collect(),
        }
    }
}

impl FlagIdentification {
    /// Use a custom flag table.
    #[must_use]
    pub fn with_flags(flags: Vec<Flag>) -> Self {
        Self { flags }
    }

    #[must_use]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Session for a fixed country and choice order.
    pub fn session(country: &str, choices: &[&str]) -> Result<MinigameSession, QuestionUnavailable> {
        let question = Question::multiple_choice(
            FLAG_PROMPT,
            choices.iter().map(|c| (*c).to_string()).collect(),
            country,
        )?;

        Ok(MinigameSession::new(
            MinigameKind::FlagIdentification,
            Challenge::Flag {
                flag: Flag::new(country),
                question,
            },
        ))
    }
}

impl Minigame for FlagIdentification {
    fn kind(&self) -> MinigameKind {
        MinigameKind::FlagIdentification
    }

    fn initialize(&self, _source: &mut dyn QuestionSource, rng: &mut MinigameRng) -> MinigameSession {
        let Some(flag) = rng.choose(&self.flags).cloned() else {
            return MinigameSession::unavailable(
                self.kind(),
                QuestionUnavailable::Malformed("empty flag table".to_string()),
            );
        };

        let others: Vec<&Flag> = self.flags.iter().filter(|f| f.country != flag.country).collect();
        let mut choices: Vec<String> = rng
            .sample(&others, CHOICE_COUNT - 1)
            .into_iter()
            .map(|f| f.country.clone())
            .collect();
        choices.push(flag.country.clone());
        rng.shuffle(&mut choices);

        match Question::multiple_choice(FLAG_PROMPT, choices, flag.country.clone()) {
            Ok(question) => MinigameSession::new(self.kind(), Challenge::Flag { flag, question }),
            Err(e) => MinigameSession::unavailable(self.kind(), e.into()),
        }
    }

    fn is_correct(&self, session: &MinigameSession, answer: &str) -> bool {
        match session.challenge() {
            Challenge::Flag { flag, .. } => answer == flag.country,
            _ => false,
        }
    }

    fn render(&self, session: &MinigameSession, time_remaining: std::time::Duration) -> Presentation {
        let frame = Presentation::of(session, time_remaining);
        match session.challenge() {
            Challenge::Flag { flag, .. } => frame.with_image(flag.asset.clone()),
            _ => frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InputEvent, MinigameOutcome};
    use crate::source::Offline;

    const CHOICES: [&str; 4] = ["France", "Japan", "Brazil", "Australia"];

    #[test]
    fn test_asset_path() {
        assert_eq!(Flag::new("South Korea").asset, "assets/flags/south_korea.png");
        assert_eq!(Flag::new("France").asset, "assets/flags/france.png");
    }

    #[test]
    fn test_select_first_and_confirm() {
        let game = FlagIdentification::default();
        let session = FlagIdentification::session("France", &CHOICES).unwrap();

        let done = game.handle_input(&session, InputEvent::ConfirmSelection);
        assert_eq!(done.outcome(), MinigameOutcome::Success);
    }

    #[test]
    fn test_select_second_and_confirm() {
        let game = FlagIdentification::default();
        let session = FlagIdentification::session("France", &CHOICES).unwrap();

        let moved = game.handle_input(&session, InputEvent::NavigateNext);
        assert_eq!(moved.selected(), Some(1));
        let done = game.handle_input(&moved, InputEvent::ConfirmSelection);
        assert_eq!(done.outcome(), MinigameOutcome::Failure);
    }

    #[test]
    fn test_session_requires_country_in_choices() {
        assert!(FlagIdentification::session("Canada", &CHOICES).is_err());
    }

    #[test]
    fn test_initialize_choices() {
        let game = FlagIdentification::default();
        let mut rng = MinigameRng::new(21);

        for _ in 0..100 {
            let session = game.initialize(&mut Offline, &mut rng);
            let Challenge::Flag { flag, question } = session.challenge() else {
                panic!("expected a flag challenge");
            };

            assert_eq!(question.candidates().len(), CHOICE_COUNT);
            assert!(question.candidates().contains(&flag.country));

            let mut unique = question.candidates().to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), CHOICE_COUNT);
        }
    }

    #[test]
    fn test_initialize_is_seeded() {
        let game = FlagIdentification::default();
        let a = game.initialize(&mut Offline, &mut MinigameRng::new(5));
        let b = game.initialize(&mut Offline, &mut MinigameRng::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_small_table_still_playable() {
        let game = FlagIdentification::with_flags(vec![Flag::new("Japan"), Flag::new("Canada")]);
        let session = game.initialize(&mut Offline, &mut MinigameRng::new(1));
        assert!(!session.is_unavailable());
        assert_eq!(session.option_count(), 2);
    }

    #[test]
    fn test_single_flag_table_is_unavailable() {
        let game = FlagIdentification::with_flags(vec![Flag::new("Japan")]);
        let session = game.initialize(&mut Offline, &mut MinigameRng::new(1));
        assert!(session.is_unavailable());
    }

    #[test]
    fn test_render_shows_flag() {
        let game = FlagIdentification::default();
        let session = FlagIdentification::session("Brazil", &CHOICES).unwrap();
        let frame = game.render(&session, std::time::Duration::from_secs(3));

        assert_eq!(frame.prompt, FLAG_PROMPT);
        assert_eq!(frame.image.as_deref(), Some("assets/flags/brazil.png"));
        assert_eq!(frame.options.len(), 4);
        assert!(frame.options[0].selected);
        assert!(!frame.options[1].selected);
    }
}
