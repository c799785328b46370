//! # rust-minigames
//!
//! Engine for short, time-boxed minigames: trivia (multiple choice and
//! true/false), mental arithmetic, word typing and flag recognition.
//!
//! ## Design Principles
//!
//! 1. **Sessions Are Values**: Input handling maps a session and an event
//!    to the next session. The same event sequence always yields the same
//!    sessions, which keeps variants testable and runs replayable.
//!
//! 2. **Losing Is The Only Failure**: A missing trivia question, a timeout
//!    or a wrong answer all end as `Failure`. Nothing a player does or the
//!    network does makes a run error out.
//!
//! 3. **Seeded Content**: Locally generated content (arithmetic problems,
//!    words, flag choices) depends only on a `MinigameRng`.
//!
//! ## Modules
//!
//! - `core`: Questions, outcomes, input events, timers, RNG, configuration
//! - `source`: Question sources, including the Open Trivia DB client
//! - `minigames`: The `Minigame` trait, sessions and the five variants
//! - `runner`: Frame loop with time budget, clocks and input sources
//! - `replay`: Recording and replaying runs
//! - `error`: Error types

pub mod core;
pub mod error;
pub mod minigames;
pub mod replay;
pub mod runner;
pub mod source;

// Re-export commonly used types
pub use crate::core::{
    InputEvent, MinigameOutcome, MinigameRng, Question, QuestionKind, RunnerConfig, Settings,
    TriviaConfig,
};

pub use crate::error::{ConfigError, InputError, QuestionError, QuestionUnavailable, ReplayError};

pub use crate::minigames::{
    AnyMinigame, BooleanTrivia, FlagIdentification, Minigame, MinigameKind, MinigameSession,
    MultipleChoiceTrivia, Presentation, ShortAnswerMath, WordTyping,
};

pub use crate::replay::{RecordingInput, Replay};

pub use crate::runner::{
    FixedRateClock, FrameClock, InputSource, Renderer, RunEnd, RunReport, Runner, SteppedClock,
};

pub use crate::source::{OpenTdbSource, QuestionSource, Subject, TriviaRequest};
