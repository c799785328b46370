//! Core value types: questions, outcomes, input events, timers, RNG,
//! configuration.
//!
//! Everything here is variant-agnostic. Minigame variants and the runner
//! build on these types rather than defining their own.

pub mod config;
pub mod input;
pub mod outcome;
pub mod question;
pub mod rng;
pub mod timer;

pub use config::{RunnerConfig, Settings, TriviaConfig};
pub use input::{Direction, InputEvent};
pub use outcome::MinigameOutcome;
pub use question::{Question, QuestionKind, BOOLEAN_ANSWERS};
pub use rng::{MinigameRng, MinigameRngState};
pub use timer::Timer;
