//! Error types for the minigame engine.
//!
//! None of the runtime errors here escape a run. `QuestionUnavailable`
//! degrades a trivia session to a guaranteed loss, `InputError` is dropped
//! by the runner, and a timeout is not an error at all (the runner coerces
//! it to `Failure`). The remaining enums cover construction, configuration
//! and replay files.

use std::time::Duration;

use thiserror::Error;

/// Why a question source could not produce a question.
#[derive(Clone, Debug, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum QuestionUnavailable {
    /// Transport failure (DNS, connection refused, TLS, non-2xx status).
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete inside its time budget.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The payload could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The service answered but signalled that it has no question.
    #[error("service returned no question (response code {code})")]
    NoQuestion { code: u8 },

    /// The payload decoded but violated the question invariants.
    #[error("invalid question: {0}")]
    InvalidQuestion(#[from] QuestionError),
}

/// Violations of the `Question` invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum QuestionError {
    #[error("multiple choice question needs at least two candidates, got {0}")]
    TooFewCandidates(usize),

    #[error("correct answer {0:?} is not among the candidates")]
    CorrectNotInCandidates(String),

    #[error("boolean answer must be \"True\" or \"False\", got {0:?}")]
    InvalidBoolean(String),
}

/// A malformed or unsupported event coming out of an input source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unsupported key: {0}")]
    UnsupportedKey(String),

    #[error("malformed input: {0}")]
    Malformed(String),
}

/// Settings file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Replay file errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to access replay file: {0}")]
    Io(#[from] std::io::Error),

    #[error("replay codec error: {0}")]
    Codec(#[from] bincode::Error),
}
