//! Runtime configuration.
//!
//! - `RunnerConfig`: time limit and frame rate of a run
//! - `TriviaConfig`: where and how trivia questions are fetched
//! - `Settings`: both of the above plus an optional fixed seed, loadable
//!   from TOML
//!
//! Every section has defaults, so an empty settings file is valid.
//!
//! ```toml
//! seed = 1234
//!
//! [runner]
//! time_limit_secs = 6.0
//! frame_rate = 60
//!
//! [trivia]
//! timeout_secs = 3.0
//! difficulty = "medium"
//! subjects = ["history", "film"]
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::source::{Difficulty, Subject};

/// Default time budget of one minigame, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: f64 = 6.0;

/// Default frame rate of the runner loop.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Highest frame rate accepted by validation.
pub const MAX_FRAME_RATE: u32 = 240;

/// Default Open Trivia DB endpoint.
pub const DEFAULT_TRIVIA_URL: &str = "https://opentdb.com/api.php";

/// Default bound on a trivia fetch, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: f64 = 3.0;

/// Runner loop parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Time budget of one run in seconds.
    pub time_limit_secs: f64,

    /// Target frames per second for the fixed-rate clock.
    pub frame_rate: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl RunnerConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_secs = limit.as_secs_f64();
        self
    }

    /// Set the target frame rate.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Time budget as a `Duration`. Non-finite or negative values map to zero.
    #[must_use]
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_limit_secs).unwrap_or(Duration::ZERO)
    }

    /// Length of one frame at the target rate.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_limit_secs.is_finite() && self.time_limit_secs > 0.0) {
            return Err(ConfigError::Invalid {
                field: "runner.time_limit_secs",
                message: format!("must be a positive number of seconds, got {}", self.time_limit_secs),
            });
        }

        if !(1..=MAX_FRAME_RATE).contains(&self.frame_rate) {
            return Err(ConfigError::Invalid {
                field: "runner.frame_rate",
                message: format!("must be between 1 and {MAX_FRAME_RATE}, got {}", self.frame_rate),
            });
        }

        Ok(())
    }
}

/// Trivia fetch parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriviaConfig {
    /// API endpoint.
    pub base_url: String,

    /// Bound on one request in seconds.
    pub timeout_secs: f64,

    /// Difficulty requested for multiple choice questions.
    pub difficulty: Difficulty,

    /// Subjects multiple choice trivia picks from.
    pub subjects: Vec<Subject>,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRIVIA_URL.to_string(),
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            difficulty: Difficulty::Medium,
            subjects: vec![
                Subject::History,
                Subject::Computers,
                Subject::Music,
                Subject::Film,
                Subject::Art,
                Subject::Politics,
            ],
        }
    }
}

impl TriviaConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::ZERO)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.timeout_secs.is_finite() && self.timeout_secs > 0.0) {
            return Err(ConfigError::Invalid {
                field: "trivia.timeout_secs",
                message: format!("must be a positive number of seconds, got {}", self.timeout_secs),
            });
        }

        if self.subjects.is_empty() {
            return Err(ConfigError::Invalid {
                field: "trivia.subjects",
                message: "at least one subject is required".to_string(),
            });
        }

        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "trivia.base_url",
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Top-level settings file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed for content generation. `None` picks one per launch.
    pub seed: Option<u64>,

    pub runner: RunnerConfig,

    pub trivia: TriviaConfig,
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.runner.validate()?;
        self.trivia.validate()
    }
}
