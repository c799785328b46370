//! Countdown timer advanced by frame deltas.

use std::time::Duration;

/// Remaining time for one run.
///
/// Owned by the runner; minigames only ever see `remaining()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    limit: Duration,
    remaining: Duration,
}

impl Timer {
    /// Start a full timer.
    #[must_use]
    pub const fn new(limit: Duration) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }

    /// Subtract one frame's elapsed time, saturating at zero.
    pub fn advance(&mut self, delta: Duration) {
        self.remaining = self.remaining.saturating_sub(delta);
    }

    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.limit - self.remaining
    }

    #[must_use]
    pub const fn limit(&self) -> Duration {
        self.limit
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }
}
