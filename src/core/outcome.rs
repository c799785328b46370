//! Tri-state session outcome.

use serde::{Deserialize, Serialize};

/// Result of a minigame session.
///
/// `Pending` is the only non-terminal state. Once a session has resolved
/// its outcome never changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinigameOutcome {
    #[default]
    Pending,
    Success,
    Failure,
}

impl MinigameOutcome {
    /// Outcome for a pass/fail verdict.
    #[must_use]
    pub const fn from_verdict(won: bool) -> Self {
        if won {
            MinigameOutcome::Success
        } else {
            MinigameOutcome::Failure
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, MinigameOutcome::Pending)
    }

    /// Settle a pending outcome. Terminal outcomes are returned unchanged.
    #[must_use]
    pub const fn resolve(self, won: bool) -> Self {
        match self {
            MinigameOutcome::Pending => Self::from_verdict(won),
            settled => settled,
        }
    }

    /// `Some(true)` on success, `Some(false)` on failure, `None` while pending.
    #[must_use]
    pub const fn verdict(self) -> Option<bool> {
        match self {
            MinigameOutcome::Pending => None,
            MinigameOutcome::Success => Some(true),
            MinigameOutcome::Failure => Some(false),
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, MinigameOutcome::Success)
    }
}

impl std::fmt::Display for MinigameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MinigameOutcome::Pending => write!(f, "pending"),
            MinigameOutcome::Success => write!(f, "success"),
            MinigameOutcome::Failure => write!(f, "failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_pending() {
        assert_eq!(MinigameOutcome::Pending.resolve(true), MinigameOutcome::Success);
        assert_eq!(MinigameOutcome::Pending.resolve(false), MinigameOutcome::Failure);
    }

    #[test]
    fn test_terminal_is_sticky() {
        assert_eq!(MinigameOutcome::Success.resolve(false), MinigameOutcome::Success);
        assert_eq!(MinigameOutcome::Failure.resolve(true), MinigameOutcome::Failure);
    }

    #[test]
    fn test_verdict() {
        assert_eq!(MinigameOutcome::default().verdict(), None);
        assert_eq!(MinigameOutcome::Success.verdict(), Some(true));
        assert_eq!(MinigameOutcome::Failure.verdict(), Some(false));
        assert!(!MinigameOutcome::Pending.is_terminal());
    }
}
