//! Discrete input events consumed by minigames.

use serde::{Deserialize, Serialize};

/// One input event.
///
/// Events are serializable so a run's input stream can be recorded and
/// replayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Move the selection up (wraps to the last option).
    NavigatePrevious,
    /// Move the selection down (wraps to the first option).
    NavigateNext,
    /// Submit the current selection or entry.
    ConfirmSelection,
    /// A printable character was typed.
    CharacterTyped(char),
    /// Delete the last typed character.
    Backspace,
    /// The player closed the game; ends the run without resolving it.
    Quit,
}

/// Direction of a navigation event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl InputEvent {
    /// The navigation direction, if this is a navigation event.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            InputEvent::NavigatePrevious => Some(Direction::Previous),
            InputEvent::NavigateNext => Some(Direction::Next),
            _ => None,
        }
    }
}
