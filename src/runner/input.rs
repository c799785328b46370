//! Input sources polled by the runner once per frame.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, TryRecvError};

use smallvec::SmallVec;

use crate::core::InputEvent;
use crate::error::InputError;

/// One polled event: either usable or malformed.
pub type PolledInput = Result<InputEvent, InputError>;

/// Everything that arrived during one frame.
///
/// Most frames carry zero or one event, so a few slots stay inline.
pub type FrameInput = SmallVec<[PolledInput; 4]>;

/// Provider of queued input events.
pub trait InputSource {
    /// Drain the events queued since the previous poll.
    fn poll(&mut self) -> FrameInput;
}

/// Pre-scripted input, one batch of events per frame.
///
/// Once the script runs out every further frame is empty.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script where every event arrives in its own frame.
    #[must_use]
    pub fn one_per_frame(events: impl IntoIterator<Item = InputEvent>) -> Self {
        let mut script = Self::new();
        for event in events {
            script = script.then(event);
        }
        script
    }

    /// Append a frame containing one event.
    #[must_use]
    pub fn then(self, event: InputEvent) -> Self {
        self.then_frame([Ok(event)])
    }

    /// Append a frame with arbitrary (possibly malformed) entries.
    #[must_use]
    pub fn then_frame(mut self, frame: impl IntoIterator<Item = PolledInput>) -> Self {
        self.frames.push_back(frame.into_iter().collect());
        self
    }

    /// Append `count` frames without input.
    #[must_use]
    pub fn idle(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back(FrameInput::new());
        }
        self
    }

    /// Typing helper: one character per frame.
    #[must_use]
    pub fn type_text(self, text: &str) -> Self {
        text.chars()
            .fold(self, |script, c| script.then(InputEvent::CharacterTyped(c)))
    }

    #[must_use]
    pub fn remaining_frames(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> FrameInput {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Input fed from another thread (e.g. a blocking stdin reader).
///
/// A disconnected sender is reported as a `Quit`, so the run ends when the
/// producer goes away.
#[derive(Debug)]
pub struct ChannelInput {
    receiver: Receiver<PolledInput>,
    closed: bool,
}

impl ChannelInput {
    #[must_use]
    pub fn new(receiver: Receiver<PolledInput>) -> Self {
        Self {
            receiver,
            closed: false,
        }
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self) -> FrameInput {
        let mut frame = FrameInput::new();
        if self.closed {
            return frame;
        }

        loop {
            match self.receiver.try_recv() {
                Ok(polled) => frame.push(polled),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    frame.push(Ok(InputEvent::Quit));
                    break;
                }
            }
        }

        frame
    }
}
