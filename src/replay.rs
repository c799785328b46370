//! Recorded runs.
//!
//! A replay stores the minigame, the RNG position the session was created
//! from, the frame delta and every usable input event grouped by frame.
//! Replaying it with a [`SteppedClock`] and the same question source
//! reproduces the run exactly, since sessions are pure functions of their
//! input. Replays are stored with bincode.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{InputEvent, MinigameRng, MinigameRngState};
use crate::error::ReplayError;
use crate::minigames::{AnyMinigame, Minigame, MinigameKind};
use crate::runner::{FrameInput, InputSource, Renderer, RunReport, Runner, SteppedClock};
use crate::source::QuestionSource;

/// Input log of one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub game: AnyMinigame,
    /// RNG position right before the session was initialized.
    pub rng: MinigameRngState,
    pub frame_delta: Duration,
    /// Usable events, one entry per polled frame.
    pub frames: Vec<Vec<InputEvent>>,
}

impl Replay {
    #[must_use]
    pub fn kind(&self) -> MinigameKind {
        self.game.kind()
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }

    /// Input source feeding the recorded frames back.
    #[must_use]
    pub fn input(&self) -> ReplayInput {
        ReplayInput {
            frames: self.frames.clone(),
            next: 0,
        }
    }

    /// Clock advancing by the recorded frame delta.
    #[must_use]
    pub fn clock(&self) -> SteppedClock {
        SteppedClock::new(self.frame_delta)
    }

    /// Re-run the recording.
    pub fn play<R>(&self, runner: &Runner, source: &mut dyn QuestionSource, renderer: &mut R) -> RunReport
    where
        R: Renderer + ?Sized,
    {
        let mut rng = MinigameRng::from_state(&self.rng);
        runner.play(&self.game, source, &mut rng, &mut self.input(), &mut self.clock(), renderer)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReplayError> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ReplayError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}

/// Input source wrapper that records every usable event it passes on.
///
/// Malformed events are forwarded (the runner still counts them) but not
/// recorded.
#[derive(Debug)]
pub struct RecordingInput<I> {
    inner: I,
    frames: Vec<Vec<InputEvent>>,
}

impl<I: InputSource> RecordingInput<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            frames: Vec::new(),
        }
    }

    /// Frames recorded so far.
    #[must_use]
    pub fn frames(&self) -> &[Vec<InputEvent>] {
        &self.frames
    }

    /// Finish recording. `rng` must be the state captured before the
    /// session was initialized.
    #[must_use]
    pub fn into_replay(self, game: AnyMinigame, rng: MinigameRngState, frame_delta: Duration) -> Replay {
        Replay {
            game,
            rng,
            frame_delta,
            frames: self.frames,
        }
    }
}

impl<I: InputSource> InputSource for RecordingInput<I> {
    fn poll(&mut self) -> FrameInput {
        let frame = self.inner.poll();
        self.frames
            .push(frame.iter().filter_map(|polled| polled.as_ref().ok().copied()).collect());
        frame
    }
}

/// Recorded frames played back in order, then empty frames.
#[derive(Clone, Debug)]
pub struct ReplayInput {
    frames: Vec<Vec<InputEvent>>,
    next: usize,
}

impl InputSource for ReplayInput {
    fn poll(&mut self) -> FrameInput {
        let Some(events) = self.frames.get(self.next) else {
            return FrameInput::new();
        };
        self.next += 1;
        events.iter().copied().map(Ok).collect()
    }
}
