//! Frame pacing.

use std::time::{Duration, Instant};

/// Source of per-frame time deltas.
pub trait FrameClock {
    /// Finish the current frame and return the time it took.
    fn tick(&mut self) -> Duration;
}

/// Wall-clock pacing at a fixed frame rate.
///
/// Sleeps away whatever is left of the frame budget, then reports the
/// measured time since the previous tick (which can exceed the budget on
/// slow frames).
#[derive(Debug)]
pub struct FixedRateClock {
    frame: Duration,
    last: Instant,
}

impl FixedRateClock {
    #[must_use]
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / frame_rate.max(1),
            last: Instant::now(),
        }
    }

    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl FrameClock for FixedRateClock {
    fn tick(&mut self) -> Duration {
        let spent = self.last.elapsed();
        if let Some(rest) = self.frame.checked_sub(spent) {
            std::thread::sleep(rest);
        }

        let now = Instant::now();
        let delta = now - self.last;
        self.last = now;
        delta
    }
}

/// Clock that advances by the same delta every frame without sleeping.
///
/// Makes runs reproducible; used by tests and replays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SteppedClock {
    delta: Duration,
}

impl SteppedClock {
    #[must_use]
    pub const fn new(delta: Duration) -> Self {
        Self { delta }
    }

    /// Delta of one frame at `frame_rate` frames per second.
    #[must_use]
    pub fn at_rate(frame_rate: u32) -> Self {
        Self::new(Duration::from_secs(1) / frame_rate.max(1))
    }

    #[must_use]
    pub const fn delta(&self) -> Duration {
        self.delta
    }
}

impl FrameClock for SteppedClock {
    fn tick(&mut self) -> Duration {
        self.delta
    }
}
