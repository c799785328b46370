//! Time-boxed driver for one minigame session.
//!
//! Each frame the runner drains input into the session, renders it and
//! advances the timer by the frame's measured duration. It stops as soon
//! as the session resolves, the timer runs out (a pending session then
//! counts as lost), or a `Quit` event arrives.
//!
//! ```
//! use std::time::Duration;
//! use rust_minigames::core::{InputEvent, RunnerConfig};
//! use rust_minigames::minigames::{MathProblem, Operator, ShortAnswerMath};
//! use rust_minigames::runner::{NullRenderer, RunEnd, Runner, ScriptedInput, SteppedClock};
//!
//! let runner = Runner::new(RunnerConfig::default());
//! let session = ShortAnswerMath::session(MathProblem::new(47, Operator::Add, 12).unwrap());
//! let mut input = ScriptedInput::new().type_text("59").then(InputEvent::ConfirmSelection);
//!
//! let report = runner.run(
//!     &ShortAnswerMath,
//!     session,
//!     &mut input,
//!     &mut SteppedClock::new(Duration::from_millis(100)),
//!     &mut NullRenderer,
//! );
//! assert!(report.won());
//! assert_eq!(report.end, RunEnd::Resolved);
//! ```

mod clock;
mod input;

pub use clock::{FixedRateClock, FrameClock, SteppedClock};
pub use input::{ChannelInput, FrameInput, InputSource, PolledInput, ScriptedInput};

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::{InputEvent, MinigameOutcome, MinigameRng, RunnerConfig, Timer};
use crate::minigames::{Minigame, MinigameKind, MinigameSession, Presentation};
use crate::source::QuestionSource;

/// Receiver of rendered frames.
pub trait Renderer {
    fn draw(&mut self, frame: &Presentation);
}

/// Renderer that discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &Presentation) {}
}

/// Renderer that keeps every frame it is given.
#[derive(Clone, Debug, Default)]
pub struct FrameLog {
    pub frames: Vec<Presentation>,
}

impl Renderer for FrameLog {
    fn draw(&mut self, frame: &Presentation) {
        self.frames.push(frame.clone());
    }
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunEnd {
    /// The session resolved through input.
    Resolved,
    /// The time budget ran out.
    TimedOut,
    /// A quit event arrived.
    Quit,
}

/// Summary of one finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub kind: MinigameKind,
    /// Final outcome. Always terminal unless the run was quit.
    pub outcome: MinigameOutcome,
    pub end: RunEnd,
    /// Frames rendered.
    pub frames: u32,
    /// Game time consumed, as seen by the timer.
    pub elapsed: Duration,
    /// Malformed input events that were dropped.
    pub dropped_events: u32,
}

impl RunReport {
    /// Boolean result of the run: `true` only on success.
    #[must_use]
    pub fn won(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Drives sessions to completion.
#[derive(Clone, Debug, Default)]
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Initialize a session from `source` and run it.
    pub fn play<M, I, C, R>(
        &self,
        game: &M,
        source: &mut dyn QuestionSource,
        rng: &mut MinigameRng,
        input: &mut I,
        clock: &mut C,
        renderer: &mut R,
    ) -> RunReport
    where
        M: Minigame + ?Sized,
        I: InputSource + ?Sized,
        C: FrameClock + ?Sized,
        R: Renderer + ?Sized,
    {
        let session = game.initialize(source, rng);
        self.run(game, session, input, clock, renderer)
    }

    /// Run an existing session until it resolves, times out or is quit.
    pub fn run<M, I, C, R>(
        &self,
        game: &M,
        mut session: MinigameSession,
        input: &mut I,
        clock: &mut C,
        renderer: &mut R,
    ) -> RunReport
    where
        M: Minigame + ?Sized,
        I: InputSource + ?Sized,
        C: FrameClock + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut timer = Timer::new(self.config.time_limit());
        let mut frames = 0u32;
        let mut dropped_events = 0u32;

        debug!(kind = %game.kind(), limit = ?timer.limit(), "run started");

        let end = 'frames: loop {
            if session.outcome().is_terminal() {
                break RunEnd::Resolved;
            }
            if timer.is_expired() {
                session = session.expire();
                break RunEnd::TimedOut;
            }

            for polled in input.poll() {
                match polled {
                    Ok(InputEvent::Quit) => break 'frames RunEnd::Quit,
                    Ok(event) => {
                        session = game.handle_input(&session, event);
                        if session.outcome().is_terminal() {
                            break;
                        }
                    }
                    Err(error) => {
                        dropped_events += 1;
                        warn!(%error, "dropping input event");
                    }
                }
            }

            renderer.draw(&game.render(&session, timer.remaining()));
            frames += 1;
            timer.advance(clock.tick());
        };

        let report = RunReport {
            kind: game.kind(),
            outcome: session.outcome(),
            end,
            frames,
            elapsed: timer.elapsed(),
            dropped_events,
        };

        info!(
            kind = %report.kind,
            outcome = %report.outcome,
            end = ?report.end,
            frames = report.frames,
            "run finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Question;
    use crate::error::InputError;
    use crate::minigames::{Challenge, MathProblem, MultipleChoiceTrivia, Operator, ShortAnswerMath};
    use crate::source::{Offline, Subject};

    fn runner() -> Runner {
        Runner::new(RunnerConfig::default().with_time_limit(Duration::from_secs(1)))
    }

    fn clock() -> SteppedClock {
        SteppedClock::new(Duration::from_millis(100))
    }

    fn math_session() -> MinigameSession {
        ShortAnswerMath::session(MathProblem::new(47, Operator::Add, 12).unwrap())
    }

    #[test]
    fn test_resolves_on_correct_answer() {
        let mut input = ScriptedInput::new().type_text("59").then(InputEvent::ConfirmSelection);
        let report = runner().run(&ShortAnswerMath, math_session(), &mut input, &mut clock(), &mut NullRenderer);

        assert!(report.won());
        assert_eq!(report.end, RunEnd::Resolved);
        assert_eq!(report.frames, 3);
        assert_eq!(report.elapsed, Duration::from_millis(300));
    }

    #[test]
    fn test_wrong_answer_resolves_as_failure() {
        let mut input = ScriptedInput::new().type_text("60").then(InputEvent::ConfirmSelection);
        let report = runner().run(&ShortAnswerMath, math_session(), &mut input, &mut clock(), &mut NullRenderer);

        assert!(!report.won());
        assert_eq!(report.outcome, MinigameOutcome::Failure);
        assert_eq!(report.end, RunEnd::Resolved);
    }

    #[test]
    fn test_timeout_is_failure() {
        let mut input = ScriptedInput::new().type_text("59");
        let report = runner().run(&ShortAnswerMath, math_session(), &mut input, &mut clock(), &mut NullRenderer);

        assert_eq!(report.outcome, MinigameOutcome::Failure);
        assert_eq!(report.end, RunEnd::TimedOut);
        assert_eq!(report.frames, 10);
        assert_eq!(report.elapsed, Duration::from_secs(1));
    }

    #[test]
    fn test_quit_short_circuits() {
        let mut input = ScriptedInput::new()
            .then(InputEvent::CharacterTyped('5'))
            .then_frame([Ok(InputEvent::Quit), Ok(InputEvent::ConfirmSelection)]);
        let report = runner().run(&ShortAnswerMath, math_session(), &mut input, &mut clock(), &mut NullRenderer);

        assert_eq!(report.end, RunEnd::Quit);
        assert_eq!(report.outcome, MinigameOutcome::Pending);
        assert!(!report.won());
        assert_eq!(report.frames, 1);
    }

    #[test]
    fn test_malformed_events_are_dropped() {
        let mut input = ScriptedInput::new()
            .then_frame([
                Err(InputError::Malformed("garbage".into())),
                Ok(InputEvent::CharacterTyped('5')),
            ])
            .then_frame([Err(InputError::UnsupportedKey("F12".into()))])
            .then(InputEvent::CharacterTyped('9'))
            .then(InputEvent::ConfirmSelection);
        let report = runner().run(&ShortAnswerMath, math_session(), &mut input, &mut clock(), &mut NullRenderer);

        assert!(report.won());
        assert_eq!(report.dropped_events, 2);
    }

    #[test]
    fn test_events_after_resolution_are_ignored() {
        let mut input = ScriptedInput::new().type_text("59").then_frame([
            Ok(InputEvent::ConfirmSelection),
            Ok(InputEvent::Quit),
        ]);
        let report = runner().run(&ShortAnswerMath, math_session(), &mut input, &mut clock(), &mut NullRenderer);

        assert_eq!(report.end, RunEnd::Resolved);
        assert!(report.won());
    }

    #[test]
    fn test_unavailable_question_times_out() {
        let game = MultipleChoiceTrivia::new(Subject::Music);
        let mut input = ScriptedInput::one_per_frame([
            InputEvent::NavigateNext,
            InputEvent::ConfirmSelection,
            InputEvent::ConfirmSelection,
        ]);
        let mut frames = FrameLog::default();

        let report = runner().play(
            &game,
            &mut Offline,
            &mut MinigameRng::new(1),
            &mut input,
            &mut clock(),
            &mut frames,
        );

        assert_eq!(report.outcome, MinigameOutcome::Failure);
        assert_eq!(report.end, RunEnd::TimedOut);
        assert!(frames.frames.iter().all(|f| f.notice.is_some()));
    }

    #[test]
    fn test_countdown_is_rendered() {
        let question = Question::boolean("?", "True").unwrap();
        let game = MultipleChoiceTrivia::new(Subject::Science);
        let session = MinigameSession::new(game.kind(), Challenge::Choice(question));
        let mut frames = FrameLog::default();

        let report = Runner::new(RunnerConfig::default().with_time_limit(Duration::from_secs(3))).run(
            &game,
            session,
            &mut ScriptedInput::new(),
            &mut SteppedClock::new(Duration::from_millis(500)),
            &mut frames,
        );

        assert_eq!(report.frames, 6);
        let countdown: Vec<u64> = frames.frames.iter().map(Presentation::countdown).collect();
        assert_eq!(countdown, vec![3, 2, 2, 1, 1, 0]);
        assert_eq!(frames.frames[0].time_remaining, Duration::from_secs(3));
    }

    #[test]
    fn test_already_resolved_session_returns_immediately() {
        let session = ShortAnswerMath.handle_input(&math_session(), InputEvent::ConfirmSelection);
        let report = runner().run(&ShortAnswerMath, session, &mut ScriptedInput::new(), &mut clock(), &mut NullRenderer);

        assert_eq!(report.frames, 0);
        assert_eq!(report.end, RunEnd::Resolved);
        assert_eq!(report.outcome, MinigameOutcome::Failure);
    }
}
