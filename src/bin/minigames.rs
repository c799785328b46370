use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use rust_minigames::core::{InputEvent, MinigameOutcome, MinigameRng, Settings};
use rust_minigames::error::InputError;
use rust_minigames::minigames::{AnyMinigame, Minigame, MinigameKind, Presentation};
use rust_minigames::replay::{RecordingInput, Replay};
use rust_minigames::runner::{
    ChannelInput, FixedRateClock, PolledInput, Renderer, RunEnd, RunReport, Runner,
};
use rust_minigames::source::{Offline, OpenTdbSource, QuestionSource, Subject};

#[derive(Parser)]
#[command(name = "minigames")]
#[command(about = "Play one time-boxed minigame in the terminal")]
#[command(version)]
struct Cli {
    /// Settings file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for generated content; overrides the settings file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Minigame to play; random when omitted
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// Trivia subject for multiple choice questions
    #[arg(long, value_parser = parse_subject)]
    subject: Option<Subject>,

    /// Never contact the trivia service
    #[arg(long)]
    offline: bool,

    /// Write a replay of the run to this file
    #[arg(long, conflicts_with = "replay")]
    record: Option<PathBuf>,

    /// Play back a recorded replay file instead of reading stdin
    #[arg(long)]
    replay: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Trivia,
    TrueOrFalse,
    Math,
    Typing,
    Flags,
}

impl From<KindArg> for MinigameKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Trivia => MinigameKind::MultipleChoiceTrivia,
            KindArg::TrueOrFalse => MinigameKind::BooleanTrivia,
            KindArg::Math => MinigameKind::ShortAnswerMath,
            KindArg::Typing => MinigameKind::WordTyping,
            KindArg::Flags => MinigameKind::FlagIdentification,
        }
    }
}

fn parse_subject(name: &str) -> Result<Subject, String> {
    Subject::ALL
        .into_iter()
        .find(|subject| subject.to_string() == name.to_lowercase())
        .ok_or_else(|| format!("unknown subject {name:?}"))
}

/// Map one line of stdin to input events.
///
/// - empty line: confirm
/// - `/p`, `/n`: previous and next option
/// - `/b`: backspace
/// - `/q`: quit
/// - any other text: typed character by character, then confirmed
fn parse_line(line: &str) -> Vec<PolledInput> {
    let line = line.trim_end_matches(['\r', '\n']);
    match line {
        "" => vec![Ok(InputEvent::ConfirmSelection)],
        "/p" => vec![Ok(InputEvent::NavigatePrevious)],
        "/n" => vec![Ok(InputEvent::NavigateNext)],
        "/b" => vec![Ok(InputEvent::Backspace)],
        "/q" => vec![Ok(InputEvent::Quit)],
        command if command.starts_with('/') => vec![Err(InputError::UnsupportedKey(command.to_string()))],
        text => text
            .chars()
            .map(|c| {
                if c.is_control() {
                    Err(InputError::Malformed(format!("control character {c:?}")))
                } else {
                    Ok(InputEvent::CharacterTyped(c))
                }
            })
            .chain(std::iter::once(Ok(InputEvent::ConfirmSelection)))
            .collect(),
    }
}

/// Feed stdin lines into a channel from a background thread.
fn spawn_stdin_reader() -> ChannelInput {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            for polled in parse_line(&line) {
                if tx.send(polled).is_err() {
                    return;
                }
            }
        }
    });
    ChannelInput::new(rx)
}

/// Prints a frame whenever something visible changes, the countdown
/// included.
#[derive(Default)]
struct TerminalRenderer {
    last: Option<Presentation>,
}

impl TerminalRenderer {
    fn print(frame: &Presentation) -> std::io::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out)?;
        writeln!(out, "[{}] {}s left", frame.kind, frame.countdown())?;

        if let Some(notice) = &frame.notice {
            writeln!(out, "{notice}")?;
            return out.flush();
        }
        if let Some(heading) = &frame.heading {
            writeln!(out, "{heading}")?;
        }
        if let Some(image) = &frame.image {
            writeln!(out, "(flag: {image})")?;
        }
        writeln!(out, "{}", frame.prompt)?;
        for option in &frame.options {
            let marker = if option.selected { '>' } else { ' ' };
            writeln!(out, " {marker} {}", option.label)?;
        }
        if let Some(entry) = &frame.entry {
            writeln!(out, "Your answer: {entry}")?;
        }
        out.flush()
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, frame: &Presentation) {
        let mut key = frame.clone();
        key.time_remaining = Duration::from_secs(frame.countdown());
        if self.last.as_ref() == Some(&key) {
            return;
        }

        if let Err(error) = Self::print(frame) {
            warn!(%error, "failed to draw frame");
        }
        self.last = Some(key);
    }
}

/// Trivia client, or `Offline` when disabled or when the client cannot be
/// built.
///
/// Answer shuffles draw from the `"trivia"` stream of `seed`.
fn question_source(offline: bool, settings: &Settings, seed: u64) -> Box<dyn QuestionSource> {
    if offline {
        return Box::new(Offline);
    }

    match OpenTdbSource::new(&settings.trivia, MinigameRng::new(seed).for_context("trivia")) {
        Ok(source) => Box::new(source),
        Err(error) => {
            warn!(%error, "trivia client unavailable, continuing offline");
            Box::new(Offline)
        }
    }
}

fn print_result(report: &RunReport) {
    match (report.end, report.outcome) {
        (RunEnd::Quit, _) => println!("Quit."),
        (_, MinigameOutcome::Success) => println!("Success!"),
        _ => println!("Failed!"),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let runner = Runner::new(settings.runner.clone());

    if let Some(path) = &cli.replay {
        let replay = Replay::load(path).with_context(|| format!("loading replay from {}", path.display()))?;
        info!(kind = %replay.kind(), events = replay.event_count(), "replaying");

        let mut source = question_source(cli.offline, &settings, replay.rng.seed);
        let report = replay.play(&runner, source.as_mut(), &mut TerminalRenderer::default());
        print_result(&report);
        return Ok(());
    }

    let seed = cli.seed.or(settings.seed).unwrap_or_else(rand::random);
    let mut rng = MinigameRng::new(seed);
    let mut source = question_source(cli.offline, &settings, seed);
    info!(seed, "starting minigame");

    let game = match cli.kind {
        Some(kind) => {
            let subject = cli.subject.unwrap_or(Subject::General);
            match AnyMinigame::for_kind(kind.into(), subject) {
                AnyMinigame::MultipleChoice(game) => {
                    AnyMinigame::MultipleChoice(game.with_difficulty(settings.trivia.difficulty))
                }
                other => other,
            }
        }
        None => AnyMinigame::random(&mut rng, &settings.trivia),
    };

    println!("{game_kind}: empty line confirms, /p /n move, /b deletes, /q quits", game_kind = game.kind());

    let start = rng.state();
    let mut input = RecordingInput::new(spawn_stdin_reader());
    let mut clock = FixedRateClock::new(settings.runner.frame_rate);
    let report = runner.play(
        &game,
        source.as_mut(),
        &mut rng,
        &mut input,
        &mut clock,
        &mut TerminalRenderer::default(),
    );
    print_result(&report);

    if let Some(path) = &cli.record {
        let replay = input.into_replay(game, start, clock.frame_duration());
        replay
            .save(path)
            .with_context(|| format!("writing replay to {}", path.display()))?;
        info!(path = %path.display(), events = replay.event_count(), "replay saved");
    }

    Ok(())
}
