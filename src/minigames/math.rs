//! Short-answer arithmetic.
//!
//! Problems use two operands and one of `+ - * /`. Division is integer
//! floor division and its divisor is drawn from 2..=20, so it is never
//! zero. The player types the result; only digits and a leading minus are
//! accepted, and the entry must spell the answer exactly (`"059"` is not
//! 59).

use serde::{Deserialize, Serialize};

use crate::core::MinigameRng;
use crate::source::QuestionSource;

use super::{Challenge, Minigame, MinigameKind, MinigameSession, Presentation};

/// Operand range for everything except the divisor.
pub const OPERAND_RANGE: std::ops::RangeInclusive<i64> = 10..=99;

/// Divisor range.
pub const DIVISOR_RANGE: std::ops::RangeInclusive<i64> = 2..=20;

/// Arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Parse an operator symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    /// Evaluate `lhs op rhs`. `None` on division by zero or overflow.
    #[must_use]
    pub fn apply(self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Sub => lhs.checked_sub(rhs),
            Operator::Mul => lhs.checked_mul(rhs),
            Operator::Div => floor_div(lhs, rhs),
        }
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(lhs: i64, rhs: i64) -> Option<i64> {
    let quotient = lhs.checked_div(rhs)?;
    if lhs % rhs != 0 && ((lhs < 0) != (rhs < 0)) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

/// One arithmetic problem with its precomputed answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    lhs: i64,
    op: Operator,
    rhs: i64,
    answer: i64,
}

impl MathProblem {
    /// Build a problem. `None` if it cannot be evaluated.
    #[must_use]
    pub fn new(lhs: i64, op: Operator, rhs: i64) -> Option<Self> {
        let answer = op.apply(lhs, rhs)?;
        Some(Self { lhs, op, rhs, answer })
    }

    /// Draw a random problem.
    pub fn generate(rng: &mut MinigameRng) -> Self {
        let op = Operator::ALL[rng.gen_index(Operator::ALL.len())];
        let lhs = rng.gen_range_i64(OPERAND_RANGE);
        let rhs = match op {
            Operator::Div => rng.gen_range_i64(DIVISOR_RANGE),
            _ => rng.gen_range_i64(OPERAND_RANGE),
        };

        let answer = op.apply(lhs, rhs).unwrap_or_default();
        Self { lhs, op, rhs, answer }
    }

    #[must_use]
    pub fn lhs(&self) -> i64 {
        self.lhs
    }

    #[must_use]
    pub fn op(&self) -> Operator {
        self.op
    }

    #[must_use]
    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    #[must_use]
    pub fn answer(&self) -> i64 {
        self.answer
    }

    /// The answer as the player would type it.
    #[must_use]
    pub fn answer_text(&self) -> String {
        self.answer.to_string()
    }

    /// Display form, e.g. `"47 + 12 = ?"`.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{} {} {} = ?", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// Type the result of a generated problem.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortAnswerMath;

impl ShortAnswerMath {
    /// Session for a fixed problem.
    #[must_use]
    pub fn session(problem: MathProblem) -> MinigameSession {
        MinigameSession::new(MinigameKind::ShortAnswerMath, Challenge::Math(problem))
    }
}

impl Minigame for ShortAnswerMath {
    fn kind(&self) -> MinigameKind {
        MinigameKind::ShortAnswerMath
    }

    fn initialize(&self, _source: &mut dyn QuestionSource, rng: &mut MinigameRng) -> MinigameSession {
        Self::session(MathProblem::generate(rng))
    }

    fn is_correct(&self, session: &MinigameSession, answer: &str) -> bool {
        let Challenge::Math(problem) = session.challenge() else {
            return false;
        };

        answer.trim() == problem.answer_text()
    }

    fn accepts_char(&self, entry: &str, c: char) -> bool {
        c.is_ascii_digit() || (c == '-' && entry.is_empty())
    }

    fn render(&self, session: &MinigameSession, time_remaining: std::time::Duration) -> Presentation {
        let frame = Presentation::of(session, time_remaining);
        match session.challenge() {
            Challenge::Math(problem) => frame.with_prompt(problem.prompt()),
            _ => frame,
        }
    }
}
