// src/systems/sdk.rs

//! # Systems SDK
//!
//! Collaborator protocol for the elicitation **systems** (the estimator and
//! the convergence loop) and the planner that drives them.
//!
//! The algorithms never touch a terminal. Everything a human does goes
//! through one of these traits:
//!
//! - [`NumberInput`]: read a number, reprompting on malformed input; the
//!   provided [`NumberInput::read_float_in_range`] also reprompts on values
//!   outside a closed interval.
//! - [`YesNo`]: a binary choice.
//! - [`Report`]: lines of text shown to the human (verdicts, contradictions).
//! - [`ChartRenderer`]: draws the finished utility curve.
//! - [`Elicitor`]: produces the certainty equivalent of a gamble. The planner
//!   only sees this one; closures `FnMut(&Gamble) -> Result<f64>` qualify,
//!   which is how tests stub a perfectly consistent human.
//!
//! Terminal and chart implementations live in `crate::io` (feature `cli`).
//! [`Script`] is the scripted console used by tests and demos: it replays
//! queued raw answers and keeps a transcript of everything said.
//!
//! ## Failure model
//! - Malformed or out-of-range numbers: recoverable, reprompt forever.
//! - Running out of answers: [`Error::InputExhausted`], which ends the run.

// -----------------------------------------------------------------------------
// Implementation
// -----------------------------------------------------------------------------

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::mechanics::samples::{Gamble, Sample};

pub const NOT_A_NUMBER: &str = "You supplied incorrect value, must be number.";

/// Parses one answer; only finite numbers count.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Message shown when a number falls outside `[lo, hi]`.
pub fn out_of_range(lo: f64, hi: f64) -> String {
    format!("Incorrect value - it must be between {lo} and {hi}")
}

pub trait NumberInput {
    /// Next finite number; malformed answers are rejected and asked again.
    fn read_float(&mut self, prompt: &str) -> Result<f64>;

    /// Tell the human why the last answer was refused.
    fn reject(&mut self, reason: &str);

    fn read_float_in_range(&mut self, prompt: &str, lo: f64, hi: f64) -> Result<f64> {
        loop {
            let v = self.read_float(prompt)?;
            if v >= lo && v <= hi {
                return Ok(v);
            }
            self.reject(&out_of_range(lo, hi));
        }
    }
}

pub trait YesNo {
    fn read_yes_no(&mut self, prompt: &str) -> Result<bool>;
}

pub trait Report {
    fn say(&mut self, line: &str);
}

/// Everything the convergence loop needs from a human.
pub trait Console: NumberInput + YesNo + Report {}
impl<T: NumberInput + YesNo + Report> Console for T {}

/// A collected transcript is a report too.
impl Report for Vec<String> {
    fn say(&mut self, line: &str) {
        self.push(line.to_owned());
    }
}

impl<T: Report + ?Sized> Report for &mut T {
    fn say(&mut self, line: &str) {
        (**self).say(line)
    }
}

/// Line plot request.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

impl Chart {
    /// The utility curve chart for an ordered sample set.
    pub fn utility(samples: &[Sample]) -> Self {
        Self {
            title: "Utility function".into(),
            x_label: "Gainings".into(),
            y_label: "Utility".into(),
            points: samples.iter().map(|s| (s.outcome, s.utility)).collect(),
        }
    }
}

pub trait ChartRenderer {
    fn render_line_chart(&mut self, chart: &Chart) -> Result<()>;
}

/// Source of certainty equivalents for 50/50 gambles.
pub trait Elicitor {
    /// A value inside `[gamble.lose.outcome, gamble.win.outcome]`.
    fn certainty_equivalent(&mut self, gamble: &Gamble) -> Result<f64>;
}

impl<F> Elicitor for F
where
    F: FnMut(&Gamble) -> Result<f64>,
{
    fn certainty_equivalent(&mut self, gamble: &Gamble) -> Result<f64> {
        self(gamble)
    }
}

/// Generic result of a human-in-the-loop run.
#[derive(Clone, Debug)]
pub struct Outcome<T, H> {
    pub value: T,
    pub rounds: usize,
    pub history: Vec<H>,
}

/// Scripted console: replays queued answers, records everything said.
#[derive(Clone, Debug, Default)]
pub struct Script {
    numbers: VecDeque<String>,
    answers: VecDeque<bool>,
    pub said: Vec<String>,
    pub prompts: Vec<String>,
}

impl Script {
    pub fn new<S: Into<String>>(
        numbers: impl IntoIterator<Item = S>,
        answers: impl IntoIterator<Item = bool>,
    ) -> Self {
        Self {
            numbers: numbers.into_iter().map(Into::into).collect(),
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Raw number answers not consumed yet.
    pub fn pending_numbers(&self) -> usize {
        self.numbers.len()
    }

    /// Yes/no answers not consumed yet.
    pub fn pending_answers(&self) -> usize {
        self.answers.len()
    }
}

impl NumberInput for Script {
    fn read_float(&mut self, prompt: &str) -> Result<f64> {
        loop {
            self.prompts.push(prompt.to_owned());
            let raw = self
                .numbers
                .pop_front()
                .ok_or_else(|| Error::InputExhausted(prompt.to_owned()))?;
            match parse_number(&raw) {
                Some(v) => return Ok(v),
                None => self.reject(NOT_A_NUMBER),
            }
        }
    }

    fn reject(&mut self, reason: &str) {
        self.said.push(reason.to_owned());
    }
}

impl YesNo for Script {
    fn read_yes_no(&mut self, prompt: &str) -> Result<bool> {
        self.prompts.push(prompt.to_owned());
        self.answers
            .pop_front()
            .ok_or_else(|| Error::InputExhausted(prompt.to_owned()))
    }
}

impl Report for Script {
    fn say(&mut self, line: &str) {
        self.said.push(line.to_owned());
    }
}
