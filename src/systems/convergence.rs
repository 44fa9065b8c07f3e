//! Interactive convergence loop: the human proposes candidates, the estimator
//! scores and advises, and the human may stop at the best candidate so far.
//!
//! Two phases, `Eliciting` and `Done`. Each round reads a candidate, estimates
//! its gain, reports the verdict and, once a best candidate exists, offers it.
//! Accepting ends the run with that candidate as the certainty equivalent.
//! The best-so-far record is created per run and dropped afterwards, so
//! independent elicitations never see each other's candidates.

use std::cell::RefCell;

use crate::error::Result;
use crate::mechanics::advice::{Best, Verdict};
use crate::mechanics::samples::Gamble;
use crate::refine;
use crate::systems::estimator::Assess;
use crate::systems::sdk::{Console, Elicitor, NumberInput, Outcome};

/// Per-run record of the best candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EstimatorState {
    pub best: Option<Best>,
    pub rounds: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Eliciting(EstimatorState),
    Done { ce: Best, rounds: usize },
}

impl Phase {
    fn state(&self) -> EstimatorState {
        match *self {
            Phase::Eliciting(s) => s,
            Phase::Done { ce, rounds } => EstimatorState { best: Some(ce), rounds },
        }
    }
}

/// One proposed candidate and what the estimator made of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Round {
    pub x: f64,
    pub gain: f64,
    pub verdict: Verdict,
}

pub struct ConvergenceLoop<A, C> {
    assessor: A,
    console: C,
}

impl<A: Assess, C: Console> ConvergenceLoop<A, C> {
    pub fn new(assessor: A, console: C) -> Self {
        Self { assessor, console }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_parts(self) -> (A, C) {
        (self.assessor, self.console)
    }

    /// Runs until the human accepts a best candidate.
    pub fn run(&mut self, gamble: &Gamble) -> Result<Outcome<f64, Round>> {
        let (lose, win) = (gamble.lose.outcome, gamble.win.outcome);
        let assessor = &self.assessor;
        let console = RefCell::new(&mut self.console);
        let history = RefCell::new(Vec::new());
        let prompt = format!("Choose x in [{lose}, {win}]: ");

        console
            .borrow_mut()
            .say(&format!("Looking for the certainty equivalent of the 50/50 gamble ({lose}, {win})."));

        let simulate = |_phase: &Phase| -> Result<(f64, f64)> {
            let x = console.borrow_mut().read_float_in_range(&prompt, lose, win)?;
            Ok((x, assessor.estimate(x, gamble)))
        };

        let measure = |phase: &Phase, &(x, gain): &(f64, f64)| {
            assessor.advise(x, gain, gamble, phase.state().best)
        };

        let update = |phase: &Phase, &(x, gain): &(f64, f64), &(verdict, best): &(Verdict, Option<Best>)| -> Result<Phase> {
            let rounds = phase.state().rounds + 1;
            history.borrow_mut().push(Round { x, gain, verdict });
            let mut c = console.borrow_mut();
            c.say(&verdict.to_string());
            let Some(best) = best else {
                return Ok(Phase::Eliciting(EstimatorState { best: None, rounds }));
            };
            if c.read_yes_no(&format!("Use best x so far ({}) (y/N)? ", best.x))? {
                Ok(Phase::Done { ce: best, rounds })
            } else {
                Ok(Phase::Eliciting(EstimatorState { best: Some(best), rounds }))
            }
        };

        let done = |_prev: &Phase, next: &Phase| matches!(next, Phase::Done { .. });

        let phase = refine(Phase::Eliciting(EstimatorState::default()), simulate, measure, update, done)?;
        let Phase::Done { ce, rounds } = phase else {
            unreachable!("refine only returns once the loop is done");
        };
        log::info!("certainty equivalent of ({lose}, {win}) accepted: {} after {rounds} rounds", ce.x);
        Ok(Outcome { value: ce.x, rounds, history: history.into_inner() })
    }
}

impl<A: Assess, C: Console> Elicitor for ConvergenceLoop<A, C> {
    fn certainty_equivalent(&mut self, gamble: &Gamble) -> Result<f64> {
        self.run(gamble).map(|o| o.value)
    }
}

/// Asks for the certainty equivalent outright, without simulated play.
pub struct Direct<I> {
    input: I,
}

impl<I: NumberInput> Direct<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }

    pub fn into_inner(self) -> I {
        self.input
    }
}

impl<I: NumberInput> Elicitor for Direct<I> {
    fn certainty_equivalent(&mut self, gamble: &Gamble) -> Result<f64> {
        let (lose, win) = (gamble.lose.outcome, gamble.win.outcome);
        let prompt = format!(
            "Input value which utility is equivalent to utility of game ({lose}, {win}) with probabilities (1/2, 1/2): "
        );
        self.input.read_float_in_range(&prompt, lose, win)
    }
}
