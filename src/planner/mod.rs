// src/planner/mod.rs

//! Fractile subdivision planner.
//!
//! Coordinates elicitations into a utility curve on `[lose_margin, win_margin]`:
//! - CE of the whole gamble → `x1`, utility ½·(U(lose)+U(win))
//! - CEs of `(lose, x1)` and `(x1, win)` → `x2`, `x3`
//! - CE of `(x2, x3)` → `x4`, which a consistent human puts back on `x1`
//!
//! Consistent answers are merged with the interval endpoints and every gap of
//! at least `delta` is subdivided the same way. Inconsistent answers are
//! reported and the same interval is elicited again.

use crate::error::{Error, Result};
use crate::mechanics::samples::{self, Gamble, Sample};
use crate::systems::sdk::{Elicitor, Report};

pub const CONTRADICTION: &str =
    "Controversial input data - x4 doesn't coincide with x1. Please correct your choices.";

/// Widening of the consistency tolerance after repeated contradictions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Relax {
    /// Contradictions in a row before each widening.
    pub after: usize,
    pub factor: f64,
}

impl Default for Relax {
    fn default() -> Self {
        Self { after: 3, factor: 2.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerConfig {
    pub lose_margin: f64,
    pub win_margin: f64,
    pub delta: f64,
    pub relax: Option<Relax>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { lose_margin: -1000.0, win_margin: 1000.0, delta: 50.0, relax: None }
    }
}

impl PlannerConfig {
    pub fn new(lose_margin: f64, win_margin: f64, delta: f64) -> Self {
        Self { lose_margin, win_margin, delta, relax: None }
    }

    pub fn validate(&self) -> Result<()> {
        let ordered = self.lose_margin.is_finite() && self.win_margin.is_finite() && self.lose_margin < self.win_margin;
        if !ordered {
            return Err(Error::InvalidInterval { lose: self.lose_margin, win: self.win_margin });
        }
        if !(self.delta.is_finite() && self.delta > 0.0) {
            return Err(Error::InvalidPrecision(self.delta));
        }
        Ok(())
    }

    /// The whole exercise: U(lose_margin) = 0, U(win_margin) = 1.
    pub fn whole(&self) -> Result<Gamble> {
        Gamble::new(Sample::new(self.lose_margin, 0.0), Sample::new(self.win_margin, 1.0))
    }
}

/// What the planner did, for inspection after a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    /// Intervals subdivided, in visiting order.
    pub intervals: Vec<(f64, f64)>,
    pub contradictions: usize,
}

pub struct Planner<E, R> {
    cfg: PlannerConfig,
    elicitor: E,
    report: R,
    trace: Trace,
}

impl<E: Elicitor, R: Report> Planner<E, R> {
    pub fn new(cfg: PlannerConfig, elicitor: E, report: R) -> Self {
        Self { cfg, elicitor, report, trace: Trace::default() }
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn into_parts(self) -> (E, R, Trace) {
        (self.elicitor, self.report, self.trace)
    }

    /// Full curve: `(lose_margin, 0)`, the elicited interior, `(win_margin, 1)`.
    pub fn build(&mut self) -> Result<Vec<Sample>> {
        self.cfg.validate()?;
        let whole = self.cfg.whole()?;
        let interior = self.subdivide(&whole, self.cfg.delta)?;
        let mut curve = Vec::with_capacity(interior.len() + 2);
        curve.push(whole.lose);
        curve.extend(interior);
        curve.push(whole.win);
        log::info!("utility curve built from {} samples", curve.len());
        Ok(curve)
    }

    /// Interior samples of `gamble`, sorted, unique, without its endpoints.
    pub fn subdivide(&mut self, gamble: &Gamble, delta: f64) -> Result<Vec<Sample>> {
        if gamble.is_degenerate() {
            return Ok(vec![gamble.lose]);
        }
        let (lose, win) = (gamble.lose, gamble.win);
        log::info!("subdividing [{}, {}]", lose.outcome, win.outcome);
        self.trace.intervals.push((lose.outcome, win.outcome));

        let mut tolerance = delta;
        let mut failures = 0usize;
        loop {
            let x1 = self.midpoint(gamble)?;
            let x2 = self.midpoint(&Gamble::new(lose, x1)?)?;
            let x3 = self.midpoint(&Gamble::new(x1, win)?)?;
            let x4 = self.midpoint(&Gamble::new(x2, x3)?)?;

            if (x1.outcome - x4.outcome).abs() <= tolerance {
                let elicited = [x1, x2, x3, x4];
                let merged = samples::merge([lose, win].into_iter().chain(elicited));

                let mut found = elicited.to_vec();
                for pair in merged.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let same_interval = a.outcome == lose.outcome && b.outcome == win.outcome;
                    if b.outcome - a.outcome >= delta && !same_interval {
                        found.extend(self.subdivide(&Gamble::new(a, b)?, delta)?);
                    }
                }
                found.retain(|s| !gamble.is_endpoint(s.outcome));
                return Ok(samples::merge(found));
            }

            self.trace.contradictions += 1;
            failures += 1;
            log::warn!(
                "x4 = {} strays {} from x1 = {} on [{}, {}]",
                x4.outcome,
                (x1.outcome - x4.outcome).abs(),
                x1.outcome,
                lose.outcome,
                win.outcome
            );
            self.report.say(CONTRADICTION);

            if let Some(relax) = self.cfg.relax {
                if relax.after > 0 && failures % relax.after == 0 {
                    tolerance *= relax.factor.max(1.0);
                    log::warn!("consistency tolerance relaxed to {tolerance}");
                }
            }
        }
    }

    /// CE of `gamble` with the fractile utility; degenerate gambles need no answer.
    fn midpoint(&mut self, gamble: &Gamble) -> Result<Sample> {
        let (lose, win) = (gamble.lose.outcome, gamble.win.outcome);
        let outcome = if gamble.is_degenerate() {
            lose
        } else {
            self.elicitor.certainty_equivalent(gamble)?
        };
        if !gamble.contains(outcome) {
            return Err(Error::OutsideGamble { value: outcome, lose, win });
        }
        Ok(Sample::new(outcome, gamble.midpoint_utility()))
    }
}
