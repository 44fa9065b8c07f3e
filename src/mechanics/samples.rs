//! Samples of the utility curve and the 50/50 gambles spanned by two of them.

use std::collections::HashSet;

use crate::error::{Error, Result};

/// One point of the utility curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub outcome: f64,
    pub utility: f64,
}

impl Sample {
    pub fn new(outcome: f64, utility: f64) -> Self {
        Self { outcome, utility }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((outcome, utility): (f64, f64)) -> Self {
        Self { outcome, utility }
    }
}

/// A bet paying `lose.outcome` or `win.outcome` with probability 1/2 each,
/// with the utility of both bounds already known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gamble {
    pub lose: Sample,
    pub win: Sample,
}

impl Gamble {
    /// Fails when the bounds are not finite or `lose` lies above `win`.
    pub fn new(lose: Sample, win: Sample) -> Result<Self> {
        let ordered = lose.outcome.is_finite() && win.outcome.is_finite() && lose.outcome <= win.outcome;
        if !ordered {
            return Err(Error::InvalidInterval { lose: lose.outcome, win: win.outcome });
        }
        Ok(Self { lose, win })
    }

    /// Gamble over bare outcomes, for callers that only need the range.
    pub fn range(lose: f64, win: f64) -> Result<Self> {
        Self::new(Sample::new(lose, 0.0), Sample::new(win, 1.0))
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.win.outcome - self.lose.outcome
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.lose.outcome == self.win.outcome
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lose.outcome && x <= self.win.outcome
    }

    #[inline]
    pub fn is_endpoint(&self, x: f64) -> bool {
        x == self.lose.outcome || x == self.win.outcome
    }

    /// Fractile construction: U(CE(A,B)) = 0.5·U(A) + 0.5·U(B).
    #[inline]
    pub fn midpoint_utility(&self) -> f64 {
        0.5 * (self.lose.utility + self.win.utility)
    }
}

/// Drops repeated outcomes (first occurrence wins) and sorts ascending by outcome.
pub fn merge(samples: impl IntoIterator<Item = Sample>) -> Vec<Sample> {
    // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
    let mut seen: HashSet<u64> = HashSet::new();
    let mut out: Vec<Sample> = samples
        .into_iter()
        .filter(|s| seen.insert((s.outcome + 0.0).to_bits()))
        .collect();
    out.sort_by(|a, b| a.outcome.total_cmp(&b.outcome));
    out
}

/// Strictly ascending outcomes, i.e. sorted with no duplicates.
pub fn is_strictly_sorted(samples: &[Sample]) -> bool {
    samples.windows(2).all(|w| w[0].outcome < w[1].outcome)
}

/// Utility never decreases as the outcome grows.
pub fn is_monotone(samples: &[Sample]) -> bool {
    samples.windows(2).all(|w| w[0].utility <= w[1].utility)
}
