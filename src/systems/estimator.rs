//! Certainty-equivalent estimator.
//!
//! Scores a candidate sure amount `x` against a 50/50 gamble by simulated play:
//! each trial draws `Y ~ Uniform[lose, win]`; when `Y >= x` the trial pays `Y`,
//! otherwise the sure amount is not offered and the gamble itself is played.
//! Neighbouring candidates are scored the same way to produce advice.

use std::cell::RefCell;

use bevy_prng::WyRand;
use rand_core::{RngCore, SeedableRng};

use crate::mechanics::advice::{judge, Best, Probe, Tally, Verdict};
use crate::mechanics::samples::Gamble;
use crate::mechanics::stoch;

#[derive(Clone, Copy, Debug)]
pub struct EstimatorConfig {
    /// Spacing of probed neighbours; also the "close enough" margin of advice.
    pub step: f64,
    pub trials_per_run: usize,
    /// Runs averaged per estimate.
    pub trial_passes: usize,
    /// Neighbours probed per side and pass.
    pub neighbours: usize,
    pub probe_passes: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self { step: 1.0, trials_per_run: 1000, trial_passes: 3, neighbours: 100, probe_passes: 5 }
    }
}

/// What the convergence loop needs from an estimator.
pub trait Assess {
    /// Average payoff of choosing `x`.
    fn estimate(&self, x: f64, gamble: &Gamble) -> f64;

    /// Verdict for `x` and the (possibly updated) best candidate.
    fn advise(&self, x: f64, gain: f64, gamble: &Gamble, best: Option<Best>) -> (Verdict, Option<Best>);
}

pub struct Estimator<R = WyRand> {
    cfg: EstimatorConfig,
    rng: RefCell<R>,
}

impl Estimator<WyRand> {
    pub fn seeded(cfg: EstimatorConfig, seed: u64) -> Self {
        Self::with_rng(cfg, WyRand::from_seed(seed.to_le_bytes()))
    }
}

impl<R: RngCore> Estimator<R> {
    pub fn with_rng(cfg: EstimatorConfig, rng: R) -> Self {
        Self { cfg, rng: RefCell::new(rng) }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.cfg
    }

    /// Sum of payoffs over one run of `trials_per_run` trials.
    fn run(&self, x: f64, lose: f64, win: f64) -> f64 {
        let mut sum = 0.0;
        for _ in 0..self.cfg.trials_per_run {
            let y = stoch::uniform(&self.rng, lose, win);
            sum += if y >= x { y } else { stoch::coin(&self.rng, lose, win) };
        }
        sum
    }

    /// Scores `step`-spaced neighbours of `x` that stay inside the gamble.
    pub fn probe(&self, x: f64, gamble: &Gamble) -> Probe {
        let (mut left, mut right) = (Tally::default(), Tally::default());
        for _ in 0..self.cfg.probe_passes {
            for i in 1..=self.cfg.neighbours {
                let offset = self.cfg.step * i as f64;
                let l_x = x - offset;
                if gamble.contains(l_x) {
                    left.push(self.estimate(l_x, gamble));
                }
                let r_x = x + offset;
                if gamble.contains(r_x) {
                    right.push(self.estimate(r_x, gamble));
                }
            }
        }
        Probe { left: left.stats(), right: right.stats() }
    }
}

impl<R: RngCore> Assess for Estimator<R> {
    fn estimate(&self, x: f64, gamble: &Gamble) -> f64 {
        let (lose, win) = (gamble.lose.outcome, gamble.win.outcome);
        let total = self.cfg.trials_per_run * self.cfg.trial_passes;
        if total == 0 {
            return 0.5 * (lose + win);
        }
        let sum: f64 = (0..self.cfg.trial_passes).map(|_| self.run(x, lose, win)).sum();
        let gain = sum / total as f64;
        log::debug!("estimate x={x} on [{lose}, {win}] -> {gain:.4}");
        gain
    }

    fn advise(&self, x: f64, gain: f64, gamble: &Gamble, best: Option<Best>) -> (Verdict, Option<Best>) {
        let probe = self.probe(x, gamble);
        log::debug!("probe around x={x}: {probe:?}");
        let verdict = judge(gain, &probe, best.map(|b| b.gain), self.cfg.step);
        let best = if verdict.accepts() { Some(Best { x, gain }) } else { best };
        (verdict, best)
    }
}
