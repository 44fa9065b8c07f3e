// tests/planner.rs
use std::collections::{HashSet, VecDeque};

use fractile::mechanics::advice::{Best, Verdict};
use fractile::mechanics::samples::{is_monotone, is_strictly_sorted};
use fractile::planner::{CONTRADICTION, Planner, PlannerConfig, Relax};
use fractile::systems::convergence::ConvergenceLoop;
use fractile::systems::estimator::Assess;
use fractile::systems::sdk::Script;
use fractile::{Error, Gamble, Result, Sample};

/// A perfectly risk-neutral human: the CE is always the middle of the gamble.
fn mean(g: &Gamble) -> Result<f64> {
    Ok(0.5 * (g.lose.outcome + g.win.outcome))
}

fn pairs(samples: &[Sample]) -> Vec<(f64, f64)> {
    samples.iter().map(|s| (s.outcome, s.utility)).collect()
}

/* ──────────────────────────────────────────────────────────────────────────
1) Fractile construction on a single interval
────────────────────────────────────────────────────────────────────────── */

#[test]
fn midpoint_utility_is_mean_of_bounds() {
    let g = Gamble::new(Sample::new(0.0, 0.25), Sample::new(100.0, 0.75)).unwrap();
    let mut planner = Planner::new(PlannerConfig::new(0.0, 100.0, 60.0), mean, Vec::<String>::new());

    let out = planner.subdivide(&g, 60.0).unwrap();
    assert_eq!(pairs(&out), vec![(25.0, 0.375), (50.0, 0.5), (75.0, 0.625)]);
    assert_eq!(planner.trace().intervals, vec![(0.0, 100.0)]);
}

#[test]
fn degenerate_interval_short_circuits() {
    let g = Gamble::new(Sample::new(5.0, 0.5), Sample::new(5.0, 0.5)).unwrap();
    let never = |_g: &Gamble| -> Result<f64> { panic!("a degenerate interval needs no answer") };
    let mut planner = Planner::new(PlannerConfig::default(), never, Vec::<String>::new());
    assert_eq!(planner.subdivide(&g, 1.0).unwrap(), vec![Sample::new(5.0, 0.5)]);
}

/* ──────────────────────────────────────────────────────────────────────────
2) Whole curve
────────────────────────────────────────────────────────────────────────── */

#[test]
fn answers_collapsing_on_zero_need_no_recursion() {
    // Every CE answered with 0, the mean of the global margins.
    let zero = |_g: &Gamble| -> Result<f64> { Ok(0.0) };
    let mut planner = Planner::new(PlannerConfig::new(-1000.0, 1000.0, 50.0), zero, Vec::<String>::new());

    let curve = planner.build().unwrap();
    assert_eq!(pairs(&curve), vec![(-1000.0, 0.0), (0.0, 0.5), (1000.0, 1.0)]);
    assert_eq!(planner.trace().contradictions, 0);
}

#[test]
fn risk_neutral_curve_is_dense_sorted_and_linear() {
    let mut planner = Planner::new(PlannerConfig::new(-1000.0, 1000.0, 50.0), mean, Vec::<String>::new());
    let curve = planner.build().unwrap();

    assert!(is_strictly_sorted(&curve));
    assert!(is_monotone(&curve));
    assert!(curve.windows(2).all(|w| w[1].outcome - w[0].outcome < 50.0));
    // 2000 / 2^6 = 31.25 spacing → 65 samples
    assert_eq!(curve.len(), 65);
    for s in &curve {
        assert_eq!(s.utility, (s.outcome + 1000.0) / 2000.0, "{s:?}");
    }
}

#[test]
fn curve_always_spans_the_margins() {
    for delta in [5000.0, 300.0, 50.0, 7.5] {
        let mut planner = Planner::new(PlannerConfig::new(-1000.0, 1000.0, delta), mean, Vec::<String>::new());
        let curve = planner.build().unwrap();
        assert_eq!(curve.first(), Some(&Sample::new(-1000.0, 0.0)), "delta = {delta}");
        assert_eq!(curve.last(), Some(&Sample::new(1000.0, 1.0)), "delta = {delta}");
    }
}

#[test]
fn no_interval_is_subdivided_twice() {
    let mut planner = Planner::new(PlannerConfig::new(0.0, 640.0, 10.0), mean, Vec::<String>::new());
    let first = planner.build().unwrap();

    let intervals = &planner.trace().intervals;
    let unique: HashSet<(u64, u64)> = intervals.iter().map(|&(a, b)| (a.to_bits(), b.to_bits())).collect();
    assert_eq!(unique.len(), intervals.len());

    let mut again = Planner::new(PlannerConfig::new(0.0, 640.0, 10.0), mean, Vec::<String>::new());
    assert_eq!(again.build().unwrap(), first);
}

/* ──────────────────────────────────────────────────────────────────────────
3) Inconsistent answers
────────────────────────────────────────────────────────────────────────── */

#[test]
fn contradiction_is_reported_and_reasked() {
    let mut queued = VecDeque::from([50.0, 25.0, 75.0, 70.0]);
    let human = move |g: &Gamble| -> Result<f64> { Ok(queued.pop_front().unwrap_or(0.5 * (g.lose.outcome + g.win.outcome))) };
    let mut planner = Planner::new(PlannerConfig::new(0.0, 100.0, 10.0), human, Vec::<String>::new());

    let curve = planner.build().unwrap();
    assert_eq!(planner.trace().contradictions, 1);
    assert!(is_strictly_sorted(&curve) && is_monotone(&curve));

    let (_, report, _) = planner.into_parts();
    assert_eq!(report, vec![CONTRADICTION.to_owned()]);
}

#[test]
fn relaxed_tolerance_ends_persistent_contradictions() {
    // Always answers 30% into the gamble: x4 misses x1 by 8.4% of the span.
    let biased = |g: &Gamble| -> Result<f64> { Ok(g.lose.outcome + 0.3 * g.span()) };
    let cfg = PlannerConfig { relax: Some(Relax { after: 1, factor: 2.5 }), ..PlannerConfig::new(0.0, 100.0, 4.0) };
    let mut planner = Planner::new(cfg, biased, Vec::<String>::new());

    let curve = planner.build().unwrap();
    assert!(planner.trace().contradictions >= 1);
    assert!(is_strictly_sorted(&curve));
    assert!(is_monotone(&curve));
}

/* ──────────────────────────────────────────────────────────────────────────
4) Invalid input
────────────────────────────────────────────────────────────────────────── */

fn never(_g: &Gamble) -> Result<f64> {
    panic!("invalid configurations must not elicit")
}

#[test]
fn reversed_margins_are_rejected() {
    let mut planner = Planner::new(PlannerConfig::new(10.0, -10.0, 1.0), never, Vec::<String>::new());
    assert_eq!(planner.build().unwrap_err(), Error::InvalidInterval { lose: 10.0, win: -10.0 });
}

#[test]
fn non_positive_precision_is_rejected() {
    let mut planner = Planner::new(PlannerConfig::new(-10.0, 10.0, 0.0), never, Vec::<String>::new());
    assert_eq!(planner.build().unwrap_err(), Error::InvalidPrecision(0.0));

    let mut planner = Planner::new(PlannerConfig::new(-10.0, 10.0, f64::NAN), never, Vec::<String>::new());
    assert!(matches!(planner.build(), Err(Error::InvalidPrecision(_))));
}

#[test]
fn answer_outside_gamble_is_an_error() {
    let wild = |g: &Gamble| -> Result<f64> { Ok(g.win.outcome + 1.0) };
    let mut planner = Planner::new(PlannerConfig::new(0.0, 1000.0, 10.0), wild, Vec::<String>::new());
    assert_eq!(
        planner.build().unwrap_err(),
        Error::OutsideGamble { value: 1001.0, lose: 0.0, win: 1000.0 }
    );
}

/* ──────────────────────────────────────────────────────────────────────────
5) Planner driving the convergence loop
────────────────────────────────────────────────────────────────────────── */

/// Accepts every candidate straight away.
struct Agreeable;

impl Assess for Agreeable {
    fn estimate(&self, _x: f64, _g: &Gamble) -> f64 {
        0.0
    }
    fn advise(&self, x: f64, gain: f64, _g: &Gamble, _best: Option<Best>) -> (Verdict, Option<Best>) {
        (Verdict::HighConfidence, Some(Best { x, gain }))
    }
}

#[test]
fn planner_elicits_through_the_convergence_loop() {
    let script = Script::new(["50", "25", "75", "50"], [true; 4]);
    let elicitor = ConvergenceLoop::new(Agreeable, script);
    let mut planner = Planner::new(PlannerConfig::new(0.0, 100.0, 60.0), elicitor, Vec::<String>::new());

    let curve = planner.build().unwrap();
    assert_eq!(
        pairs(&curve),
        vec![(0.0, 0.0), (25.0, 0.25), (50.0, 0.5), (75.0, 0.75), (100.0, 1.0)]
    );

    let (elicitor, report, _) = planner.into_parts();
    assert!(report.is_empty());
    let (_, script) = elicitor.into_parts();
    assert_eq!(script.pending_numbers(), 0);
    assert_eq!(script.pending_answers(), 0);
}
