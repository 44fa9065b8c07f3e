// tests/convergence.rs
use fractile::mechanics::advice::{Best, Probe, Stats, Verdict, judge};
use fractile::systems::convergence::{ConvergenceLoop, Direct};
use fractile::systems::estimator::{Assess, Estimator, EstimatorConfig};
use fractile::systems::sdk::{self, Elicitor, Script};
use fractile::{Error, Gamble};

/// Deterministic assessor: gain falls off linearly from `at`; neighbours are
/// the two candidates one unit away.
struct Peak {
    at: f64,
}

impl Assess for Peak {
    fn estimate(&self, x: f64, _g: &Gamble) -> f64 {
        -(x - self.at).abs()
    }

    fn advise(&self, x: f64, gain: f64, g: &Gamble, best: Option<Best>) -> (Verdict, Option<Best>) {
        let score = |y: f64| {
            g.contains(y).then(|| {
                let s = self.estimate(y, g);
                Stats { max: s, avg: s }
            })
        };
        let probe = Probe { left: score(x - 1.0), right: score(x + 1.0) };
        let v = judge(gain, &probe, best.map(|b| b.gain), 0.5);
        (v, if v.accepts() { Some(Best { x, gain }) } else { best })
    }
}

/* ──────────────────────────────────────────────────────────────────────────
1) Full session — reprompts, advice, declining, accepting
────────────────────────────────────────────────────────────────────────── */

#[test]
fn session_returns_accepted_best() {
    let g = Gamble::range(0.0, 100.0).unwrap();
    let script = Script::new(["abc", "10", "40", "500", "45"], [false, true]);
    let mut game = ConvergenceLoop::new(Peak { at: 40.0 }, script);

    let out = game.run(&g).unwrap();
    assert_eq!(out.value, 40.0);
    assert_eq!(out.rounds, 3);
    let verdicts: Vec<Verdict> = out.history.iter().map(|r| r.verdict).collect();
    assert_eq!(verdicts, vec![Verdict::Increase, Verdict::HighConfidence, Verdict::Decrease]);

    let script = game.console();
    assert_eq!(script.pending_numbers(), 0);
    assert_eq!(script.pending_answers(), 0);
    assert!(script.said.iter().any(|l| l == sdk::NOT_A_NUMBER));
    assert!(script.said.iter().any(|l| l == "Incorrect value - it must be between 0 and 100"));
    assert!(script.said.contains(&Verdict::Increase.to_string()));
    assert!(script.prompts.iter().any(|p| p == "Use best x so far (40) (y/N)? "));
}

#[test]
fn no_offer_before_a_best_exists() {
    let g = Gamble::range(0.0, 100.0).unwrap();
    // 10 and 20 are never accepted, so the single `true` answers the offer after 40.
    let script = Script::new(["10", "20", "40"], [true]);
    let mut game = ConvergenceLoop::new(Peak { at: 40.0 }, script);

    let out = game.run(&g).unwrap();
    assert_eq!(out.value, 40.0);
    assert_eq!(out.rounds, 3);
}

/* ──────────────────────────────────────────────────────────────────────────
2) Failure and isolation
────────────────────────────────────────────────────────────────────────── */

#[test]
fn running_out_of_answers_is_fatal() {
    let g = Gamble::range(0.0, 100.0).unwrap();
    let mut game = ConvergenceLoop::new(Peak { at: 40.0 }, Script::new(["10"], []));
    let err = game.run(&g).unwrap_err();
    assert!(matches!(err, Error::InputExhausted(_)), "{err}");
}

#[test]
fn best_does_not_leak_between_elicitations() {
    let g = Gamble::range(0.0, 100.0).unwrap();
    let script = Script::new(["40", "10", "40"], [true, true]);
    let mut game = ConvergenceLoop::new(Peak { at: 40.0 }, script);

    let first = game.run(&g).unwrap();
    assert_eq!((first.value, first.rounds), (40.0, 1));

    // A leaked best would be offered right after "10" and end the run early.
    let second = game.run(&g).unwrap();
    assert_eq!((second.value, second.rounds), (40.0, 2));
}

/* ──────────────────────────────────────────────────────────────────────────
3) Elicitors
────────────────────────────────────────────────────────────────────────── */

#[test]
fn loop_with_real_estimator_on_a_sure_thing() {
    let g = Gamble::range(100.0, 100.0).unwrap();
    let est = Estimator::seeded(EstimatorConfig::default(), 1);
    let mut game = ConvergenceLoop::new(est, Script::new(["100"], [true]));
    assert_eq!(game.certainty_equivalent(&g).unwrap(), 100.0);
}

#[test]
fn direct_elicitor_asks_for_a_value_in_range() {
    let g = Gamble::range(0.0, 100.0).unwrap();
    let mut direct = Direct::new(Script::new(["x", "-5", "30"], []));
    assert_eq!(direct.certainty_equivalent(&g).unwrap(), 30.0);

    let script = direct.into_inner();
    assert_eq!(script.said, vec![sdk::NOT_A_NUMBER.to_owned(), sdk::out_of_range(0.0, 100.0)]);
    assert!(script.prompts[0].starts_with("Input value which utility is equivalent to utility of game (0, 100)"));
}
