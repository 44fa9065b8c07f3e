/*!
`fractile` — utility-function elicitation by the fractile method, with a
Monte-Carlo certainty-equivalent estimator guiding the human.

What it does
- Builds a monotone set of (outcome, utility) samples on `[lose_margin, win_margin]`
  by repeatedly asking for the certainty equivalent (CE) of 50/50 gambles and
  bisecting intervals until they are narrower than a precision `delta`
  (`planner`).
- Helps the human find each CE: a candidate sure amount `x` is scored by
  simulated play, its neighbours are scored the same way, and an ordered policy
  turns the comparison into advice ("increase x", "this x may be the best one")
  (`systems::estimator`, `systems::convergence`).
- Drives the human-in-the-loop cycle with the closed-loop step
  `θ_{t+1} = update(θ_t, measure(θ_t, simulate(θ_t)))` from [`refine`].

How to use (call surface only)
- Pick an [`systems::sdk::Elicitor`]: a [`systems::convergence::ConvergenceLoop`]
  over an estimator and a console, a [`systems::convergence::Direct`] prompt, or
  any closure `FnMut(&Gamble) -> Result<f64>`.
- Call `Planner::new(PlannerConfig { .. }, elicitor, report).build()`.
- Hand the samples to a [`systems::sdk::ChartRenderer`] via `Chart::utility`.

What it does NOT do
- No terminal or plotting in the core. Those live in `io` behind feature `cli`.
- No persistence, no concurrency.
*/

pub mod error;
pub mod mechanics;
pub mod planner;
pub mod systems;

#[cfg(feature = "cli")]
pub mod io;

pub use error::{Error, Result};
pub use mechanics::samples::{Gamble, Sample};

/// Fallible refinement: θ_{t+1} = update(θ_t, measure(θ_t, simulate(θ_t))).
///
/// Runs until `done(θ_t, θ_{t+1})` holds and returns θ_{t+1}; the first failing
/// step aborts the loop. There is no iteration cap: termination is the
/// caller's business (a human accepting, or input running out).
pub fn refine<Theta, D, M, E, Sim, Meas, Upd, Done>(
    mut theta: Theta,
    mut simulate: Sim,
    mut measure: Meas,
    mut update: Upd,
    done: Done,
) -> std::result::Result<Theta, E>
where
    Sim: FnMut(&Theta) -> std::result::Result<D, E>,
    Meas: FnMut(&Theta, &D) -> M,
    Upd: FnMut(&Theta, &D, &M) -> std::result::Result<Theta, E>,
    Done: Fn(&Theta, &Theta) -> bool,
{
    loop {
        let data = simulate(&theta)?;
        let pi = measure(&theta, &data);
        let theta_next = update(&theta, &data, &pi)?;
        if done(&theta, &theta_next) {
            return Ok(theta_next);
        }
        theta = theta_next;
    }
}
