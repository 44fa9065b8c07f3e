//! Estimator demo: find the certainty equivalent of one 50/50 gamble by
//! proposing sure amounts and following the simulated-play advice.

use std::path::PathBuf;

use clap::Parser;
use fractile::io::{self, logging, Terminal};
use fractile::systems::convergence::ConvergenceLoop;
use fractile::systems::estimator::{Estimator, EstimatorConfig};
use fractile::Gamble;

#[derive(Parser)]
#[command(author, version, about = "Find the certainty equivalent of a 50/50 gamble by simulated play", long_about = None)]
struct Args {
    /// Outcome when the gamble is lost
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    left_margin: f64,
    /// Outcome when the gamble is won
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
    right_margin: f64,
    /// Spacing of the neighbouring candidates scored for advice
    #[arg(long, default_value_t = 1.0)]
    step: f64,
    /// Simulated games per run
    #[arg(long, default_value_t = 1000)]
    trials: usize,
    /// Fixed RNG seed for reproducible advice
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose, args.log_file.as_deref())?;

    let gamble = Gamble::range(args.left_margin, args.right_margin)?;
    let cfg = EstimatorConfig { step: args.step, trials_per_run: args.trials, ..EstimatorConfig::default() };
    let seed = args.seed.unwrap_or_else(io::clock_seed);
    log::info!("estimator seeded with {seed}");

    let mut game = ConvergenceLoop::new(Estimator::seeded(cfg, seed), Terminal);
    let outcome = game.run(&gamble)?;
    println!("Certainty equivalent: {} (after {} rounds)", outcome.value, outcome.rounds);
    Ok(())
}
