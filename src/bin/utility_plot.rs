//! Builds a utility function by the fractile method and plots it.

use std::path::PathBuf;

use clap::Parser;
use fractile::io::{self, logging, SvgChart, Terminal};
use fractile::planner::{Planner, PlannerConfig, Relax};
use fractile::systems::convergence::{ConvergenceLoop, Direct};
use fractile::systems::estimator::{Estimator, EstimatorConfig};
use fractile::systems::sdk::{Chart, ChartRenderer, NumberInput};
use fractile::Sample;

#[derive(Parser)]
#[command(author, version, about = "Elicit and plot a utility function over monetary outcomes", long_about = None)]
struct Args {
    /// Largest possible loss (asked interactively when absent)
    #[arg(long, allow_negative_numbers = true)]
    left_margin: Option<f64>,
    /// Largest possible gain (asked interactively when absent)
    #[arg(long, allow_negative_numbers = true)]
    right_margin: Option<f64>,
    /// Precision of the curve (asked interactively when absent)
    #[arg(long)]
    delta: Option<f64>,
    /// Find each certainty equivalent with simulated-play advice
    #[arg(long)]
    assisted: bool,
    #[arg(long, default_value_t = 1.0)]
    step: f64,
    #[arg(long, default_value_t = 1000)]
    trials: usize,
    /// Widen the consistency tolerance after this many contradictions in a row
    #[arg(long)]
    relax_after: Option<usize>,
    #[arg(long, default_value_t = 2.0)]
    relax_factor: f64,
    #[arg(long, default_value = "utility.svg")]
    output: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn ask(term: &mut Terminal, given: Option<f64>, prompt: &str) -> fractile::Result<f64> {
    match given {
        Some(v) => Ok(v),
        None => term.read_float(prompt),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose, args.log_file.as_deref())?;

    let mut term = Terminal;
    let lose = ask(&mut term, args.left_margin, "Input the sum you can lose: ")?;
    let lose = if lose > 0.0 { -lose } else { lose };
    let win = ask(&mut term, args.right_margin, "Input the sum you can win: ")?;
    let delta = ask(&mut term, args.delta, "Input accuracy: ")?;

    let cfg = PlannerConfig {
        lose_margin: lose,
        win_margin: win,
        delta,
        relax: args.relax_after.map(|after| Relax { after, factor: args.relax_factor }),
    };

    let samples: Vec<Sample> = if args.assisted {
        let est = EstimatorConfig { step: args.step, trials_per_run: args.trials, ..EstimatorConfig::default() };
        let seed = args.seed.unwrap_or_else(io::clock_seed);
        log::info!("estimator seeded with {seed}");
        let elicitor = ConvergenceLoop::new(Estimator::seeded(est, seed), Terminal);
        Planner::new(cfg, elicitor, Terminal).build()?
    } else {
        Planner::new(cfg, Direct::new(Terminal), Terminal).build()?
    };

    for s in &samples {
        println!("{:>14.4}  {:.6}", s.outcome, s.utility);
    }
    let mut chart = SvgChart::new(&args.output);
    chart.render_line_chart(&Chart::utility(&samples))?;
    println!("Utility function written to {}", chart.path().display());
    Ok(())
}
