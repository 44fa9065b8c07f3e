// Terminal-facing collaborators for the binaries (feature `cli`).

pub mod chart;
pub mod logging;
pub mod terminal;

pub use chart::SvgChart;
pub use terminal::Terminal;

/// Seed for runs that did not ask for a reproducible one.
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
