//! Error type shared by the estimator, the convergence loop and the planner.

use thiserror::Error;

/// Everything that can stop an elicitation run.
///
/// Malformed or out-of-range numbers and inconsistent answers are *not* errors:
/// collaborators reprompt and the planner re-elicits. Only the variants below
/// escape to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid interval [{lose}, {win}]: bounds must be finite and ordered")]
    InvalidInterval { lose: f64, win: f64 },

    #[error("invalid precision {0}: must be positive and finite")]
    InvalidPrecision(f64),

    #[error("elicited value {value} lies outside the gamble [{lose}, {win}]")]
    OutsideGamble { value: f64, lose: f64, win: f64 },

    #[error("input exhausted while waiting for: {0}")]
    InputExhausted(String),

    #[error("chart rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
