pub mod advice;
pub mod samples;
pub mod stoch;

pub use advice::*;
pub use samples::*;
pub use stoch::*;
