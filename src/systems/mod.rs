pub mod sdk;
pub mod estimator;
pub mod convergence;
