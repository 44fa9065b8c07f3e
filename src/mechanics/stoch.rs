/// Stochastic mechanics: uniform draws over an injectable RNG.
/// Note: helpers take `&RefCell<R>` so callers can keep closures `Fn`
/// (and methods `&self`) while mutating RNG state.
use rand_core::RngCore;
use std::cell::RefCell;

/// Uniform(0,1) from the top 53 bits of one `next_u64`.
#[inline]
pub fn unit<R: RngCore>(rng: &RefCell<R>) -> f64 {
    let bits = rng.borrow_mut().next_u64() >> 11;
    (bits as f64) / ((1u64 << 53) as f64)
}

/// Uniform(lo, hi).
#[inline]
pub fn uniform<R: RngCore>(rng: &RefCell<R>, lo: f64, hi: f64) -> f64 {
    lo + unit(rng) * (hi - lo)
}

/// Bernoulli(p).
#[inline]
pub fn bernoulli<R: RngCore>(rng: &RefCell<R>, p: f64) -> bool {
    unit(rng) < p.clamp(0.0, 1.0)
}

/// Fair two-point draw: `win` or `lose` with probability 1/2 each.
#[inline]
pub fn coin<R: RngCore>(rng: &RefCell<R>, lose: f64, win: f64) -> f64 {
    if bernoulli(rng, 0.5) { win } else { lose }
}
