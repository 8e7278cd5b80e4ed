//! Hit-or-miss Monte Carlo quadrature.
//!
//! Points are drawn uniformly in the box `[a, b] × [0, M]`, where `M` is the
//! largest value of `f` at 21 evenly spaced points. The estimate is the hit
//! fraction times the box area. `M` is a heuristic, not a proven bound: a
//! narrow peak between those points is clipped and biases the estimate low.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of points used to estimate the bounding height.
pub const BOUND_SAMPLES: usize = 21;

/// Initial sample count.
pub const INITIAL_SAMPLES: usize = 3;

/// Seeded sampler for hit-or-miss estimates.
pub(crate) struct HitOrMissSampler {
    inner: StdRng,
}

impl HitOrMissSampler {
    /// Sampler seeded for reproducible estimates, or from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { inner }
    }

    /// Estimate `∫ₐᵇ f` with `samples` draws under the height `bound`.
    pub fn estimate<F>(&mut self, f: F, a: f64, b: f64, bound: f64, samples: usize) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let width = b - a;
        let hits = (0..samples)
            .filter(|_| {
                let x = a + width * self.inner.gen::<f64>();
                let y = bound * self.inner.gen::<f64>();
                y <= f(x)
            })
            .count();
        hits as f64 / samples as f64 * width * bound
    }
}

/// Largest value of `f` over [`BOUND_SAMPLES`] evenly spaced points of `[a, b]`.
///
/// NaN values are ignored.
pub(crate) fn height_bound<F>(f: F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let last = (BOUND_SAMPLES - 1) as f64;
    (0..BOUND_SAMPLES)
        .map(|i| a + (b - a) * i as f64 / last)
        .map(f)
        .fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_bound_finds_endpoint_max() {
        assert_eq!(height_bound(|x| x, 0.0, 2.0), 2.0);
    }

    #[test]
    fn test_height_bound_ignores_nan() {
        let bound = height_bound(|x| if x == 0.0 { f64::NAN } else { x }, 0.0, 1.0);
        assert_eq!(bound, 1.0);
    }

    #[test]
    fn test_constant_function_is_exact() {
        let mut sampler = HitOrMissSampler::new(Some(7));
        assert_eq!(sampler.estimate(|_| 2.0, 0.0, 3.0, 2.0, 50), 6.0);
    }

    #[test]
    fn test_seeded_estimates_repeat() {
        let f = |x: f64| x * x;
        let first = HitOrMissSampler::new(Some(42)).estimate(f, 0.0, 1.0, 1.0, 1000);
        let second = HitOrMissSampler::new(Some(42)).estimate(f, 0.0, 1.0, 1.0, 1000);
        assert_eq!(first, second);
    }

    #[test]
    fn test_estimate_is_roughly_right() {
        // ∫₀¹ x² dx = 1/3
        let estimate = HitOrMissSampler::new(Some(1)).estimate(|x| x * x, 0.0, 1.0, 1.0, 100_000);
        assert!((estimate - 1.0 / 3.0).abs() < 0.02);
    }
}
