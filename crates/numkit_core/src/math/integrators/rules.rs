//! Composite Newton-Cotes rules and the doubling refinement loop.

use tracing::{trace, warn};

use super::QuadratureConfig;

/// Outcome of a refinement run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Refinement {
    pub value: f64,
    pub segments: usize,
    pub iterations: usize,
    pub converged: bool,
}

/// Evaluate `rule(n)` for `n = seed, 2·seed, 4·seed, …` until two successive
/// estimates differ by less than `precision`.
///
/// `iterations` counts refinements that did not converge, so it reaches
/// `max_iterations` exactly when the cap stops the loop. `segments` is the
/// count used for the returned estimate.
pub(crate) fn refine<R>(seed: usize, config: &QuadratureConfig, mut rule: R) -> Refinement
where
    R: FnMut(usize) -> f64,
{
    let precision = config.convergence.precision;
    let max_iterations = config.convergence.max_iterations;

    let mut n = seed;
    let mut previous = f64::NAN;
    let mut value = f64::NAN;
    let mut segments = n;
    let mut iterations = 0;

    while iterations < max_iterations {
        value = rule(n);
        segments = n;
        trace!(segments, value, "quadrature refinement");

        if iterations > 0 && (value - previous).abs() < precision {
            return Refinement {
                value,
                segments,
                iterations,
                converged: true,
            };
        }

        previous = value;
        iterations += 1;

        match n.checked_mul(2).filter(|next| *next <= config.max_subdivisions) {
            Some(next) => n = next,
            None => {
                if iterations < max_iterations {
                    warn!(
                        segments,
                        max_subdivisions = config.max_subdivisions,
                        "quadrature stopped at the subdivision cap before converging"
                    );
                }
                break;
            }
        }
    }

    Refinement {
        value,
        segments,
        iterations,
        converged: false,
    }
}

/// Composite trapezoid rule with `n` equal segments.
pub(crate) fn trapezoid<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = (b - a) / n as f64;
    let interior: f64 = (1..n).map(|i| f(a + i as f64 * h)).sum();
    (0.5 * (f(a) + f(b)) + interior) * h
}

/// Composite Simpson rule with `n` (even) equal segments.
///
/// Interior points alternate weights 4 (odd index) and 2 (even index).
pub(crate) fn simpson<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = (b - a) / n as f64;
    let interior: f64 = (1..n)
        .map(|i| {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            weight * f(a + i as f64 * h)
        })
        .sum();
    (f(a) + f(b) + interior) * h / 3.0
}
