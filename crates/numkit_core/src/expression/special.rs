//! Special functions missing from `f64`.
//!
//! Domain errors yield NaN and overflow yields infinity, matching the rest of
//! the evaluator.

use std::f64::consts::PI;

/// Complementary error function, Abramowitz and Stegun 7.1.26.
///
/// Absolute error below 1.5e-7 for all x.
pub(crate) fn erfc(x: f64) -> f64 {
    const A: [f64; 5] = [0.254829592, -0.284496736, 1.421413741, -1.453152027, 1.061405429];
    const P: f64 = 0.3275911;

    let abs_x = x.abs();
    let t = 1.0 / (1.0 + P * abs_x);
    let poly = A[0] + t * (A[1] + t * (A[2] + t * (A[3] + t * A[4])));
    let tail = t * poly * (-abs_x * abs_x).exp();

    if x < 0.0 {
        2.0 - tail
    } else {
        tail
    }
}

/// Error function, odd by construction.
pub(crate) fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    (1.0 - erfc(x.abs())).copysign(x)
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Largest argument whose gamma is finite.
const GAMMA_OVERFLOW: f64 = 171.624_376_956_302_7;

/// `(t, series)` such that `Γ(x + 1) = √(2π) · t^(x + ½) · e^(−t) · series`.
fn lanczos(x: f64) -> (f64, f64) {
    let series = LANCZOS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS[0], |acc, (i, c)| acc + c / (x + (i + 1) as f64));
    (x + LANCZOS_G + 0.5, series)
}

fn is_pole(x: f64) -> bool {
    x <= 0.0 && x == x.floor()
}

/// Gamma function (Lanczos, g = 7) with reflection below ½.
///
/// NaN at the poles (zero and negative integers).
pub(crate) fn gamma(x: f64) -> f64 {
    if x.is_nan() || is_pole(x) {
        return f64::NAN;
    }
    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    if x > GAMMA_OVERFLOW {
        return f64::INFINITY;
    }
    let (t, series) = lanczos(x - 1.0);
    // split the power so t^(x-½) does not overflow before e^(-t) scales it down
    let half = t.powf(0.5 * (x - 0.5));
    (2.0 * PI).sqrt() * half * ((-t).exp() * half) * series
}

/// Natural logarithm of `|Γ(x)|`; infinite at the poles.
pub(crate) fn lgamma(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if is_pole(x) || x.is_infinite() {
        return f64::INFINITY;
    }
    if x < 0.5 {
        return (PI / (PI * x).sin().abs()).ln() - lgamma(1.0 - x);
    }
    let (t, series) = lanczos(x - 1.0);
    0.5 * (2.0 * PI).ln() + (x - 0.5) * t.ln() - t + series.ln()
}

/// `n!` for non-negative integral `n`; NaN otherwise.
pub(crate) fn factorial(n: f64) -> f64 {
    if !(n >= 0.0 && n == n.floor()) {
        return f64::NAN;
    }
    if n > 170.0 {
        return f64::INFINITY;
    }
    // n <= 170, so the cast is exact
    (2..=n as u32).fold(1.0, |acc, k| acc * f64::from(k))
}
