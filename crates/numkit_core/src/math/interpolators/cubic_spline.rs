//! Natural cubic spline interpolation.

use std::cmp::Ordering;

use num_traits::Float;
use serde::Serialize;
use tracing::trace;

use super::samples::validate_samples;
use super::Interpolant;
use crate::math::constant;
use crate::types::{Point, SolverError};

/// Polynomial coefficients for a cubic spline segment.
///
/// Represents a cubic polynomial: `y = a + b*(x-xi) + c*(x-xi)² + d*(x-xi)³`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplineCoeffs<T> {
    /// Constant term (y value at segment start)
    pub a: T,
    /// Linear coefficient
    pub b: T,
    /// Quadratic coefficient
    pub c: T,
    /// Cubic coefficient
    pub d: T,
}

/// Natural cubic spline with C² continuity.
///
/// Stores sorted sample abscissae and one set of cubic coefficients per
/// segment, with zero second derivative at both ends.
///
/// # Construction
///
/// Samples are sorted by x before fitting, so input order does not matter.
/// At least 3 samples with distinct x-values are required.
///
/// # Evaluation
///
/// The segment is the first `i` with `x <= xs[i+1]`. Points left of the data
/// use the first segment and points right of it the last, so the boundary
/// cubics extrapolate instead of failing.
///
/// # Example
///
/// ```
/// use numkit_core::math::interpolators::{CubicSpline, Interpolant};
/// use numkit_core::types::Point;
///
/// let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 4.0)];
/// let spline = CubicSpline::fit(&points).unwrap();
///
/// assert!((spline.evaluate(1.5) - 2.3125).abs() < 1e-12);
/// assert_eq!(spline.segments(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CubicSpline<T: Float> {
    /// Sorted x-coordinates
    xs: Vec<T>,
    /// Polynomial coefficients for each segment
    coeffs: Vec<SplineCoeffs<T>>,
}

impl<T: Float> CubicSpline<T> {
    /// Fit a natural cubic spline.
    ///
    /// # Errors
    ///
    /// * `SolverError::InsufficientPoints` - Fewer than 3 samples
    /// * `SolverError::DuplicateAbscissa` - Two samples share an x-value
    pub fn fit(points: &[Point<T>]) -> Result<Self, SolverError> {
        validate_samples(points, 3)?;

        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        let (xs, ys): (Vec<T>, Vec<T>) = sorted.into_iter().map(|p| (p.x, p.y)).unzip();

        let coeffs = Self::compute_coefficients(&xs, &ys);
        trace!(segments = coeffs.len(), "natural cubic spline fitted");

        Ok(Self { xs, coeffs })
    }

    /// Solve the tridiagonal system for the quadratic coefficients `c`
    /// (Thomas algorithm, `c₀ = cₙ₋₁ = 0`), then derive `b` and `d`.
    fn compute_coefficients(xs: &[T], ys: &[T]) -> Vec<SplineCoeffs<T>> {
        let n = xs.len();
        let two = constant::<T>(2.0);
        let three = constant::<T>(3.0);

        // Intervals h[i] = x[i+1] - x[i]
        let h: Vec<T> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        let mut alpha = vec![T::zero(); n];
        for i in 1..n - 1 {
            alpha[i] = three / h[i] * (ys[i + 1] - ys[i]) - three / h[i - 1] * (ys[i] - ys[i - 1]);
        }

        // Forward elimination
        let mut l = vec![T::one(); n];
        let mut mu = vec![T::zero(); n];
        let mut z = vec![T::zero(); n];
        for i in 1..n - 1 {
            l[i] = two * (xs[i + 1] - xs[i - 1]) - h[i - 1] * mu[i - 1];
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }

        // Back substitution
        let mut c = vec![T::zero(); n];
        for i in (0..n - 1).rev() {
            c[i] = z[i] - mu[i] * c[i + 1];
        }

        (0..n - 1)
            .map(|i| SplineCoeffs {
                a: ys[i],
                b: (ys[i + 1] - ys[i]) / h[i] - h[i] * (c[i + 1] + two * c[i]) / three,
                c: c[i],
                d: (c[i + 1] - c[i]) / (three * h[i]),
            })
            .collect()
    }

    /// Segment index for `x`, clamped to `[0, n-2]`.
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi < x);
        pos.saturating_sub(1).min(self.coeffs.len() - 1)
    }

    /// Sorted sample abscissae.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Per-segment coefficients, left to right.
    #[inline]
    pub fn coefficients(&self) -> &[SplineCoeffs<T>] {
        &self.coeffs
    }

    /// Number of cubic pieces (`n - 1`).
    #[inline]
    pub fn segments(&self) -> usize {
        self.coeffs.len()
    }
}

impl<T: Float> Interpolant<T> for CubicSpline<T> {
    /// ```text
    /// y = a + b*dx + c*dx² + d*dx³,  dx = x - xs[i]
    /// ```
    fn evaluate(&self, x: T) -> T {
        let i = self.find_segment(x);
        let SplineCoeffs { a, b, c, d } = self.coeffs[i];
        let dx = x - self.xs[i];
        a + dx * (b + dx * (c + dx * d))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
