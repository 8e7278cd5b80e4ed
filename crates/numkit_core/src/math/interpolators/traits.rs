//! Common interface for fitted interpolants.

use num_traits::Float;

/// A fitted curve that can be evaluated anywhere on the real line.
///
/// Implementations own their coefficients by value; evaluation never fails.
/// Outside [`domain`](Self::domain) polynomials extrapolate naturally and
/// splines continue their boundary cubic piece.
///
/// # Example
///
/// ```
/// use numkit_core::math::interpolators::{Interpolant, LagrangePolynomial};
/// use numkit_core::types::Point;
///
/// let points = [Point::new(0.0, 1.0), Point::new(1.0, 3.0)];
/// let line = LagrangePolynomial::fit(&points).unwrap();
///
/// assert_eq!(line.domain(), (0.0, 1.0));
/// assert!((line.evaluate(0.5) - 2.0).abs() < 1e-12);
/// ```
pub trait Interpolant<T: Float> {
    /// Value of the curve at `x`.
    fn evaluate(&self, x: T) -> T;

    /// Smallest and largest sample abscissa.
    fn domain(&self) -> (T, T);
}
