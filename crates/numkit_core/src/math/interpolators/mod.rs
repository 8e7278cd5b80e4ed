//! Interpolation of scattered samples.
//!
//! ## Available Forms
//!
//! - [`LagrangePolynomial`]: Lagrange-form polynomial of degree `n - 1`
//! - [`NewtonPolynomial`]: Newton divided-difference polynomial of degree `n - 1`
//! - [`CubicSpline`]: Natural cubic spline with C² continuity
//!
//! ## Core Trait
//!
//! Every fitted form implements [`Interpolant`]:
//! - `evaluate(x: T) -> T`: Value of the fitted curve
//! - `domain() -> (T, T)`: Range covered by the samples
//!
//! The [`Interpolator`] solver validates a sample set, fits the selected form
//! and returns it by value inside an [`InterpolationResult`]; the result is
//! independent of the solver that produced it.
//!
//! ## Example
//!
//! ```
//! use numkit_core::math::interpolators::{InterpolationMethod, Interpolator};
//! use numkit_core::traits::MathSolver;
//! use numkit_core::types::Point;
//!
//! let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 4.0)];
//! let result = Interpolator::new(points, InterpolationMethod::Newton).solve(()).unwrap();
//!
//! assert_eq!(result.method, "Newton");
//! assert_eq!(result.degree, Some(2));
//! assert!((result.evaluate(1.5) - 2.25).abs() < 1e-12);
//! ```

mod cubic_spline;
mod lagrange;
mod newton;
mod samples;
mod traits;

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::traits::MathSolver;
use crate::types::{Point, SolverError};

// Re-export public types at module level
pub use cubic_spline::{CubicSpline, SplineCoeffs};
pub use lagrange::LagrangePolynomial;
pub use newton::NewtonPolynomial;
pub use traits::Interpolant;

/// Interpolation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Lagrange-form polynomial.
    #[default]
    Lagrange,
    /// Newton divided-difference polynomial.
    Newton,
    /// Natural cubic spline.
    Spline,
}

impl InterpolationMethod {
    /// Accepted method names.
    pub const NAMES: &'static str = "lagrange|newton|spline";

    /// Method key as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMethod::Lagrange => "lagrange",
            InterpolationMethod::Newton => "newton",
            InterpolationMethod::Spline => "spline",
        }
    }

    /// Name reported in results.
    pub fn display_name(&self) -> &'static str {
        match self {
            InterpolationMethod::Lagrange => "Lagrange",
            InterpolationMethod::Newton => "Newton",
            InterpolationMethod::Spline => "Cubic Spline",
        }
    }

    /// Fewest samples the form accepts.
    pub fn min_points(&self) -> usize {
        match self {
            InterpolationMethod::Spline => 3,
            _ => 2,
        }
    }
}

impl FromStr for InterpolationMethod {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lagrange" => Ok(InterpolationMethod::Lagrange),
            "newton" => Ok(InterpolationMethod::Newton),
            "spline" => Ok(InterpolationMethod::Spline),
            _ => Err(SolverError::InvalidMethod {
                method: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any fitted form, evaluated through [`Interpolant`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum FittedInterpolant<T: Float> {
    /// Lagrange polynomial.
    Lagrange(LagrangePolynomial<T>),
    /// Newton polynomial.
    Newton(NewtonPolynomial<T>),
    /// Natural cubic spline.
    Spline(CubicSpline<T>),
}

impl<T: Float> Interpolant<T> for FittedInterpolant<T> {
    fn evaluate(&self, x: T) -> T {
        match self {
            FittedInterpolant::Lagrange(p) => p.evaluate(x),
            FittedInterpolant::Newton(p) => p.evaluate(x),
            FittedInterpolant::Spline(s) => s.evaluate(x),
        }
    }

    fn domain(&self) -> (T, T) {
        match self {
            FittedInterpolant::Lagrange(p) => p.domain(),
            FittedInterpolant::Newton(p) => p.domain(),
            FittedInterpolant::Spline(s) => s.domain(),
        }
    }
}

/// Fitted curve plus its description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpolationResult<T: Float> {
    /// The fitted curve.
    pub function: FittedInterpolant<T>,
    /// Display name of the form.
    pub method: String,
    /// Polynomial degree, for Lagrange and Newton.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<usize>,
    /// Number of cubic pieces, for splines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<usize>,
}

impl<T: Float> InterpolationResult<T> {
    /// Evaluate the fitted curve at `x`.
    #[inline]
    pub fn evaluate(&self, x: T) -> T {
        self.function.evaluate(x)
    }
}

/// Interpolation solver over a fixed sample set.
///
/// Samples need not be sorted; x-values must be distinct.
#[derive(Debug, Clone)]
pub struct Interpolator<T: Float> {
    points: Vec<Point<T>>,
    method: InterpolationMethod,
}

impl<T: Float> Interpolator<T> {
    /// Create an interpolator over `points`.
    pub fn new(points: Vec<Point<T>>, method: InterpolationMethod) -> Self {
        Self { points, method }
    }

    /// The samples.
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    /// Selected form.
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }
}

impl<T: Float> MathSolver for Interpolator<T> {
    type Input = ();
    type Output = InterpolationResult<T>;

    fn validate_input(&self) -> Result<(), SolverError> {
        samples::validate_samples(&self.points, self.method.min_points())
    }

    fn solve(&self, _input: ()) -> Result<InterpolationResult<T>, SolverError> {
        self.validate_input()?;
        let method = self.method.display_name().to_string();

        let result = match self.method {
            InterpolationMethod::Lagrange => {
                let poly = LagrangePolynomial::fit(&self.points)?;
                InterpolationResult {
                    degree: Some(poly.degree()),
                    segments: None,
                    function: FittedInterpolant::Lagrange(poly),
                    method,
                }
            }
            InterpolationMethod::Newton => {
                let poly = NewtonPolynomial::fit(&self.points)?;
                InterpolationResult {
                    degree: Some(poly.degree()),
                    segments: None,
                    function: FittedInterpolant::Newton(poly),
                    method,
                }
            }
            InterpolationMethod::Spline => {
                let spline = CubicSpline::fit(&self.points)?;
                InterpolationResult {
                    degree: None,
                    segments: Some(spline.segments()),
                    function: FittedInterpolant::Spline(spline),
                    method,
                }
            }
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parabola() -> Vec<Point<f64>> {
        vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 4.0)]
    }

    fn solve(points: Vec<Point<f64>>, method: InterpolationMethod) -> InterpolationResult<f64> {
        Interpolator::new(points, method).solve(()).unwrap()
    }

    // ========================================
    // Validation Tests
    // ========================================

    #[test]
    fn test_validate_input_valid() {
        let interp = Interpolator::new(parabola(), InterpolationMethod::Lagrange);
        assert!(interp.validate_input().is_ok());
    }

    #[test]
    fn test_validate_insufficient_points() {
        let interp = Interpolator::new(vec![Point::new(0.0, 0.0)], InterpolationMethod::Newton);
        let err = interp.validate_input().unwrap_err();
        assert_eq!(err, SolverError::InsufficientPoints { got: 1, need: 2 });
        assert!(err.to_string().starts_with("Insufficient points"));
    }

    #[test]
    fn test_spline_needs_three_points() {
        let interp = Interpolator::new(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            InterpolationMethod::Spline,
        );
        assert_eq!(
            interp.validate_input(),
            Err(SolverError::InsufficientPoints { got: 2, need: 3 })
        );
    }

    #[test]
    fn test_validate_duplicate_x() {
        let interp = Interpolator::new(
            vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(2.0, 4.0)],
            InterpolationMethod::Lagrange,
        );
        let err = interp.solve(()).unwrap_err();
        assert!(err.to_string().starts_with("X values must be unique"));
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("spline".parse::<InterpolationMethod>().unwrap(), InterpolationMethod::Spline);
        assert!(matches!(
            "hermite".parse::<InterpolationMethod>(),
            Err(SolverError::InvalidMethod { .. })
        ));
    }

    // ========================================
    // Solve Tests
    // ========================================

    #[test]
    fn test_lagrange_result() {
        let result = solve(parabola(), InterpolationMethod::Lagrange);
        assert_eq!(result.method, "Lagrange");
        assert_eq!(result.degree, Some(2));
        assert_eq!(result.segments, None);
        assert_relative_eq!(result.evaluate(1.5), 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_spline_result() {
        let result = solve(parabola(), InterpolationMethod::Spline);
        assert_eq!(result.method, "Cubic Spline");
        assert_eq!(result.segments, Some(2));
        assert_eq!(result.degree, None);
        assert_relative_eq!(result.evaluate(1.5), 2.3125, epsilon = 1e-12);
    }

    #[test]
    fn test_lagrange_and_newton_agree() {
        let points = vec![
            Point::new(-2.0, 3.0),
            Point::new(0.5, -1.0),
            Point::new(1.0, 0.25),
            Point::new(3.0, 2.0),
            Point::new(4.5, -0.5),
        ];
        let lagrange = solve(points.clone(), InterpolationMethod::Lagrange);
        let newton = solve(points, InterpolationMethod::Newton);
        for i in 0..=40 {
            let x = -2.0 + 0.1625 * i as f64;
            assert_relative_eq!(lagrange.evaluate(x), newton.evaluate(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_result_outlives_solver() {
        let result = {
            let interp = Interpolator::new(parabola(), InterpolationMethod::Newton);
            interp.solve(()).unwrap()
        };
        assert_relative_eq!(result.evaluate(2.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_result_serialization() {
        let result = solve(parabola(), InterpolationMethod::Spline);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["method"], "Cubic Spline");
        assert_eq!(json["segments"], 2);
        assert_eq!(json["function"]["form"], "spline");
        assert!(json.get("degree").is_none());
    }
}
