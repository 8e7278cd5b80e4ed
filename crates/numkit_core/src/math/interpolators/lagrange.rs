//! Lagrange-form interpolating polynomial.

use num_traits::Float;
use serde::Serialize;

use super::samples::{validate_samples, x_range};
use super::Interpolant;
use crate::types::{Point, SolverError};

/// Polynomial of degree `n - 1` through `n` samples, in Lagrange form:
///
/// ```text
/// P(x) = Σᵢ yᵢ · Πⱼ≠ᵢ (x - xⱼ) / (xᵢ - xⱼ)
/// ```
///
/// Evaluation costs O(n²).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagrangePolynomial<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LagrangePolynomial<T> {
    /// Fit through at least two points with distinct x-values.
    pub fn fit(points: &[Point<T>]) -> Result<Self, SolverError> {
        validate_samples(points, 2)?;
        Ok(Self {
            xs: points.iter().map(|p| p.x).collect(),
            ys: points.iter().map(|p| p.y).collect(),
        })
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.xs.len() - 1
    }
}

impl<T: Float> Interpolant<T> for LagrangePolynomial<T> {
    fn evaluate(&self, x: T) -> T {
        self.xs
            .iter()
            .zip(&self.ys)
            .enumerate()
            .fold(T::zero(), |sum, (i, (&xi, &yi))| {
                let basis = self
                    .xs
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold(T::one(), |acc, (_, &xj)| acc * (x - xj) / (xi - xj));
                sum + yi * basis
            })
    }

    fn domain(&self) -> (T, T) {
        x_range(&self.xs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parabola() -> Vec<Point<f64>> {
        vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 4.0)]
    }

    #[test]
    fn test_lagrange_interpolation() {
        let poly = LagrangePolynomial::fit(&parabola()).unwrap();
        assert_eq!(poly.degree(), 2);
        assert_relative_eq!(poly.evaluate(1.5), 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_passes_through_samples() {
        let points = parabola();
        let poly = LagrangePolynomial::fit(&points).unwrap();
        for p in &points {
            assert_relative_eq!(poly.evaluate(p.x), p.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_extrapolates() {
        let poly = LagrangePolynomial::fit(&parabola()).unwrap();
        assert_relative_eq!(poly.evaluate(-1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(poly.evaluate(3.0), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unsorted_input() {
        let points = vec![Point::new(2.0, 4.0), Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let poly = LagrangePolynomial::fit(&points).unwrap();
        assert_eq!(poly.domain(), (0.0, 2.0));
        assert_relative_eq!(poly.evaluate(0.5), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_single_point() {
        assert!(matches!(
            LagrangePolynomial::fit(&[Point::new(1.0, 1.0)]),
            Err(SolverError::InsufficientPoints { got: 1, need: 2 })
        ));
    }
}
