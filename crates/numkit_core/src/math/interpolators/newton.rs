//! Newton divided-difference interpolation.

use num_traits::Float;
use serde::Serialize;

use super::samples::{validate_samples, x_range};
use super::Interpolant;
use crate::types::{Point, SolverError};

/// Interpolating polynomial in Newton form.
///
/// The divided-difference table is built in full,
///
/// ```text
/// D[i][0] = yᵢ
/// D[i][j] = (D[i+1][j-1] - D[i][j-1]) / (x_{i+j} - xᵢ)
/// ```
///
/// and only its first row is kept as coefficients:
///
/// ```text
/// P(x) = D[0][0] + Σᵢ D[0][i] · Πₖ<ᵢ (x - xₖ)
/// ```
///
/// Mathematically identical to [`LagrangePolynomial`](super::LagrangePolynomial)
/// on the same samples; evaluation is O(n).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewtonPolynomial<T: Float> {
    xs: Vec<T>,
    coefficients: Vec<T>,
}

impl<T: Float> NewtonPolynomial<T> {
    /// Fit through at least two points with distinct x-values.
    pub fn fit(points: &[Point<T>]) -> Result<Self, SolverError> {
        validate_samples(points, 2)?;
        let n = points.len();
        let xs: Vec<T> = points.iter().map(|p| p.x).collect();

        let mut table = vec![vec![T::zero(); n]; n];
        for (row, p) in table.iter_mut().zip(points) {
            row[0] = p.y;
        }
        for j in 1..n {
            for i in 0..n - j {
                table[i][j] = (table[i + 1][j - 1] - table[i][j - 1]) / (xs[i + j] - xs[i]);
            }
        }

        let coefficients = table.swap_remove(0);
        Ok(Self { xs, coefficients })
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.xs.len() - 1
    }

    /// Divided differences `D[0][0..n]`.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }
}

impl<T: Float> Interpolant<T> for NewtonPolynomial<T> {
    fn evaluate(&self, x: T) -> T {
        let mut result = self.coefficients[0];
        let mut product = T::one();
        for i in 1..self.coefficients.len() {
            product = product * (x - self.xs[i - 1]);
            result = result + self.coefficients[i] * product;
        }
        result
    }

    fn domain(&self) -> (T, T) {
        x_range(&self.xs)
    }
}
