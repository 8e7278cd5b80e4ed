//! Gaussian elimination with partial pivoting.

use num_traits::Float;
use serde::Serialize;
use tracing::debug;

use crate::math::constant;
use crate::traits::MathSolver;
use crate::types::SolverError;

/// Pivots below this magnitude mark the system as singular.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-10;

const SOLVED_MESSAGE: &str = "Solution found";
const SINGULAR_MESSAGE: &str = "Matrix is singular or nearly singular";

/// Result of a linear solve.
///
/// Singularity is reported in-band: `solution` is `None` and `is_singular`
/// is set; there is no least-squares fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearSystemResult<T> {
    /// Solution vector, absent for singular systems.
    pub solution: Option<Vec<T>>,
    /// Whether a pivot fell below the tolerance.
    pub is_singular: bool,
    /// Human-readable outcome.
    pub message: String,
}

/// Solver for square systems `A·x = b`.
///
/// The caller's matrix and vector are never modified: elimination runs on
/// private copies made inside each `solve` call.
///
/// # Algorithm
///
/// For each pivot column, the row at or below the pivot with the largest
/// absolute entry is swapped into place (ties keep the first such row). A
/// pivot smaller than the tolerance stops the solve as singular; otherwise
/// rows below are eliminated and the triangular system is back-substituted
/// from the last row upward.
///
/// # Example
///
/// ```
/// use numkit_core::math::solvers::LinearSystemSolver;
/// use numkit_core::traits::MathSolver;
///
/// let solver = LinearSystemSolver::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]], vec![1.0, 2.0]);
/// let result = solver.solve(()).unwrap();
///
/// let x = result.solution.unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearSystemSolver<T: Float> {
    matrix: Vec<Vec<T>>,
    vector: Vec<T>,
    pivot_tolerance: T,
}

impl<T: Float> LinearSystemSolver<T> {
    /// Create a solver for `matrix · x = vector`.
    pub fn new(matrix: Vec<Vec<T>>, vector: Vec<T>) -> Self {
        Self {
            matrix,
            vector,
            pivot_tolerance: constant(DEFAULT_PIVOT_TOLERANCE),
        }
    }

    /// Override the singularity threshold on pivot magnitude.
    pub fn with_pivot_tolerance(mut self, tolerance: T) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// The coefficient matrix.
    pub fn matrix(&self) -> &[Vec<T>] {
        &self.matrix
    }

    /// The right-hand side.
    pub fn vector(&self) -> &[T] {
        &self.vector
    }

    fn singular(column: usize) -> LinearSystemResult<T> {
        debug!(column, "pivot below tolerance, system is singular");
        LinearSystemResult {
            solution: None,
            is_singular: true,
            message: SINGULAR_MESSAGE.to_string(),
        }
    }
}

impl<T: Float> MathSolver for LinearSystemSolver<T> {
    type Input = ();
    type Output = LinearSystemResult<T>;

    fn validate_input(&self) -> Result<(), SolverError> {
        let n = self.matrix.len();
        if n == 0 {
            return Err(SolverError::InvalidDimension(
                "Matrix cannot be empty".to_string(),
            ));
        }
        if let Some((i, row)) = self.matrix.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(SolverError::InvalidDimension(format!(
                "Matrix must be square: row {} has {} entries, expected {}",
                i,
                row.len(),
                n
            )));
        }
        if self.vector.len() != n {
            return Err(SolverError::InvalidDimension(format!(
                "Vector dimension {} must match matrix size {}",
                self.vector.len(),
                n
            )));
        }
        Ok(())
    }

    fn solve(&self, _input: ()) -> Result<LinearSystemResult<T>, SolverError> {
        self.validate_input()?;

        let n = self.matrix.len();
        let mut a = self.matrix.clone();
        let mut b = self.vector.clone();

        // Forward elimination
        for col in 0..n {
            let max_row = pivot_row(&a, col);
            if max_row != col {
                a.swap(col, max_row);
                b.swap(col, max_row);
            }

            let pivot = a[col][col];
            if pivot.is_nan() || pivot.abs() < self.pivot_tolerance {
                return Ok(Self::singular(col));
            }

            for row in col + 1..n {
                let (upper, lower) = a.split_at_mut(row);
                let pivot_row = &upper[col];
                let target = &mut lower[0];

                let factor = target[col] / pivot;
                b[row] = b[row] - factor * b[col];
                for c in col..n {
                    target[c] = target[c] - factor * pivot_row[c];
                }
            }
        }

        // Back substitution
        let mut solution = vec![T::zero(); n];
        for row in (0..n).rev() {
            let sum_ax = (row + 1..n).fold(T::zero(), |acc, c| acc + a[row][c] * solution[c]);
            solution[row] = (b[row] - sum_ax) / a[row][row];
        }

        Ok(LinearSystemResult {
            solution: Some(solution),
            is_singular: false,
            message: SOLVED_MESSAGE.to_string(),
        })
    }
}

/// Row at or below `col` with the largest `|a[row][col]|`; ties keep the
/// first such row.
fn pivot_row<T: Float>(a: &[Vec<T>], col: usize) -> usize {
    (col + 1..a.len()).fold(col, |best, row| {
        if a[row][col].abs() > a[best][col].abs() {
            row
        } else {
            best
        }
    })
}
