//! The uniform solver contract.
//!
//! Every numerical component implements [`MathSolver`]: a lazy
//! `validate_input` check and a `solve` entry point that validates first and
//! then runs the algorithm exactly once. Solvers are stateless across calls;
//! any scratch state lives inside a single `solve`.

use crate::types::SolverError;

/// Generic floating-point trait for numeric computations.
///
/// Re-exported so data-driven solvers (linear systems, interpolation) can be
/// written once for `f64` and `f32`.
///
/// # Examples
/// ```
/// use numkit_core::traits::Float;
///
/// fn midpoint<T: Float>(a: T, b: T) -> T {
///     (a + b) / (T::one() + T::one())
/// }
///
/// assert_eq!(midpoint(1.0_f64, 2.0), 1.5);
/// ```
pub use num_traits::Float;

/// Two-operation contract shared by all solvers.
///
/// Configuration is fixed at construction and checked lazily: constructing a
/// solver never fails, `validate_input` (and therefore `solve`) does.
///
/// # Example
///
/// ```
/// use numkit_core::math::solvers::LinearSystemSolver;
/// use numkit_core::traits::MathSolver;
///
/// let solver = LinearSystemSolver::new(vec![vec![2.0, 1.0], vec![1.0, 3.0]], vec![5.0, 10.0]);
/// assert!(solver.validate_input().is_ok());
///
/// let result = solver.solve(()).unwrap();
/// assert!(!result.is_singular);
/// ```
pub trait MathSolver {
    /// Arguments supplied at solve time (interval, start point, bounds...).
    type Input;

    /// Result record produced by a successful solve.
    type Output;

    /// Check the configuration without doing any numerical work.
    fn validate_input(&self) -> Result<(), SolverError>;

    /// Validate, then run the algorithm.
    fn solve(&self, input: Self::Input) -> Result<Self::Output, SolverError>;
}
