//! Numerical algorithms.
//!
//! - [`differentiation`]: Central-difference gradient and Hessian estimation
//! - [`solvers`]: Linear systems and extremum finding
//! - [`ode`]: Fixed-step initial value problem integration
//! - [`integrators`]: Adaptive 1-D quadrature and repeated 1-D products
//! - [`interpolators`]: Polynomial and natural cubic spline interpolation
//!
//! No solver depends on another; they share only the
//! [`MathSolver`](crate::traits::MathSolver) contract.

pub mod differentiation;
pub mod integrators;
pub mod interpolators;
pub mod ode;
pub mod solvers;

use num_traits::Float;

/// Convert an `f64` constant into `T`.
///
/// Every `Float` type in use (`f32`, `f64`) represents these constants, so
/// the NaN fallback is never observed in practice.
#[inline]
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
