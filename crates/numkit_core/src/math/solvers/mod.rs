//! Linear-system and optimisation solvers.
//!
//! ## Available Solvers
//!
//! - [`LinearSystemSolver`]: Gaussian elimination with partial pivoting
//! - [`ExtremumFinder`]: Gradient descent and damped diagonal Newton minimisation
//!
//! ## Configuration
//!
//! Iterative solvers share the [`SolverConfig`] shape:
//! - `precision`: Convergence threshold (default: 1e-6)
//! - `max_iterations`: Iteration cap (default: 1000)
//!
//! ## Examples
//!
//! ```
//! use numkit_core::math::solvers::{ExtremumFinder, ExtremumMethod};
//! use numkit_core::traits::MathSolver;
//! use numkit_core::types::MathFunction;
//!
//! // Minimise x² + y²
//! let f = MathFunction::binary(|x, y| x * x + y * y);
//! let finder = ExtremumFinder::new(f, vec!["x".into(), "y".into()], ExtremumMethod::Gradient);
//!
//! let result = finder.solve(vec![1.0, 1.0]).unwrap();
//! assert!(result.converged);
//! assert!(result.point[0].abs() < 1e-4);
//! ```

mod config;
mod extremum;
mod linear_system;

// Re-export public types at module level
pub use config::SolverConfig;
pub use extremum::{ExtremumConfig, ExtremumFinder, ExtremumMethod, ExtremumResult};
pub use linear_system::{LinearSystemResult, LinearSystemSolver};
