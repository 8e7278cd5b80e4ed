//! # numkit_core: Numerical Methods Toolkit
//!
//! ## Role
//!
//! numkit_core is the foundation library behind the `numkit` CLI, providing:
//! - Linear systems by Gaussian elimination with partial pivoting (`math::solvers`)
//! - Local minimisation by gradient descent or damped Newton (`math::solvers`)
//! - Fixed-step Euler and RK4 ODE integration (`math::ode`)
//! - Adaptive trapezoid, Simpson and Monte Carlo quadrature (`math::integrators`)
//! - Lagrange, Newton and natural cubic spline interpolation (`math::interpolators`)
//! - Central-difference gradients and Hessians (`math::differentiation`)
//! - Sandboxed arithmetic expressions (`expression`)
//! - Problem kinds and the solver factory (`problem`)
//!
//! Every solver implements the [`MathSolver`](traits::MathSolver) contract:
//! configuration is fixed at construction, checked by `validate_input`, and
//! `solve` validates before doing any numerical work. Failure to converge is
//! reported inside the result record, never as an error.
//!
//! ## Minimal Dependencies
//!
//! The library performs no I/O:
//! - num-traits: Generic floating-point code (`f64`, `f32`)
//! - rand: Seedable sampling for Monte Carlo quadrature
//! - thiserror: Error types
//! - serde / toml: Result records and problem files
//! - tracing: Diagnostic events (no subscriber is installed here)
//!
//! ## Usage Examples
//!
//! ```rust
//! use numkit_core::math::interpolators::{InterpolationMethod, Interpolator};
//! use numkit_core::math::solvers::LinearSystemSolver;
//! use numkit_core::traits::MathSolver;
//! use numkit_core::types::Point;
//!
//! // Linear system
//! let result = LinearSystemSolver::new(vec![vec![2.0, 1.0], vec![1.0, 3.0]], vec![5.0, 10.0])
//!     .solve(())
//!     .unwrap();
//! assert_eq!(result.message, "Solution found");
//!
//! // Natural cubic spline
//! let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 4.0)];
//! let spline = Interpolator::new(points, InterpolationMethod::Spline).solve(()).unwrap();
//! # assert!((spline.evaluate(1.5) - 2.3125).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod expression;
pub mod math;
pub mod problem;
pub mod traits;
pub mod types;
