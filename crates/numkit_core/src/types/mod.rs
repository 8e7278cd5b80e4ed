//! Core value and error types.
//!
//! This module provides:
//! - `error`: Structured error types for solver validation and expression parsing
//! - `function`: The opaque callable ([`MathFunction`]) consumed by the solvers
//! - `point`: The `(x, y)` pair ([`Point`]) used by interpolation and ODE output
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod function;
pub mod point;

// Re-export commonly used types at module level
pub use error::{ExpressionError, SolverError};
pub use function::MathFunction;
pub use point::Point;
