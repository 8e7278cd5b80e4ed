//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Validation failures raised by every solver entry point
//! - `ExpressionError`: Failures while tokenizing or parsing user expressions
//!
//! Non-convergence is never an error: solvers report it in-band through their
//! result records (`converged`, `is_singular`).

use thiserror::Error;

/// Solver validation errors.
///
/// Raised synchronously from `validate_input`/`solve` before any numerical
/// work begins, so a failed call never produces partial state.
///
/// # Variants
/// - `InvalidDimension`: Empty, non-square, or vector-mismatched linear system
/// - `InvalidMethod`: Method name not offered by the solver
/// - `InvalidRange`: ODE interval with `end <= start`, or a non-finite bound
/// - `NotCallable`: Function arity does not fit the solver
/// - `InsufficientPoints`: Too few interpolation samples
/// - `DuplicateAbscissa`: Repeated x-value among interpolation samples
/// - `DimensionMismatch`: Start point length differs from variable count
/// - `UnknownProblemType`: Problem-type tag not known to the factory
/// - `InvalidVariables`: Empty, malformed or repeated variable names
/// - `InvalidConfig`: Non-positive tolerance/step or zero iteration cap
///
/// # Examples
/// ```
/// use numkit_core::types::SolverError;
///
/// let err = SolverError::InsufficientPoints { got: 1, need: 2 };
/// assert_eq!(
///     format!("{}", err),
///     "Insufficient points: got 1, need at least 2"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Matrix is empty, not square, or its size disagrees with the vector.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Method name is not one of the solver's methods.
    #[error("Invalid method '{method}': expected one of {expected}")]
    InvalidMethod {
        /// The rejected method name
        method: String,
        /// Accepted method names, pipe-separated
        expected: &'static str,
    },

    /// Interval bound is not finite, or the ODE end point does not lie after
    /// the initial point.
    #[error("Invalid range: [{start}, {end}] is not a finite, non-empty interval")]
    InvalidRange {
        /// Initial point
        start: f64,
        /// Requested end point
        end: f64,
    },

    /// Function cannot be invoked with the argument count the solver needs.
    #[error("Function is not callable with {expected} argument(s): it takes {arity}")]
    NotCallable {
        /// Argument count required by the solver
        expected: usize,
        /// Argument count the function accepts
        arity: usize,
    },

    /// Not enough sample points for the interpolation method.
    #[error("Insufficient points: got {got}, need at least {need}")]
    InsufficientPoints {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Two samples share the same x-value.
    #[error("X values must be unique: {x} appears more than once")]
    DuplicateAbscissa {
        /// The repeated x-value
        x: f64,
    },

    /// Start point dimension differs from the number of variables.
    #[error("Start point dimension {got} does not match variable count {expected}")]
    DimensionMismatch {
        /// Number of declared variables
        expected: usize,
        /// Length of the supplied start point
        got: usize,
    },

    /// Problem-type tag not known to the factory.
    #[error("Unknown problem type: {0}")]
    UnknownProblemType(String),

    /// Variable list is empty or malformed.
    #[error("Invalid variables: {0}")]
    InvalidVariables(String),

    /// Solver tunable out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Expression parsing errors.
///
/// Produced by the expression builder while turning user text into a
/// callable. Every identifier outside the allow-list is rejected here, before
/// anything is evaluated.
///
/// # Examples
/// ```
/// use numkit_core::types::ExpressionError;
///
/// let err = ExpressionError::UnknownIdentifier("open".to_string());
/// assert_eq!(format!("{}", err), "Name 'open' is not allowed in expressions");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Character that cannot start any token.
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter {
        /// Offending character
        ch: char,
        /// Byte offset in the source text
        position: usize,
    },

    /// Token in a position the grammar does not allow.
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// Textual form of the token
        token: String,
        /// Byte offset in the source text
        position: usize,
    },

    /// Input ended while more tokens were required.
    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    /// Numeric literal that does not parse as a float.
    #[error("Invalid number literal '{0}'")]
    InvalidNumber(String),

    /// Identifier not in the allow-list of variables, constants and functions.
    #[error("Name '{0}' is not allowed in expressions")]
    UnknownIdentifier(String),

    /// Function called with the wrong number of arguments.
    #[error("Function '{name}' takes {expected} argument(s), got {got}")]
    ArityMismatch {
        /// Function name
        name: String,
        /// Accepted argument counts
        expected: &'static str,
        /// Number of arguments supplied
        got: usize,
    },

    /// Parentheses, calls or unary operators nested beyond the parser limit.
    #[error("Expression nests deeper than {limit} levels")]
    NestingTooDeep {
        /// Maximum accepted depth
        limit: usize,
    },

    /// Declared variable name is not a usable identifier.
    #[error("Invalid variable name '{0}'")]
    InvalidVariable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_display() {
        let err = SolverError::InvalidDimension("Matrix must be square".to_string());
        assert_eq!(format!("{}", err), "Invalid dimension: Matrix must be square");
    }

    #[test]
    fn test_invalid_method_display() {
        let err = SolverError::InvalidMethod {
            method: "midpoint".to_string(),
            expected: "euler|rk4",
        };
        let msg = format!("{}", err);
        assert!(msg.contains("midpoint"));
        assert!(msg.contains("euler|rk4"));
    }

    #[test]
    fn test_invalid_range_display() {
        let err = SolverError::InvalidRange {
            start: 0.0,
            end: -1.0,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid range: [0, -1] is not a finite, non-empty interval"
        );
    }

    #[test]
    fn test_not_callable_display() {
        let err = SolverError::NotCallable {
            expected: 1,
            arity: 2,
        };
        assert_eq!(
            format!("{}", err),
            "Function is not callable with 1 argument(s): it takes 2"
        );
    }

    #[test]
    fn test_duplicate_abscissa_display() {
        let err = SolverError::DuplicateAbscissa { x: 0.5 };
        assert!(format!("{}", err).starts_with("X values must be unique"));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = SolverError::DimensionMismatch {
            expected: 2,
            got: 3,
        };
        assert!(format!("{}", err).contains("variable count 2"));
    }

    #[test]
    fn test_unknown_problem_type_display() {
        let err = SolverError::UnknownProblemType("invalid_type".to_string());
        assert_eq!(format!("{}", err), "Unknown problem type: invalid_type");
    }

    #[test]
    fn test_solver_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&SolverError::InvalidConfig("precision".to_string()));
        assert_error(&ExpressionError::UnexpectedEnd);
    }

    #[test]
    fn test_expression_error_display() {
        let err = ExpressionError::UnexpectedCharacter {
            ch: '$',
            position: 3,
        };
        assert_eq!(format!("{}", err), "Unexpected character '$' at position 3");

        let err = ExpressionError::ArityMismatch {
            name: "atan2".to_string(),
            expected: "2",
            got: 1,
        };
        assert_eq!(
            format!("{}", err),
            "Function 'atan2' takes 2 argument(s), got 1"
        );
    }

    #[test]
    fn test_error_clone_and_eq() {
        let err = SolverError::InsufficientPoints { got: 2, need: 3 };
        assert_eq!(err.clone(), err);
    }
}
