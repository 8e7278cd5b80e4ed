//! Solver configuration types.

use serde::{Deserialize, Serialize};

use crate::types::SolverError;

/// Convergence settings shared by the iterative solvers.
///
/// The extremum finder stops once every gradient component is below
/// `precision`; the quadrature rules stop once two successive refinements
/// differ by less than `precision`. Either stops at `max_iterations`.
///
/// # Example
///
/// ```
/// use numkit_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config = SolverConfig::default();
/// assert_eq!(config.precision, 1e-6);
/// assert_eq!(config.max_iterations, 1000);
///
/// // Custom configuration
/// let custom = SolverConfig {
///     precision: 1e-9,
///     max_iterations: 200,
/// };
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Convergence threshold.
    ///
    /// Smaller values provide more precision but may require more iterations.
    pub precision: f64,

    /// Maximum number of iterations before giving up.
    ///
    /// Hitting the cap is reported as `converged = false`, never as an error.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    /// Default values:
    /// - `precision`: 1e-6
    /// - `max_iterations`: 1000
    fn default() -> Self {
        Self {
            precision: 1e-6,
            max_iterations: 1000,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with specified values.
    ///
    /// Values are checked lazily by [`validate`](Self::validate), which every
    /// solver calls from `validate_input`.
    pub fn new(precision: f64, max_iterations: usize) -> Self {
        Self {
            precision,
            max_iterations,
        }
    }

    /// Tighter threshold (1e-10) with a larger cap (10000).
    pub fn high_precision() -> Self {
        Self {
            precision: 1e-10,
            max_iterations: 10_000,
        }
    }

    /// Relaxed threshold (1e-4) with a smaller cap (200).
    pub fn fast() -> Self {
        Self {
            precision: 1e-4,
            max_iterations: 200,
        }
    }

    /// Reject non-positive or non-finite precision and a zero iteration cap.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.precision > 0.0 && self.precision.is_finite()) {
            return Err(SolverError::InvalidConfig(format!(
                "precision must be positive and finite, got {}",
                self.precision
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
