//! Local minimisation of multivariate functions.
//!
//! Two methods share the same stopping rule: stop once every gradient
//! component is below `precision`, or after `max_iterations` updates.
//!
//! ```text
//! gradient: xᵢ ← xᵢ - η·gᵢ
//! newton:   xᵢ ← xᵢ - λ·gᵢ / (Hᵢᵢ + 1e-8)
//! ```
//!
//! The Newton variant is a damped, coordinate-wise step that uses only the
//! Hessian diagonal; it does not solve the full Newton system.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::SolverConfig;
use crate::math::differentiation::{NumericDifferentiator, DEFAULT_STEP};
use crate::traits::MathSolver;
use crate::types::{MathFunction, SolverError};

/// Regulariser added to the Hessian diagonal before dividing.
const CURVATURE_FLOOR: f64 = 1e-8;

/// Optimisation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumMethod {
    /// Fixed-rate gradient descent.
    #[default]
    Gradient,
    /// Damped Newton step on the Hessian diagonal.
    Newton,
}

impl ExtremumMethod {
    /// Accepted method names.
    pub const NAMES: &'static str = "gradient|newton";

    /// Method key as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtremumMethod::Gradient => "gradient",
            ExtremumMethod::Newton => "newton",
        }
    }
}

impl FromStr for ExtremumMethod {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gradient" => Ok(ExtremumMethod::Gradient),
            "newton" => Ok(ExtremumMethod::Newton),
            _ => Err(SolverError::InvalidMethod {
                method: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for ExtremumMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for [`ExtremumFinder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtremumConfig {
    /// Gradient threshold and iteration cap.
    pub convergence: SolverConfig,
    /// Gradient descent learning rate.
    pub learning_rate: f64,
    /// Newton damping factor.
    pub damping: f64,
    /// Central-difference step for gradient and Hessian.
    pub difference_step: f64,
}

impl Default for ExtremumConfig {
    fn default() -> Self {
        Self {
            convergence: SolverConfig::default(),
            learning_rate: 0.01,
            damping: 0.1,
            difference_step: DEFAULT_STEP,
        }
    }
}

impl ExtremumConfig {
    fn validate(&self) -> Result<(), SolverError> {
        self.convergence.validate()?;
        for (name, value) in [
            ("learning_rate", self.learning_rate),
            ("damping", self.damping),
            ("difference_step", self.difference_step),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SolverError::InvalidConfig(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a minimisation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremumResult {
    /// Final point, in variable order.
    pub point: Vec<f64>,
    /// Function value at `point`.
    pub value: f64,
    /// Number of updates performed.
    pub iterations: usize,
    /// `iterations < max_iterations`.
    pub converged: bool,
    /// Method used.
    pub method: ExtremumMethod,
}

/// Finds a local minimum of `f(x₁, …, xₙ)` from a start point.
#[derive(Debug, Clone)]
pub struct ExtremumFinder {
    function: MathFunction,
    variables: Vec<String>,
    method: ExtremumMethod,
    config: ExtremumConfig,
}

impl ExtremumFinder {
    /// Create a finder with the default configuration.
    pub fn new(function: MathFunction, variables: Vec<String>, method: ExtremumMethod) -> Self {
        Self {
            function,
            variables,
            method,
            config: ExtremumConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ExtremumConfig) -> Self {
        self.config = config;
        self
    }

    /// Declared variable names.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Selected method.
    pub fn method(&self) -> ExtremumMethod {
        self.method
    }

    /// Active configuration.
    pub fn config(&self) -> &ExtremumConfig {
        &self.config
    }

    fn differentiator(&self) -> NumericDifferentiator {
        NumericDifferentiator::new(self.config.difference_step)
    }

    fn is_stationary(&self, gradient: &[f64]) -> bool {
        let precision = self.config.convergence.precision;
        gradient.iter().all(|g| g.abs() < precision)
    }

    fn gradient_descent(&self, mut x: Vec<f64>) -> (Vec<f64>, usize) {
        let f = |p: &[f64]| self.function.call(p);
        let diff = self.differentiator();
        let mut iterations = 0;

        while iterations < self.config.convergence.max_iterations {
            let grad = diff.gradient(&f, &x);
            if self.is_stationary(&grad) {
                break;
            }
            for (xi, gi) in x.iter_mut().zip(&grad) {
                *xi -= self.config.learning_rate * gi;
            }
            iterations += 1;
        }

        (x, iterations)
    }

    fn newton(&self, mut x: Vec<f64>) -> (Vec<f64>, usize) {
        let f = |p: &[f64]| self.function.call(p);
        let diff = self.differentiator();
        let mut iterations = 0;

        while iterations < self.config.convergence.max_iterations {
            let grad = diff.gradient(&f, &x);
            if self.is_stationary(&grad) {
                break;
            }
            let curvature = diff.hessian_diagonal(&f, &x);
            for ((xi, gi), hii) in x.iter_mut().zip(&grad).zip(&curvature) {
                *xi -= self.config.damping * gi / (hii + CURVATURE_FLOOR);
            }
            iterations += 1;
        }

        (x, iterations)
    }
}

impl MathSolver for ExtremumFinder {
    type Input = Vec<f64>;
    type Output = ExtremumResult;

    fn validate_input(&self) -> Result<(), SolverError> {
        if self.variables.is_empty() {
            return Err(SolverError::InvalidVariables(
                "Variables must be a non-empty list".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &self.variables {
            if name.trim().is_empty() {
                return Err(SolverError::InvalidVariables(
                    "Variable names cannot be blank".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(SolverError::InvalidVariables(format!(
                    "Variable '{}' is declared more than once",
                    name
                )));
            }
        }
        self.function.ensure_arity(self.variables.len())?;
        self.config.validate()
    }

    fn solve(&self, start_point: Vec<f64>) -> Result<ExtremumResult, SolverError> {
        self.validate_input()?;
        if start_point.len() != self.variables.len() {
            return Err(SolverError::DimensionMismatch {
                expected: self.variables.len(),
                got: start_point.len(),
            });
        }

        let (point, iterations) = match self.method {
            ExtremumMethod::Gradient => self.gradient_descent(start_point),
            ExtremumMethod::Newton => self.newton(start_point),
        };
        let converged = iterations < self.config.convergence.max_iterations;
        if !converged {
            debug!(method = %self.method, iterations, "extremum search hit the iteration cap");
        }

        Ok(ExtremumResult {
            value: self.function.call(&point),
            point,
            iterations,
            converged,
            method: self.method,
        })
    }
}
