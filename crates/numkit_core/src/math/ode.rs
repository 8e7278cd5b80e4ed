//! Fixed-step integration of first-order initial value problems.
//!
//! Solves `dy/dx = f(x, y)`, `y(x0) = y0` on `[x0, x_end]` with a constant
//! nominal step. The last step is shortened so the trajectory ends exactly
//! at `x_end`; no step overshoots it and none is added after it.
//!
//! ## Methods
//!
//! - [`OdeMethod::Euler`]: `y ← y + h·f(x, y)`
//! - [`OdeMethod::Rk4`]: classical four-stage Runge-Kutta
//!
//! ```text
//! k1 = f(x, y)
//! k2 = f(x + h/2, y + h·k1/2)
//! k3 = f(x + h/2, y + h·k2/2)
//! k4 = f(x + h, y + h·k3)
//! y ← y + h·(k1 + 2k2 + 2k3 + k4)/6
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::traits::MathSolver;
use crate::types::{MathFunction, Point, SolverError};

/// Relative slack under which the remaining distance counts as one step.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Most steps a single run may take.
pub const MAX_STEPS: usize = 10_000_000;

/// Integration scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OdeMethod {
    /// Explicit Euler.
    Euler,
    /// Classical fourth-order Runge-Kutta.
    #[default]
    Rk4,
}

impl OdeMethod {
    /// Accepted method names.
    pub const NAMES: &'static str = "euler|rk4";

    /// Method key as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            OdeMethod::Euler => "euler",
            OdeMethod::Rk4 => "rk4",
        }
    }

    #[inline]
    fn step(&self, f: &MathFunction, x: f64, y: f64, h: f64) -> f64 {
        match self {
            OdeMethod::Euler => y + h * f.call2(x, y),
            OdeMethod::Rk4 => {
                let half = h / 2.0;
                let k1 = f.call2(x, y);
                let k2 = f.call2(x + half, y + half * k1);
                let k3 = f.call2(x + half, y + half * k2);
                let k4 = f.call2(x + h, y + h * k3);
                y + h * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0
            }
        }
    }
}

impl FromStr for OdeMethod {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "euler" => Ok(OdeMethod::Euler),
            "rk4" => Ok(OdeMethod::Rk4),
            _ => Err(SolverError::InvalidMethod {
                method: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for OdeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step-size settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdeConfig {
    /// Nominal step `h` (default: 0.1).
    pub step_size: f64,
}

impl Default for OdeConfig {
    fn default() -> Self {
        Self { step_size: 0.1 }
    }
}

impl OdeConfig {
    /// Configuration with the given nominal step.
    pub fn new(step_size: f64) -> Self {
        Self { step_size }
    }

    fn validate(&self) -> Result<(), SolverError> {
        if !(self.step_size > 0.0 && self.step_size.is_finite()) {
            return Err(SolverError::InvalidConfig(format!(
                "step_size must be positive and finite, got {}",
                self.step_size
            )));
        }
        Ok(())
    }
}

/// Initial condition and end point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialValueProblem {
    /// Initial abscissa.
    pub x0: f64,
    /// Value at `x0`.
    pub y0: f64,
    /// End of the integration interval.
    pub x_end: f64,
}

impl InitialValueProblem {
    /// Create `y(x0) = y0` on `[x0, x_end]`.
    pub fn new(x0: f64, y0: f64, x_end: f64) -> Self {
        Self { x0, y0, x_end }
    }
}

/// Computed trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OdeSolution {
    /// `(x, y)` pairs from `(x0, y0)` to `(x_end, y(x_end))`.
    pub points: Vec<Point<f64>>,
    /// Method used.
    pub method: OdeMethod,
    /// Nominal step.
    pub step_size: f64,
}

impl OdeSolution {
    /// Last point of the trajectory.
    pub fn last(&self) -> Option<&Point<f64>> {
        self.points.last()
    }
}

/// Fixed-step solver for `dy/dx = f(x, y)`.
///
/// # Example
///
/// ```
/// use numkit_core::math::ode::{DifferentialEquationSolver, InitialValueProblem, OdeMethod};
/// use numkit_core::traits::MathSolver;
/// use numkit_core::types::MathFunction;
///
/// let f = MathFunction::binary(|_x, y| y);
/// let solver = DifferentialEquationSolver::new(f, OdeMethod::Rk4);
///
/// let solution = solver.solve(InitialValueProblem::new(0.0, 1.0, 1.0)).unwrap();
/// let end = solution.last().unwrap();
/// assert_eq!(end.x, 1.0);
/// assert!((end.y - 1.0_f64.exp()).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct DifferentialEquationSolver {
    equation: MathFunction,
    method: OdeMethod,
    config: OdeConfig,
}

impl DifferentialEquationSolver {
    /// Create a solver with the default step.
    pub fn new(equation: MathFunction, method: OdeMethod) -> Self {
        Self {
            equation,
            method,
            config: OdeConfig::default(),
        }
    }

    /// Replace the step configuration.
    pub fn with_config(mut self, config: OdeConfig) -> Self {
        self.config = config;
        self
    }

    /// Selected method.
    pub fn method(&self) -> OdeMethod {
        self.method
    }

    /// Active configuration.
    pub fn config(&self) -> &OdeConfig {
        &self.config
    }
}

impl MathSolver for DifferentialEquationSolver {
    type Input = InitialValueProblem;
    type Output = OdeSolution;

    fn validate_input(&self) -> Result<(), SolverError> {
        self.equation.ensure_arity(2)?;
        self.config.validate()
    }

    fn solve(&self, ivp: InitialValueProblem) -> Result<OdeSolution, SolverError> {
        self.validate_input()?;
        let InitialValueProblem { x0, y0, x_end } = ivp;
        if !(x0.is_finite() && x_end.is_finite() && x_end > x0) {
            return Err(SolverError::InvalidRange {
                start: x0,
                end: x_end,
            });
        }

        let step = self.config.step_size;
        // x is monotone between the endpoints, so advancing at both means advancing everywhere
        if x0 + step == x0 || x_end - step == x_end {
            return Err(SolverError::InvalidConfig(format!(
                "step_size {} does not advance x on [{}, {}]",
                step, x0, x_end
            )));
        }
        let steps = ((x_end - x0) / step).ceil();
        if !(steps <= MAX_STEPS as f64) {
            return Err(SolverError::InvalidConfig(format!(
                "step_size {} needs {} steps on [{}, {}], more than {}",
                step, steps, x0, x_end, MAX_STEPS
            )));
        }

        let snap = step * (1.0 + SNAP_TOLERANCE);
        // steps <= MAX_STEPS, so the cast is exact
        let mut points = Vec::with_capacity(steps as usize + 1);
        points.push(Point::new(x0, y0));

        let (mut x, mut y) = (x0, y0);
        while x < x_end {
            let remaining = x_end - x;
            if remaining <= snap {
                y = self.method.step(&self.equation, x, y, remaining);
                x = x_end;
            } else {
                y = self.method.step(&self.equation, x, y, step);
                x += step;
            }
            points.push(Point::new(x, y));
        }

        trace!(method = %self.method, steps = points.len() - 1, "ode integration finished");
        Ok(OdeSolution {
            points,
            method: self.method,
            step_size: step,
        })
    }
}
