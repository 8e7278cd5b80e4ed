//! Problem kinds and the solver factory.
//!
//! [`ProblemKind`] names the five problem types. [`Problem`] holds a fully
//! configured solver together with its solve arguments, one variant per
//! kind, and dispatches through [`MathSolver`]. [`ProblemSpec`] is the
//! textual form (TOML) that builds a `Problem` through the expression
//! builder.
//!
//! # Example
//!
//! ```
//! use numkit_core::problem::{ProblemSpec, Solution, SolverDefaults};
//! use numkit_core::traits::MathSolver;
//!
//! let spec = ProblemSpec::from_toml_str(r#"
//!     kind = "integral"
//!     method = "simpson"
//!     function = "3 * x**2"
//!     lower = 0.0
//!     upper = 1.0
//! "#).unwrap();
//!
//! let problem = spec.build(&SolverDefaults::default()).unwrap();
//! match problem.solve(()).unwrap() {
//!     Solution::Integral(result) => assert!((result.value() - 1.0).abs() < 1e-9),
//!     other => panic!("unexpected solution {:?}", other),
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::expression::Expression;
use crate::math::integrators::{
    IntegrationBounds, IntegrationResult, Integrator, QuadratureConfig, QuadratureMethod,
    DEFAULT_MAX_SUBDIVISIONS,
};
use crate::math::interpolators::{InterpolationMethod, InterpolationResult, Interpolator};
use crate::math::ode::{DifferentialEquationSolver, InitialValueProblem, OdeConfig, OdeMethod, OdeSolution};
use crate::math::solvers::{
    ExtremumConfig, ExtremumFinder, ExtremumMethod, ExtremumResult, LinearSystemResult,
    LinearSystemSolver, SolverConfig,
};
use crate::traits::MathSolver;
use crate::types::{ExpressionError, Point, SolverError};

/// Problem type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Local minimum of `f(x₁, …, xₙ)`.
    Extremum,
    /// Square linear system `A·x = b`.
    LinearSystem,
    /// Initial value problem `dy/dx = f(x, y)`.
    Differential,
    /// Definite integral.
    Integral,
    /// Interpolation through samples.
    Interpolation,
}

impl ProblemKind {
    /// Every kind, in display order.
    pub const ALL: [ProblemKind; 5] = [
        ProblemKind::Extremum,
        ProblemKind::LinearSystem,
        ProblemKind::Differential,
        ProblemKind::Integral,
        ProblemKind::Interpolation,
    ];

    /// Tag as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::Extremum => "extremum",
            ProblemKind::LinearSystem => "linear_system",
            ProblemKind::Differential => "differential",
            ProblemKind::Integral => "integral",
            ProblemKind::Interpolation => "interpolation",
        }
    }

    /// Method names offered for this kind, default first.
    pub fn methods(&self) -> &'static [&'static str] {
        match self {
            ProblemKind::Extremum => &["gradient", "newton"],
            ProblemKind::LinearSystem => &[GAUSSIAN],
            ProblemKind::Differential => &["rk4", "euler"],
            ProblemKind::Integral => &["trapezoid", "simpson", "monte_carlo"],
            ProblemKind::Interpolation => &["lagrange", "newton", "spline"],
        }
    }

    /// The method used when none is given.
    pub fn default_method(&self) -> &'static str {
        self.methods()[0]
    }
}

impl FromStr for ProblemKind {
    type Err = SolverError;

    /// Hyphens are accepted in place of underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase().replace('-', "_");
        ProblemKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| SolverError::UnknownProblemType(s.to_string()))
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const GAUSSIAN: &str = "gaussian";

/// Tunables applied when a problem does not set its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverDefaults {
    /// Convergence threshold for extremum and quadrature.
    pub precision: f64,
    /// Iteration cap for extremum and quadrature.
    pub max_iterations: usize,
    /// Nominal ODE step.
    pub step_size: f64,
    /// Monte Carlo seed.
    pub monte_carlo_seed: Option<u64>,
}

impl Default for SolverDefaults {
    fn default() -> Self {
        let convergence = SolverConfig::default();
        Self {
            precision: convergence.precision,
            max_iterations: convergence.max_iterations,
            step_size: OdeConfig::default().step_size,
            monte_carlo_seed: None,
        }
    }
}

/// Failure to turn a [`ProblemSpec`] into a [`Problem`].
#[derive(Error, Debug)]
pub enum ProblemError {
    /// Invalid solver argument.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Expression failed to parse.
    #[error("Invalid expression: {0}")]
    Expression(#[from] ExpressionError),

    /// Field required by the problem kind is absent.
    #[error("Problem '{kind}' requires field '{field}'")]
    MissingField {
        /// Problem kind
        kind: ProblemKind,
        /// Name of the missing field
        field: &'static str,
    },

    /// Problem file is not valid TOML or has unknown fields.
    #[error("Invalid problem file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Textual problem description.
///
/// Only the fields of the selected kind are read:
///
/// | kind            | fields                                                   |
/// |-----------------|----------------------------------------------------------|
/// | `extremum`      | `function`, `variables`, `start`                         |
/// | `linear_system` | `matrix`, `vector`                                       |
/// | `differential`  | `equation` (in `x`, `y`), `x0`, `y0`, `x_end`, `step_size` |
/// | `integral`      | `function` (in `x`), `lower`, `upper`, `bounds`          |
/// | `interpolation` | `points`                                                 |
///
/// `precision`, `max_iterations` and `seed` override [`SolverDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProblemSpec {
    /// Problem type tag.
    pub kind: String,
    /// Method name; the kind's default when absent.
    pub method: Option<String>,
    /// Objective or integrand.
    pub function: Option<String>,
    /// Right-hand side `f(x, y)` of an ODE.
    pub equation: Option<String>,
    /// Extremum variable names.
    pub variables: Option<Vec<String>>,
    /// Extremum start point.
    pub start: Option<Vec<f64>>,
    /// Linear system matrix.
    pub matrix: Option<Vec<Vec<f64>>>,
    /// Linear system right-hand side.
    pub vector: Option<Vec<f64>>,
    /// ODE initial abscissa.
    pub x0: Option<f64>,
    /// ODE initial value.
    pub y0: Option<f64>,
    /// ODE end point.
    pub x_end: Option<f64>,
    /// ODE nominal step.
    pub step_size: Option<f64>,
    /// Integral lower limit.
    pub lower: Option<f64>,
    /// Integral upper limit.
    pub upper: Option<f64>,
    /// Extra integral bound pairs.
    pub bounds: Vec<(f64, f64)>,
    /// Interpolation samples.
    pub points: Option<Vec<(f64, f64)>>,
    /// Convergence threshold override.
    pub precision: Option<f64>,
    /// Iteration cap override.
    pub max_iterations: Option<usize>,
    /// Monte Carlo seed override.
    pub seed: Option<u64>,
}

impl ProblemSpec {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ProblemError> {
        Ok(toml::from_str(text)?)
    }

    /// Parsed problem kind.
    pub fn kind(&self) -> Result<ProblemKind, SolverError> {
        self.kind.parse()
    }

    /// Build the configured solver.
    pub fn build(&self, defaults: &SolverDefaults) -> Result<Problem, ProblemError> {
        let kind = self.kind()?;
        let method = self.method.as_deref().unwrap_or(kind.default_method());
        let convergence = SolverConfig::new(
            self.precision.unwrap_or(defaults.precision),
            self.max_iterations.unwrap_or(defaults.max_iterations),
        );
        debug!(%kind, method, "building problem");

        let problem = match kind {
            ProblemKind::Extremum => {
                let variables = required(kind, "variables", self.variables.clone())?;
                let source = required(kind, "function", self.function.as_deref())?;
                let function = Expression::parse(source, &variables)?.into_function();
                let config = ExtremumConfig {
                    convergence,
                    ..ExtremumConfig::default()
                };
                Problem::Extremum {
                    finder: ExtremumFinder::new(function, variables, method.parse::<ExtremumMethod>()?)
                        .with_config(config),
                    start: required(kind, "start", self.start.clone())?,
                }
            }
            ProblemKind::LinearSystem => {
                if method != GAUSSIAN {
                    return Err(SolverError::InvalidMethod {
                        method: method.to_string(),
                        expected: GAUSSIAN,
                    }
                    .into());
                }
                Problem::LinearSystem(LinearSystemSolver::new(
                    required(kind, "matrix", self.matrix.clone())?,
                    required(kind, "vector", self.vector.clone())?,
                ))
            }
            ProblemKind::Differential => {
                let source = required(kind, "equation", self.equation.as_deref())?;
                let equation = Expression::parse(source, &["x".to_string(), "y".to_string()])?;
                let step = self.step_size.unwrap_or(defaults.step_size);
                Problem::Differential {
                    solver: DifferentialEquationSolver::new(equation.into_function(), method.parse::<OdeMethod>()?)
                        .with_config(OdeConfig::new(step)),
                    ivp: InitialValueProblem::new(
                        required(kind, "x0", self.x0)?,
                        required(kind, "y0", self.y0)?,
                        required(kind, "x_end", self.x_end)?,
                    ),
                }
            }
            ProblemKind::Integral => {
                let source = required(kind, "function", self.function.as_deref())?;
                let function = Expression::parse(source, &["x".to_string()])?.into_function();
                let config = QuadratureConfig {
                    convergence,
                    max_subdivisions: DEFAULT_MAX_SUBDIVISIONS,
                    seed: self.seed.or(defaults.monte_carlo_seed),
                };
                let bounds = IntegrationBounds {
                    lower: required(kind, "lower", self.lower)?,
                    upper: required(kind, "upper", self.upper)?,
                    extra: self.bounds.clone(),
                };
                Problem::Integral {
                    integrator: Integrator::new(function, method.parse::<QuadratureMethod>()?).with_config(config),
                    bounds,
                }
            }
            ProblemKind::Interpolation => {
                let points = required(kind, "points", self.points.as_ref())?
                    .iter()
                    .map(|&p| Point::from(p))
                    .collect();
                Problem::Interpolation(Interpolator::new(points, method.parse::<InterpolationMethod>()?))
            }
        };
        Ok(problem)
    }
}

fn required<T>(kind: ProblemKind, field: &'static str, value: Option<T>) -> Result<T, ProblemError> {
    value.ok_or(ProblemError::MissingField { kind, field })
}

/// A configured solver and its solve arguments.
#[derive(Debug, Clone)]
pub enum Problem {
    /// Minimisation from a start point.
    Extremum {
        /// Configured finder
        finder: ExtremumFinder,
        /// Start point, one entry per variable
        start: Vec<f64>,
    },
    /// Linear system.
    LinearSystem(LinearSystemSolver<f64>),
    /// Initial value problem.
    Differential {
        /// Configured solver
        solver: DifferentialEquationSolver,
        /// Initial condition and end point
        ivp: InitialValueProblem,
    },
    /// Definite integral.
    Integral {
        /// Configured integrator
        integrator: Integrator,
        /// Integration bounds
        bounds: IntegrationBounds,
    },
    /// Interpolation.
    Interpolation(Interpolator<f64>),
}

impl Problem {
    /// The problem's kind.
    pub fn kind(&self) -> ProblemKind {
        match self {
            Problem::Extremum { .. } => ProblemKind::Extremum,
            Problem::LinearSystem(_) => ProblemKind::LinearSystem,
            Problem::Differential { .. } => ProblemKind::Differential,
            Problem::Integral { .. } => ProblemKind::Integral,
            Problem::Interpolation(_) => ProblemKind::Interpolation,
        }
    }
}

impl MathSolver for Problem {
    type Input = ();
    type Output = Solution;

    fn validate_input(&self) -> Result<(), SolverError> {
        match self {
            Problem::Extremum { finder, .. } => finder.validate_input(),
            Problem::LinearSystem(solver) => solver.validate_input(),
            Problem::Differential { solver, .. } => solver.validate_input(),
            Problem::Integral { integrator, .. } => integrator.validate_input(),
            Problem::Interpolation(interpolator) => interpolator.validate_input(),
        }
    }

    fn solve(&self, _input: ()) -> Result<Solution, SolverError> {
        let solution = match self {
            Problem::Extremum { finder, start } => Solution::Extremum(finder.solve(start.clone())?),
            Problem::LinearSystem(solver) => Solution::LinearSystem(solver.solve(())?),
            Problem::Differential { solver, ivp } => Solution::Differential(solver.solve(*ivp)?),
            Problem::Integral { integrator, bounds } => Solution::Integral(integrator.solve(bounds.clone())?),
            Problem::Interpolation(interpolator) => Solution::Interpolation(interpolator.solve(())?),
        };
        Ok(solution)
    }
}

/// Result record of any problem kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Solution {
    /// Extremum result.
    Extremum(ExtremumResult),
    /// Linear system result.
    LinearSystem(LinearSystemResult<f64>),
    /// ODE trajectory.
    Differential(OdeSolution),
    /// Integral estimate.
    Integral(IntegrationResult),
    /// Fitted interpolant.
    Interpolation(InterpolationResult<f64>),
}

impl Solution {
    /// Kind of the problem that produced this solution.
    pub fn kind(&self) -> ProblemKind {
        match self {
            Solution::Extremum(_) => ProblemKind::Extremum,
            Solution::LinearSystem(_) => ProblemKind::LinearSystem,
            Solution::Differential(_) => ProblemKind::Differential,
            Solution::Integral(_) => ProblemKind::Integral,
            Solution::Interpolation(_) => ProblemKind::Interpolation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn build(toml_text: &str) -> Result<Problem, ProblemError> {
        ProblemSpec::from_toml_str(toml_text)?.build(&SolverDefaults::default())
    }

    // ========================================
    // ProblemKind Tests
    // ========================================

    #[test]
    fn test_kind_from_str() {
        for kind in ProblemKind::ALL {
            assert_eq!(kind.as_str().parse::<ProblemKind>().unwrap(), kind);
        }
        assert_eq!("linear-system".parse::<ProblemKind>().unwrap(), ProblemKind::LinearSystem);
    }

    #[test]
    fn test_invalid_solver_type() {
        let err = "invalid_type".parse::<ProblemKind>().unwrap_err();
        assert_eq!(err, SolverError::UnknownProblemType("invalid_type".to_string()));
    }

    #[test]
    fn test_methods_match_solver_parsers() {
        for name in ProblemKind::Extremum.methods() {
            assert!(name.parse::<ExtremumMethod>().is_ok());
        }
        for name in ProblemKind::Differential.methods() {
            assert!(name.parse::<OdeMethod>().is_ok());
        }
        for name in ProblemKind::Integral.methods() {
            assert!(name.parse::<QuadratureMethod>().is_ok());
        }
        for name in ProblemKind::Interpolation.methods() {
            assert!(name.parse::<InterpolationMethod>().is_ok());
        }
        assert_eq!(ProblemKind::Integral.default_method(), "trapezoid");
        assert_eq!(ProblemKind::Differential.default_method(), "rk4");
    }

    // ========================================
    // Factory Tests
    // ========================================

    #[test]
    fn test_factory_creation() {
        let problems = [
            r#"kind = "extremum"
               function = "x**2 + y**2"
               variables = ["x", "y"]
               start = [1.0, 1.0]"#,
            r#"kind = "linear_system"
               matrix = [[1.0, 2.0], [3.0, 4.0]]
               vector = [5.0, 6.0]"#,
            r#"kind = "differential"
               equation = "x + y"
               x0 = 0.0
               y0 = 1.0
               x_end = 1.0"#,
            r#"kind = "integral"
               function = "x**2"
               lower = 0.0
               upper = 1.0"#,
            r#"kind = "interpolation"
               points = [[0.0, 0.0], [1.0, 1.0], [2.0, 4.0]]"#,
        ];
        for (text, kind) in problems.iter().zip(ProblemKind::ALL) {
            let problem = build(text).unwrap();
            assert_eq!(problem.kind(), kind);
            assert!(problem.validate_input().is_ok());
            assert_eq!(problem.solve(()).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_in_problem_file() {
        let err = build(r#"kind = "fourier""#).unwrap_err();
        assert!(matches!(
            err,
            ProblemError::Solver(SolverError::UnknownProblemType(ref tag)) if tag == "fourier"
        ));
        assert_eq!(err.to_string(), "Unknown problem type: fourier");
    }

    #[test]
    fn test_missing_field() {
        let err = build(
            r#"kind = "integral"
               function = "x""#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProblemError::MissingField {
                kind: ProblemKind::Integral,
                field: "lower"
            }
        ));
    }

    #[test]
    fn test_invalid_method() {
        let err = build(
            r#"kind = "linear_system"
               method = "lu"
               matrix = [[1.0]]
               vector = [1.0]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProblemError::Solver(SolverError::InvalidMethod { .. })));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            build("kind = \"integral\"\nfunciton = \"x\""),
            Err(ProblemError::Parse(_))
        ));
    }

    #[test]
    fn test_expression_errors_surface() {
        let err = build(
            r#"kind = "integral"
               function = "open(x)"
               lower = 0.0
               upper = 1.0"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProblemError::Expression(ExpressionError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn test_overrides_and_defaults() {
        let defaults = SolverDefaults {
            step_size: 0.25,
            ..SolverDefaults::default()
        };
        let spec = ProblemSpec::from_toml_str(
            r#"kind = "differential"
               method = "rk4"
               equation = "y"
               x0 = 0.0
               y0 = 1.0
               x_end = 1.0"#,
        )
        .unwrap();
        match spec.build(&defaults).unwrap().solve(()).unwrap() {
            Solution::Differential(solution) => {
                assert_eq!(solution.step_size, 0.25);
                assert_eq!(solution.points.len(), 5);
                assert_relative_eq!(solution.points[4].y, 1.0_f64.exp(), max_relative = 1e-3);
            }
            other => panic!("Expected differential solution, got {:?}", other),
        }
    }

    #[test]
    fn test_solution_json_is_tagged() {
        let problem = build(
            r#"kind = "linear_system"
               matrix = [[2.0, 1.0], [1.0, 3.0]]
               vector = [5, 10]"#,
        )
        .unwrap();
        let json = serde_json::to_value(problem.solve(()).unwrap()).unwrap();
        assert_eq!(json["kind"], "linear_system");
        assert_eq!(json["is_singular"], false);
        assert_eq!(json["message"], "Solution found");
    }
}
