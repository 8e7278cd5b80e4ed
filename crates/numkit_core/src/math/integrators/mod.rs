//! Adaptive one-dimensional quadrature.
//!
//! ## Methods
//!
//! - [`QuadratureMethod::Trapezoid`]: composite trapezoid rule, segments doubling from 2
//! - [`QuadratureMethod::Simpson`]: composite Simpson rule, segments doubling from 2
//! - [`QuadratureMethod::MonteCarlo`]: hit-or-miss sampling, samples doubling from 3
//!
//! Every method refines until two successive estimates differ by less than
//! `precision`, or until `max_iterations` refinements. Hitting the cap is
//! reported as `converged = false`.
//!
//! ## Several dimensions
//!
//! Extra bound pairs turn the solve into a product of independent 1-D
//! integrals of the same one-variable function, one per bound pair. This
//! is exact only for separable integrands of the form `g(x)·g(y)·…` and is
//! not a true multidimensional quadrature.
//!
//! ## Examples
//!
//! ```
//! use numkit_core::math::integrators::{IntegrationBounds, Integrator, QuadratureMethod};
//! use numkit_core::traits::MathSolver;
//! use numkit_core::types::MathFunction;
//!
//! let f = MathFunction::unary(|x| x * x);
//! let integrator = Integrator::new(f, QuadratureMethod::Simpson);
//!
//! let result = integrator.solve(IntegrationBounds::new(0.0, 3.0)).unwrap();
//! assert!((result.value() - 9.0).abs() < 1e-9);
//! assert_eq!(result.method(), "Simpson's Rule");
//! ```

mod monte_carlo;
mod rules;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::monte_carlo::{height_bound, HitOrMissSampler, INITIAL_SAMPLES};
use self::rules::{refine, Refinement};
use super::solvers::SolverConfig;
use crate::traits::MathSolver;
use crate::types::{MathFunction, SolverError};

/// Default cap on segments or samples per refinement.
pub const DEFAULT_MAX_SUBDIVISIONS: usize = 1 << 20;

/// Initial segment count for the deterministic rules.
const INITIAL_SEGMENTS: usize = 2;

/// Quadrature rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadratureMethod {
    /// Composite trapezoid rule.
    #[default]
    Trapezoid,
    /// Composite Simpson rule.
    Simpson,
    /// Hit-or-miss Monte Carlo.
    MonteCarlo,
}

impl QuadratureMethod {
    /// Accepted method names.
    pub const NAMES: &'static str = "trapezoid|simpson|monte_carlo";

    /// Method key as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            QuadratureMethod::Trapezoid => "trapezoid",
            QuadratureMethod::Simpson => "simpson",
            QuadratureMethod::MonteCarlo => "monte_carlo",
        }
    }

    /// Name reported in results.
    pub fn display_name(&self) -> &'static str {
        match self {
            QuadratureMethod::Trapezoid => "Trapezoidal Rule",
            QuadratureMethod::Simpson => "Simpson's Rule",
            QuadratureMethod::MonteCarlo => "Monte Carlo",
        }
    }
}

impl FromStr for QuadratureMethod {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trapezoid" => Ok(QuadratureMethod::Trapezoid),
            "simpson" => Ok(QuadratureMethod::Simpson),
            "monte_carlo" => Ok(QuadratureMethod::MonteCarlo),
            _ => Err(SolverError::InvalidMethod {
                method: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for QuadratureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refinement settings for [`Integrator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureConfig {
    /// Threshold on successive estimates and refinement cap.
    pub convergence: SolverConfig,
    /// Largest segment or sample count a refinement may use.
    pub max_subdivisions: usize,
    /// Monte Carlo seed; `None` draws from OS entropy on every solve.
    pub seed: Option<u64>,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            convergence: SolverConfig::default(),
            max_subdivisions: DEFAULT_MAX_SUBDIVISIONS,
            seed: None,
        }
    }
}

impl QuadratureConfig {
    /// Default configuration with a fixed Monte Carlo seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Integration interval plus optional extra bound pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationBounds {
    /// Lower limit of the first interval.
    pub lower: f64,
    /// Upper limit of the first interval.
    pub upper: f64,
    /// Further `(lower, upper)` pairs for a repeated 1-D product.
    #[serde(default)]
    pub extra: Vec<(f64, f64)>,
}

impl IntegrationBounds {
    /// Single interval `[lower, upper]`.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            extra: Vec::new(),
        }
    }

    /// Append another bound pair.
    pub fn with_extra(mut self, lower: f64, upper: f64) -> Self {
        self.extra.push((lower, upper));
        self
    }

    /// Whether more than one interval is present.
    pub fn is_repeated(&self) -> bool {
        !self.extra.is_empty()
    }

    /// All bound pairs, first interval first.
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        std::iter::once((self.lower, self.upper))
            .chain(self.extra.iter().copied())
            .collect()
    }
}

/// One-dimensional integration result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadratureResult {
    /// Final estimate.
    pub value: f64,
    /// Display name of the rule.
    pub method: String,
    /// Segments (or samples) behind the final estimate.
    pub segments: usize,
    /// Refinements performed without converging.
    pub iterations: usize,
    /// Whether two successive estimates agreed within `precision`.
    pub converged: bool,
}

/// Product of 1-D integrals over several bound pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatedIntegralResult {
    /// Product of the per-interval estimates.
    pub value: f64,
    /// `Repeated 1D <method>`.
    pub method: String,
    /// Bound pairs in input order.
    pub bounds: Vec<(f64, f64)>,
    /// Whether every factor converged.
    pub converged: bool,
}

/// Result of [`Integrator::solve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IntegrationResult {
    /// Single interval.
    Single(QuadratureResult),
    /// Repeated 1-D product.
    Repeated(RepeatedIntegralResult),
}

impl IntegrationResult {
    /// The integral estimate.
    pub fn value(&self) -> f64 {
        match self {
            IntegrationResult::Single(r) => r.value,
            IntegrationResult::Repeated(r) => r.value,
        }
    }

    /// Reported method name.
    pub fn method(&self) -> &str {
        match self {
            IntegrationResult::Single(r) => &r.method,
            IntegrationResult::Repeated(r) => &r.method,
        }
    }

    /// Whether the refinement converged.
    pub fn converged(&self) -> bool {
        match self {
            IntegrationResult::Single(r) => r.converged,
            IntegrationResult::Repeated(r) => r.converged,
        }
    }
}

/// Adaptive integrator for functions of one variable.
#[derive(Debug, Clone)]
pub struct Integrator {
    function: MathFunction,
    method: QuadratureMethod,
    config: QuadratureConfig,
}

impl Integrator {
    /// Create an integrator with the default configuration.
    pub fn new(function: MathFunction, method: QuadratureMethod) -> Self {
        Self {
            function,
            method,
            config: QuadratureConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: QuadratureConfig) -> Self {
        self.config = config;
        self
    }

    /// Selected method.
    pub fn method(&self) -> QuadratureMethod {
        self.method
    }

    /// Active configuration.
    pub fn config(&self) -> &QuadratureConfig {
        &self.config
    }

    fn integrate(&self, a: f64, b: f64, sampler: &mut HitOrMissSampler) -> QuadratureResult {
        let f = |x: f64| self.function.call1(x);
        let Refinement {
            value,
            segments,
            iterations,
            converged,
        } = match self.method {
            QuadratureMethod::Trapezoid => {
                refine(INITIAL_SEGMENTS, &self.config, |n| rules::trapezoid(f, a, b, n))
            }
            QuadratureMethod::Simpson => {
                refine(INITIAL_SEGMENTS, &self.config, |n| rules::simpson(f, a, b, n))
            }
            QuadratureMethod::MonteCarlo => {
                let bound = height_bound(f, a, b);
                debug!(bound, "monte carlo bounding height");
                refine(INITIAL_SAMPLES, &self.config, |n| {
                    sampler.estimate(f, a, b, bound, n)
                })
            }
        };

        if !converged {
            debug!(method = %self.method, a, b, iterations, "quadrature did not converge");
        }

        QuadratureResult {
            value,
            method: self.method.display_name().to_string(),
            segments,
            iterations,
            converged,
        }
    }
}

impl MathSolver for Integrator {
    type Input = IntegrationBounds;
    type Output = IntegrationResult;

    fn validate_input(&self) -> Result<(), SolverError> {
        self.function.ensure_arity(1)?;
        self.config.convergence.validate()
    }

    fn solve(&self, bounds: IntegrationBounds) -> Result<IntegrationResult, SolverError> {
        self.validate_input()?;
        let pairs = bounds.pairs();
        if let Some(&(start, end)) = pairs
            .iter()
            .find(|(a, b)| !(a.is_finite() && b.is_finite()))
        {
            return Err(SolverError::InvalidRange { start, end });
        }

        let mut sampler = HitOrMissSampler::new(self.config.seed);
        if !bounds.is_repeated() {
            let result = self.integrate(bounds.lower, bounds.upper, &mut sampler);
            return Ok(IntegrationResult::Single(result));
        }

        let mut value = 1.0;
        let mut converged = true;
        for &(a, b) in &pairs {
            let factor = self.integrate(a, b, &mut sampler);
            value *= factor.value;
            converged &= factor.converged;
        }

        Ok(IntegrationResult::Repeated(RepeatedIntegralResult {
            value,
            method: format!("Repeated 1D {}", self.method),
            bounds: pairs,
            converged,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn single(result: IntegrationResult) -> QuadratureResult {
        match result {
            IntegrationResult::Single(r) => r,
            other => panic!("Expected single integral, got {:?}", other),
        }
    }

    fn integrate(f: MathFunction, method: QuadratureMethod, a: f64, b: f64) -> QuadratureResult {
        single(
            Integrator::new(f, method)
                .with_config(QuadratureConfig::seeded(42))
                .solve(IntegrationBounds::new(a, b))
                .unwrap(),
        )
    }

    // ========================================
    // Validation Tests
    // ========================================

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            "monte_carlo".parse::<QuadratureMethod>().unwrap(),
            QuadratureMethod::MonteCarlo
        );
        assert!(matches!(
            "romberg".parse::<QuadratureMethod>(),
            Err(SolverError::InvalidMethod { .. })
        ));
    }

    #[test]
    fn test_requires_unary_function() {
        let integrator = Integrator::new(MathFunction::binary(|x, y| x + y), QuadratureMethod::Trapezoid);
        assert_eq!(
            integrator.validate_input(),
            Err(SolverError::NotCallable {
                expected: 1,
                arity: 2
            })
        );
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let integrator = Integrator::new(MathFunction::unary(|x| x), QuadratureMethod::Trapezoid);
        assert!(matches!(
            integrator.solve(IntegrationBounds::new(0.0, f64::INFINITY)),
            Err(SolverError::InvalidRange { .. })
        ));
        assert!(matches!(
            integrator.solve(IntegrationBounds::new(0.0, 1.0).with_extra(f64::NAN, 1.0)),
            Err(SolverError::InvalidRange { .. })
        ));
    }

    // ========================================
    // Deterministic Rules
    // ========================================

    #[test]
    fn test_trapezoid_rule_linear() {
        let result = integrate(MathFunction::unary(|x| 2.0 * x + 3.0), QuadratureMethod::Trapezoid, 0.0, 2.0);
        assert_relative_eq!(result.value, 10.0, max_relative = 1e-6);
        assert!(result.converged);
        assert_eq!(result.method, "Trapezoidal Rule");
    }

    #[test]
    fn test_simpson_rule_quadratic() {
        let result = integrate(
            MathFunction::unary(|x| x * x + 2.0 * x + 1.0),
            QuadratureMethod::Simpson,
            0.0,
            2.0,
        );
        assert_relative_eq!(result.value, 26.0 / 3.0, max_relative = 1e-6);
        assert!(result.converged);
        assert_eq!(result.method, "Simpson's Rule");
    }

    #[test]
    fn test_simpson_sine() {
        let result = integrate(MathFunction::unary(f64::sin), QuadratureMethod::Simpson, 0.0, PI);
        assert_relative_eq!(result.value, 2.0, epsilon = 1e-6);
        assert!(result.converged);
    }

    #[test]
    fn test_adaptive_refinement() {
        let integrator = Integrator::new(MathFunction::unary(|x| (-x * x).exp()), QuadratureMethod::Trapezoid)
            .with_config(QuadratureConfig {
                convergence: SolverConfig::new(1e-4, 1000),
                ..Default::default()
            });
        let result = single(integrator.solve(IntegrationBounds::new(0.0, 1.0)).unwrap());
        assert!(result.iterations > 0);
        assert!(result.converged);
        assert!(result.segments > 2);
    }

    #[test]
    fn test_max_iterations() {
        let integrator = Integrator::new(MathFunction::unary(f64::sin), QuadratureMethod::Trapezoid)
            .with_config(QuadratureConfig {
                convergence: SolverConfig::new(1e-12, 5),
                ..Default::default()
            });
        let result = single(integrator.solve(IntegrationBounds::new(0.0, PI)).unwrap());
        assert_eq!(result.iterations, 5);
        assert!(!result.converged);
    }

    #[test]
    fn test_reversed_bounds_flip_sign() {
        let result = integrate(MathFunction::unary(|x| x), QuadratureMethod::Trapezoid, 1.0, 0.0);
        assert_relative_eq!(result.value, -0.5, epsilon = 1e-12);
    }

    // ========================================
    // Monte Carlo
    // ========================================

    #[test]
    fn test_monte_carlo_loose_bounds() {
        let result = integrate(MathFunction::unary(|x| x * x), QuadratureMethod::MonteCarlo, 0.0, 1.0);
        assert_eq!(result.method, "Monte Carlo");
        assert!(result.segments >= 3);
        assert!(result.value >= 0.0 && result.value <= 1.0);
    }

    #[test]
    fn test_monte_carlo_constant_converges() {
        let result = integrate(MathFunction::unary(|_| 2.0), QuadratureMethod::MonteCarlo, 0.0, 1.5);
        assert_eq!(result.value, 3.0);
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_monte_carlo_seeded_is_idempotent() {
        let integrator = Integrator::new(MathFunction::unary(f64::sin), QuadratureMethod::MonteCarlo)
            .with_config(QuadratureConfig::seeded(9));
        let bounds = IntegrationBounds::new(0.0, PI);
        assert_eq!(
            integrator.solve(bounds.clone()).unwrap(),
            integrator.solve(bounds).unwrap()
        );
    }

    // ========================================
    // Repeated 1-D
    // ========================================

    #[test]
    fn test_repeated_integral_is_product() {
        let integrator = Integrator::new(MathFunction::unary(|x| x), QuadratureMethod::Simpson);
        let result = integrator
            .solve(IntegrationBounds::new(0.0, 1.0).with_extra(0.0, 2.0))
            .unwrap();
        match &result {
            IntegrationResult::Repeated(r) => {
                assert_eq!(r.method, "Repeated 1D simpson");
                assert_eq!(r.bounds, vec![(0.0, 1.0), (0.0, 2.0)]);
                assert!(r.converged);
            }
            other => panic!("Expected repeated integral, got {:?}", other),
        }
        // (1/2) · 2
        assert_relative_eq!(result.value(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_result_serializes_flat() {
        let result = integrate(MathFunction::unary(|x| x), QuadratureMethod::Trapezoid, 0.0, 1.0);
        let text = toml::to_string(&IntegrationResult::Single(result)).unwrap();
        assert!(text.contains("method = \"Trapezoidal Rule\""));
        assert!(text.contains("converged = true"));
    }
}
