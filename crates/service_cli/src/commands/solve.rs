//! Per-kind solve commands
//!
//! Each command turns its flags into a [`ProblemSpec`] and hands it to
//! [`run::execute`](super::run::execute), so flags and problem files share
//! one code path.

use numkit_core::problem::ProblemSpec;
use tracing::info;

use super::parse::{parse_bounds, parse_list, parse_names, parse_points, parse_rows};
use super::run::{execute, mean_abscissa};
use crate::config::AppConfig;
use crate::render::RenderContext;
use crate::Result;

/// A problem built from flags, with what its report needs.
type Request = (ProblemSpec, RenderContext);

fn report((spec, context): Request, config: &AppConfig) -> Result<()> {
    println!("{}", execute(&spec, &context, config)?);
    Ok(())
}

/// Minimise `function` over `variables` from `start`.
pub fn extremum(
    function: &str,
    variables: &str,
    start: &str,
    method: Option<String>,
    config: &AppConfig,
) -> Result<()> {
    report(extremum_request(function, variables, start, method)?, config)
}

fn extremum_request(
    function: &str,
    variables: &str,
    start: &str,
    method: Option<String>,
) -> Result<Request> {
    let variables = parse_names(variables);
    info!(function, ?variables, "finding extremum");

    let spec = ProblemSpec {
        kind: "extremum".to_string(),
        method,
        function: Some(function.to_string()),
        variables: Some(variables.clone()),
        start: Some(parse_list(start)?),
        ..ProblemSpec::default()
    };
    let context = RenderContext {
        variables,
        at: None,
    };
    Ok((spec, context))
}

/// Solve `A·x = b`.
pub fn linear_system(matrix: &str, vector: &str, config: &AppConfig) -> Result<()> {
    report(linear_system_request(matrix, vector)?, config)
}

fn linear_system_request(matrix: &str, vector: &str) -> Result<Request> {
    let spec = ProblemSpec {
        kind: "linear_system".to_string(),
        matrix: Some(parse_rows(matrix)?),
        vector: Some(parse_list(vector)?),
        ..ProblemSpec::default()
    };
    Ok((spec, RenderContext::default()))
}

/// Arguments of the differential command
#[derive(Debug, Clone)]
pub struct DifferentialArgs {
    pub equation: String,
    pub x0: f64,
    pub y0: f64,
    pub x_end: f64,
    pub method: Option<String>,
    pub step: Option<f64>,
}

/// Integrate `dy/dx = equation` from `(x0, y0)` to `x_end`.
pub fn differential(args: DifferentialArgs, config: &AppConfig) -> Result<()> {
    report(differential_request(args), config)
}

fn differential_request(args: DifferentialArgs) -> Request {
    info!(equation = %args.equation, x0 = args.x0, x_end = args.x_end, "solving initial value problem");

    let spec = ProblemSpec {
        kind: "differential".to_string(),
        method: args.method,
        equation: Some(args.equation),
        x0: Some(args.x0),
        y0: Some(args.y0),
        x_end: Some(args.x_end),
        step_size: args.step,
        ..ProblemSpec::default()
    };
    (spec, RenderContext::default())
}

/// Integrate `function` over `[lower, upper]` times any extra bound pairs.
pub fn integral(
    function: &str,
    lower: f64,
    upper: f64,
    bounds: &[String],
    method: Option<String>,
    config: &AppConfig,
) -> Result<()> {
    report(integral_request(function, lower, upper, bounds, method)?, config)
}

fn integral_request(
    function: &str,
    lower: f64,
    upper: f64,
    bounds: &[String],
    method: Option<String>,
) -> Result<Request> {
    let extra = bounds
        .iter()
        .map(|pair| parse_bounds(pair))
        .collect::<Result<Vec<_>>>()?;
    info!(function, lower, upper, extra = extra.len(), "integrating");

    let spec = ProblemSpec {
        kind: "integral".to_string(),
        method,
        function: Some(function.to_string()),
        lower: Some(lower),
        upper: Some(upper),
        bounds: extra,
        ..ProblemSpec::default()
    };
    Ok((spec, RenderContext::default()))
}

/// Fit an interpolant through `points` and evaluate it at `at`.
///
/// Without `at` the example evaluation uses the mean sample abscissa.
pub fn interpolation(
    points: &str,
    method: Option<String>,
    at: Option<f64>,
    config: &AppConfig,
) -> Result<()> {
    report(interpolation_request(points, method, at)?, config)
}

fn interpolation_request(points: &str, method: Option<String>, at: Option<f64>) -> Result<Request> {
    let points = parse_points(points)?;
    let context = RenderContext {
        variables: Vec::new(),
        at: at.or_else(|| mean_abscissa(&points)),
    };

    let spec = ProblemSpec {
        kind: "interpolation".to_string(),
        method,
        points: Some(points),
        ..ProblemSpec::default()
    };
    Ok((spec, context))
}
