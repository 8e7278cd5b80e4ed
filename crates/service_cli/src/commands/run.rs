//! Run command implementation
//!
//! Builds a problem from its textual description, solves it and prints the
//! rendered result. Every per-kind subcommand ends up here.

use std::path::Path;

use numkit_core::problem::{ProblemKind, ProblemSpec};
use numkit_core::traits::MathSolver;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::render::{render, RenderContext};
use crate::{CliError, Result};

/// Solve `spec` and return the rendered result.
pub fn execute(spec: &ProblemSpec, context: &RenderContext, config: &AppConfig) -> Result<String> {
    let problem = spec.build(&config.solver_defaults())?;
    info!(kind = %problem.kind(), "solving problem");

    let solution = problem.solve(())?;
    debug!(?solution, "problem solved");

    render(&solution, context, config.output)
}

/// Solve the problem described in a TOML file.
pub fn run(path: &Path, config: &AppConfig) -> Result<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    let spec = ProblemSpec::from_toml_str(&text)?;

    println!("{}", execute(&spec, &context_for(&spec)?, config)?);
    Ok(())
}

/// Report context derived from the file contents.
fn context_for(spec: &ProblemSpec) -> Result<RenderContext> {
    let mut context = RenderContext::default();
    match spec.kind()? {
        ProblemKind::Extremum => context.variables = spec.variables.clone().unwrap_or_default(),
        ProblemKind::Interpolation => {
            context.at = spec.points.as_deref().and_then(mean_abscissa);
        }
        _ => {}
    }
    Ok(context)
}

/// Mean of the sample x-values, the default example abscissa.
pub fn mean_abscissa(points: &[(f64, f64)]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().map(|(x, _)| x).sum::<f64>() / points.len() as f64)
}
