//! Result rendering
//!
//! Text output mirrors the layout of each problem kind's report; JSON output
//! is the serialised result record.

use std::fmt::{self, Write};

use numkit_core::math::integrators::IntegrationResult;
use numkit_core::problem::Solution;

use crate::config::OutputFormat;
use crate::Result;

/// Context a report needs beyond the result record
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Extremum variable names, in point order
    pub variables: Vec<String>,
    /// Abscissa for the interpolation example evaluation
    pub at: Option<f64>,
}

/// Render `solution` in the requested format.
pub fn render(solution: &Solution, context: &RenderContext, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(solution)?),
        OutputFormat::Text => Ok(render_text(solution, context)?),
    }
}

fn render_text(solution: &Solution, context: &RenderContext) -> std::result::Result<String, fmt::Error> {
    let mut out = String::new();

    match solution {
        Solution::Extremum(result) => {
            if result.converged {
                writeln!(out, "Minimum found at:")?;
                for (name, value) in context.variables.iter().zip(&result.point) {
                    writeln!(out, "{} = {:.6}", name, value)?;
                }
                writeln!(out, "\nFunction value: {:.6}", result.value)?;
                writeln!(out, "Iterations: {}", result.iterations)?;
            } else {
                writeln!(out, "Did not converge after {} iterations", result.iterations)?;
                writeln!(out, "Last point: {:?}", result.point)?;
            }
            writeln!(out, "Method: {}", result.method)?;
        }
        Solution::LinearSystem(result) => match &result.solution {
            Some(x) => {
                writeln!(out, "Solution:")?;
                for (i, value) in x.iter().enumerate() {
                    writeln!(out, "x{} = {:.6}", i, value)?;
                }
            }
            None => {
                writeln!(out, "{}", result.message)?;
            }
        },
        Solution::Differential(result) => {
            writeln!(out, "Solution points (x, y):")?;
            for p in &result.points {
                writeln!(out, "{:.4}, {:.6}", p.x, p.y)?;
            }
            writeln!(out, "\nMethod: {}", result.method)?;
            writeln!(out, "Step: {}", result.step_size)?;
        }
        Solution::Integral(result) => {
            writeln!(out, "Integral value: {:.6}", result.value())?;
            match result {
                IntegrationResult::Single(single) => {
                    writeln!(out, "Segments: {}", single.segments)?;
                    writeln!(out, "Iterations: {}", single.iterations)?;
                }
                IntegrationResult::Repeated(repeated) => {
                    let bounds: Vec<String> = repeated
                        .bounds
                        .iter()
                        .map(|(a, b)| format!("[{}, {}]", a, b))
                        .collect();
                    writeln!(out, "Bounds: {}", bounds.join(" × "))?;
                }
            }
            if !result.converged() {
                writeln!(out, "Warning: refinement did not converge")?;
            }
            writeln!(out, "Method: {}", result.method())?;
        }
        Solution::Interpolation(result) => {
            writeln!(out, "Interpolating function built")?;
            writeln!(out, "Method: {}", result.method)?;
            if let Some(degree) = result.degree {
                writeln!(out, "Degree: {}", degree)?;
            }
            if let Some(segments) = result.segments {
                writeln!(out, "Segments: {}", segments)?;
            }
            if let Some(x) = context.at {
                writeln!(out, "\nExample evaluation at x={:.2}: {:.6}", x, result.evaluate(x))?;
            }
        }
    }

    Ok(out)
}
