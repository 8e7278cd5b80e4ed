//! Parsing of numeric command-line arguments
//!
//! Lists accept commas or whitespace between entries; rows are separated by
//! `;` or newlines, so `"2 1; 1 3"` is a 2×2 matrix.

use crate::{CliError, Result};

fn number(token: &str) -> Result<f64> {
    token
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("'{}' is not a number", token)))
}

/// Parse `"1, 2 3"` into `[1.0, 2.0, 3.0]`.
pub fn parse_list(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(number)
        .collect()
}

/// Parse rows separated by `;` or newlines.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<f64>>> {
    text.split(|c: char| c == ';' || c == '\n')
        .filter(|row| !row.trim().is_empty())
        .map(parse_list)
        .collect()
}

/// Parse `"x y"` sample rows.
pub fn parse_points(text: &str) -> Result<Vec<(f64, f64)>> {
    parse_rows(text)?
        .into_iter()
        .map(|row| match row.as_slice() {
            [x, y] => Ok((*x, *y)),
            _ => Err(CliError::InvalidArgument(format!(
                "point needs exactly two values, got {}",
                row.len()
            ))),
        })
        .collect()
}

/// Parse an `a:b` bound pair.
pub fn parse_bounds(text: &str) -> Result<(f64, f64)> {
    let (lower, upper) = text.split_once(':').ok_or_else(|| {
        CliError::InvalidArgument(format!("bounds '{}' must have the form a:b", text))
    })?;
    Ok((number(lower.trim())?, number(upper.trim())?))
}

/// Parse comma-separated variable names.
pub fn parse_names(text: &str) -> Vec<String> {
    text.split(',').map(|name| name.trim().to_string()).collect()
}
