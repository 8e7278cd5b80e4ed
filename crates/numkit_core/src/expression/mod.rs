//! Sandboxed arithmetic expressions.
//!
//! Turns user text such as `x**2 + sin(y)` into a [`MathFunction`] of the
//! declared variables. The evaluator walks a parsed tree over a fixed
//! allow-list; no identifier outside it can be expressed, so there is no
//! path to the host environment.
//!
//! ## Syntax
//!
//! - Numbers: `3`, `2.5`, `.5`, `1e-3`
//! - Operators: `+ - * / %` and `**` (or `^`) for powers
//! - Constants: `pi`, `e`, `tau`, `inf`, `nan`
//! - Functions: `sin cos tan asin acos atan atan2 sinh cosh tanh asinh acosh
//!   atanh exp expm1 log log2 log10 log1p sqrt cbrt exp2 fabs floor ceil
//!   trunc pow hypot degrees radians copysign fmod erf erfc gamma lgamma
//!   factorial`
//!
//! A declared variable shadows a constant or function of the same name, so
//! `e` may be used as a variable.
//!
//! `%` is floored (the result takes the sign of the divisor) and `log`
//! accepts an optional base. Arithmetic follows IEEE rules: `1/0` is
//! infinite and domain errors yield NaN.
//!
//! ## Example
//!
//! ```
//! use numkit_core::expression::Expression;
//!
//! let expr = Expression::parse("x**2 + y**2", &["x".into(), "y".into()]).unwrap();
//! assert_eq!(expr.evaluate(&[3.0, 4.0]), 25.0);
//!
//! let f = expr.into_function();
//! assert_eq!(f.arity(), 2);
//! assert_eq!(f.call(&[1.0, 2.0]), 5.0);
//! ```

mod builtins;
mod parser;
mod special;
mod tokenizer;

use std::collections::HashSet;
use std::fmt;

use tracing::trace;

use self::parser::Node;
use crate::types::{ExpressionError, MathFunction};

pub use self::parser::MAX_DEPTH;

/// A parsed expression over named variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    variables: Vec<String>,
    root: Node,
}

impl Expression {
    /// Parse `source` with `variables` bound, in order, to the arguments.
    ///
    /// # Errors
    ///
    /// * `ExpressionError::InvalidVariable` - A name is not an identifier or
    ///   repeats
    /// * Any tokenizer or parser error, including
    ///   `ExpressionError::UnknownIdentifier` for names outside the allow-list
    pub fn parse(source: &str, variables: &[String]) -> Result<Self, ExpressionError> {
        validate_variables(variables)?;
        let tokens = tokenizer::tokenize(source)?;
        let root = parser::parse(&tokens, variables)?;
        trace!(source, tokens = tokens.len(), "expression parsed");

        Ok(Self {
            source: source.to_string(),
            variables: variables.to_vec(),
            root,
        })
    }

    /// Evaluate with `args[i]` bound to the `i`-th variable.
    #[inline]
    pub fn evaluate(&self, args: &[f64]) -> f64 {
        self.root.eval(args)
    }

    /// Number of variables.
    pub fn arity(&self) -> usize {
        self.variables.len()
    }

    /// Declared variable names.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The original text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Wrap as a [`MathFunction`] with one argument per variable.
    pub fn into_function(self) -> MathFunction {
        let arity = self.arity();
        let root = self.root;
        MathFunction::new(arity, move |args| root.eval(args))
    }
}

impl From<Expression> for MathFunction {
    fn from(expression: Expression) -> Self {
        expression.into_function()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate_variables(variables: &[String]) -> Result<(), ExpressionError> {
    let mut seen = HashSet::new();
    for name in variables {
        if !is_identifier(name) || !seen.insert(name.as_str()) {
            return Err(ExpressionError::InvalidVariable(name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_and_evaluate() {
        let expr = Expression::parse("x**2 - 4*x + 4", &vars(&["x"])).unwrap();
        assert_eq!(expr.arity(), 1);
        assert_eq!(expr.evaluate(&[2.0]), 0.0);
        assert_eq!(expr.evaluate(&[5.0]), 9.0);
        assert_eq!(expr.source(), "x**2 - 4*x + 4");
        assert_eq!(expr.to_string(), "x**2 - 4*x + 4");
    }

    #[test]
    fn test_constants_and_functions() {
        let expr = Expression::parse("sin(pi / 2) + log(e) + cos(0)", &[]).unwrap();
        assert_relative_eq!(expr.evaluate(&[]), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ode_style_expression() {
        let expr = Expression::parse("x + y", &vars(&["x", "y"])).unwrap();
        let f = expr.into_function();
        assert_eq!(f.arity(), 2);
        assert_eq!(f.call2(1.0, 2.0), 3.0);
    }

    #[test]
    fn test_variable_order_defines_arguments() {
        let expr = Expression::parse("a / b", &vars(&["b", "a"])).unwrap();
        assert_eq!(expr.evaluate(&[2.0, 8.0]), 4.0);
    }

    #[test]
    fn test_rejects_names_outside_allow_list() {
        for source in ["open(1)", "os", "__builtins__", "exec(x)", "x.real"] {
            assert!(
                Expression::parse(source, &vars(&["x"])).is_err(),
                "{} should be rejected",
                source
            );
        }
    }

    #[test]
    fn test_invalid_variables() {
        assert_eq!(
            Expression::parse("1", &vars(&["x", "x"])),
            Err(ExpressionError::InvalidVariable("x".to_string()))
        );
        assert_eq!(
            Expression::parse("1", &vars(&["2x"])),
            Err(ExpressionError::InvalidVariable("2x".to_string()))
        );
        assert_eq!(
            Expression::parse("1", &vars(&[""])),
            Err(ExpressionError::InvalidVariable(String::new()))
        );
    }

    #[test]
    fn test_variables_shadow_builtins() {
        let expr = Expression::parse("e * 2 + pi", &vars(&["e"])).unwrap();
        assert_relative_eq!(expr.evaluate(&[1.5]), 3.0 + std::f64::consts::PI, epsilon = 1e-12);

        let expr = Expression::parse("gamma + 1", &vars(&["gamma"])).unwrap();
        assert_eq!(expr.evaluate(&[2.0]), 3.0);
    }

    #[test]
    fn test_special_functions_are_allowed() {
        let expr = Expression::parse("erf(x) + gamma(x) + lgamma(x) + cbrt(8) + exp2(x) + factorial(3)", &vars(&["x"])).unwrap();
        assert!(expr.evaluate(&[1.0]).is_finite());
        assert_relative_eq!(
            Expression::parse("factorial(4) / gamma(5)", &[]).unwrap().evaluate(&[]),
            1.0,
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_long_sum_evaluates_without_overflow() {
        let source = vec!["x"; 50_000].join("+");
        let expr = Expression::parse(&source, &vars(&["x"])).unwrap();
        assert_eq!(expr.evaluate(&[1.0]), 50_000.0);
    }

    #[test]
    fn test_function_is_shareable_across_threads() {
        let f = Expression::parse("x * 2", &vars(&["x"])).unwrap().into_function();
        let handle = std::thread::spawn(move || f.call1(21.0));
        assert_eq!(handle.join().unwrap(), 42.0);
    }
}
