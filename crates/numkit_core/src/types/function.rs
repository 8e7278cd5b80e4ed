//! Opaque callable used by the function-driven solvers.

use std::fmt;
use std::sync::Arc;

use super::SolverError;

type Callable = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// A real-valued function of a fixed number of real arguments.
///
/// Solvers never inspect the function beyond its declared arity; the
/// closure is shared (not copied) across clones. Because gradient, Hessian
/// and Monte Carlo bound estimation call it many times and in arbitrary
/// order, the closure must be free of side effects.
///
/// # Example
///
/// ```
/// use numkit_core::types::MathFunction;
///
/// let f = MathFunction::binary(|x, y| x * x + y * y);
/// assert_eq!(f.arity(), 2);
/// assert_eq!(f.call(&[3.0, 4.0]), 25.0);
/// ```
#[derive(Clone)]
pub struct MathFunction {
    arity: usize,
    inner: Arc<Callable>,
}

impl MathFunction {
    /// Wrap a slice-taking closure with an explicit arity.
    pub fn new<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            arity,
            inner: Arc::new(f),
        }
    }

    /// Wrap a function of one variable.
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(1, move |args| f(arg(args, 0)))
    }

    /// Wrap a function of two variables, e.g. `dy/dx = f(x, y)`.
    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(2, move |args| f(arg(args, 0), arg(args, 1)))
    }

    /// Number of arguments the function expects.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Evaluate the function. Missing arguments read as NaN.
    #[inline]
    pub fn call(&self, args: &[f64]) -> f64 {
        (self.inner)(args)
    }

    /// Evaluate a function of one variable.
    #[inline]
    pub fn call1(&self, x: f64) -> f64 {
        (self.inner)(&[x])
    }

    /// Evaluate a function of two variables.
    #[inline]
    pub fn call2(&self, x: f64, y: f64) -> f64 {
        (self.inner)(&[x, y])
    }

    /// Fail with [`SolverError::NotCallable`] unless the arity is `expected`.
    pub fn ensure_arity(&self, expected: usize) -> Result<(), SolverError> {
        if self.arity == expected {
            Ok(())
        } else {
            Err(SolverError::NotCallable {
                expected,
                arity: self.arity,
            })
        }
    }
}

impl fmt::Debug for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MathFunction")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

#[inline]
fn arg(args: &[f64], index: usize) -> f64 {
    args.get(index).copied().unwrap_or(f64::NAN)
}
