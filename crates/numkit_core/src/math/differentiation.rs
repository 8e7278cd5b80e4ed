//! Finite-difference derivatives of multivariate functions.
//!
//! All estimates use central differences with a fixed absolute step:
//!
//! ```text
//! ∂f/∂xᵢ    ≈ (f(x + h·eᵢ) - f(x - h·eᵢ)) / 2h
//! ∂²f/∂xᵢ²  ≈ (f(x + h·eᵢ) - 2f(x) + f(x - h·eᵢ)) / h²
//! ∂²f/∂xᵢ∂xⱼ ≈ (f(x+h·eᵢ+h·eⱼ) - f(x+h·eᵢ-h·eⱼ) - f(x-h·eᵢ+h·eⱼ) + f(x-h·eᵢ-h·eⱼ)) / 4h²
//! ```
//!
//! The function is called many times per estimate, in no particular order,
//! so it must be pure.

/// Default finite-difference step.
pub const DEFAULT_STEP: f64 = 1e-6;

/// Central-difference gradient and Hessian estimator.
///
/// # Example
///
/// ```
/// use numkit_core::math::differentiation::NumericDifferentiator;
///
/// let f = |p: &[f64]| p[0] * p[0] + p[1] * p[1];
/// let diff = NumericDifferentiator::default();
///
/// let grad = diff.gradient(&f, &[1.0, 2.0]);
/// assert!((grad[0] - 2.0).abs() < 1e-4);
/// assert!((grad[1] - 4.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDifferentiator {
    step: f64,
}

impl Default for NumericDifferentiator {
    fn default() -> Self {
        Self { step: DEFAULT_STEP }
    }
}

impl NumericDifferentiator {
    /// Create a differentiator with a custom step.
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    /// The finite-difference step `h`.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Gradient of `f` at `point`.
    pub fn gradient<F>(&self, f: &F, point: &[f64]) -> Vec<f64>
    where
        F: Fn(&[f64]) -> f64,
    {
        let h = self.step;
        let mut shifted = point.to_vec();

        (0..point.len())
            .map(|i| {
                shifted[i] = point[i] + h;
                let f_plus = f(&shifted);
                shifted[i] = point[i] - h;
                let f_minus = f(&shifted);
                shifted[i] = point[i];
                (f_plus - f_minus) / (2.0 * h)
            })
            .collect()
    }

    /// Diagonal of the Hessian of `f` at `point`.
    ///
    /// Evaluates `f(point)` once and two shifted points per coordinate.
    pub fn hessian_diagonal<F>(&self, f: &F, point: &[f64]) -> Vec<f64>
    where
        F: Fn(&[f64]) -> f64,
    {
        let h = self.step;
        let f_center = f(point);
        let mut shifted = point.to_vec();

        (0..point.len())
            .map(|i| {
                shifted[i] = point[i] + h;
                let f_plus = f(&shifted);
                shifted[i] = point[i] - h;
                let f_minus = f(&shifted);
                shifted[i] = point[i];
                (f_plus - 2.0 * f_center + f_minus) / (h * h)
            })
            .collect()
    }

    /// Full Hessian of `f` at `point`.
    ///
    /// Diagonal entries use the second difference, off-diagonal entries the
    /// four-point mixed difference. The result is symmetric up to rounding.
    pub fn hessian<F>(&self, f: &F, point: &[f64]) -> Vec<Vec<f64>>
    where
        F: Fn(&[f64]) -> f64,
    {
        let n = point.len();
        let h = self.step;
        let diagonal = self.hessian_diagonal(f, point);
        let mut hessian = vec![vec![0.0; n]; n];
        let mut shifted = point.to_vec();

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    hessian[i][j] = diagonal[i];
                    continue;
                }
                let mut corner = |di: f64, dj: f64| {
                    shifted[i] = point[i] + di;
                    shifted[j] = point[j] + dj;
                    let value = f(&shifted);
                    shifted[i] = point[i];
                    shifted[j] = point[j];
                    value
                };
                let f_pp = corner(h, h);
                let f_pm = corner(h, -h);
                let f_mp = corner(-h, h);
                let f_mm = corner(-h, -h);
                hessian[i][j] = (f_pp - f_pm - f_mp + f_mm) / (4.0 * h * h);
            }
        }

        hessian
    }
}
