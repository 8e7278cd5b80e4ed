//! Property-based checks of the solver invariants.

use numkit_core::math::integrators::{IntegrationBounds, Integrator, QuadratureMethod};
use numkit_core::math::interpolators::{InterpolationMethod, Interpolator};
use numkit_core::math::ode::{DifferentialEquationSolver, InitialValueProblem, OdeConfig, OdeMethod};
use numkit_core::math::solvers::LinearSystemSolver;
use numkit_core::traits::MathSolver;
use numkit_core::types::{MathFunction, Point};
use proptest::prelude::*;

/// Strictly diagonally dominant (hence non-singular) system.
fn dominant_system() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>)> {
    (2usize..7).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::collection::vec(-10.0f64..10.0, n), n),
            prop::collection::vec(-10.0f64..10.0, n),
        )
            .prop_map(|(mut matrix, vector)| {
                for (i, row) in matrix.iter_mut().enumerate() {
                    let off_diagonal: f64 = row.iter().map(|v| v.abs()).sum();
                    row[i] += off_diagonal.copysign(row[i]) + 1.0_f64.copysign(row[i]);
                }
                (matrix, vector)
            })
    })
}

/// 2 to 6 samples with distinct integer abscissae in `0..9`.
fn samples() -> impl Strategy<Value = Vec<Point<f64>>> {
    (
        prop::sample::subsequence((0..9).collect::<Vec<i32>>(), 2..=6),
        prop::collection::vec(-5.0f64..5.0, 6),
    )
        .prop_map(|(xs, ys)| {
            xs.iter()
                .zip(ys)
                .map(|(&x, y)| Point::new(x as f64, y))
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_linear_residual((matrix, vector) in dominant_system()) {
        let result = LinearSystemSolver::new(matrix.clone(), vector.clone()).solve(()).unwrap();
        prop_assert!(!result.is_singular);
        let x = result.solution.unwrap();
        for (row, b) in matrix.iter().zip(&vector) {
            let ax: f64 = row.iter().zip(&x).map(|(a, xi)| a * xi).sum();
            prop_assert!((ax - b).abs() < 1e-6, "residual {} for row {:?}", ax - b, row);
        }
    }

    #[test]
    fn test_dependent_rows_are_singular(
        a in prop::collection::vec(-5i32..=5, 3),
        b in prop::collection::vec(-5i32..=5, 3),
        k in prop::sample::select(vec![-3.0, -2.0, -1.0, 1.0, 2.0, 3.0]),
    ) {
        let row_a: Vec<f64> = a.iter().map(|&v| v as f64).collect();
        let row_b: Vec<f64> = b.iter().map(|&v| v as f64).collect();
        let row_c: Vec<f64> = row_a.iter().map(|v| k * v).collect();
        let result = LinearSystemSolver::new(vec![row_a, row_b, row_c], vec![1.0, 2.0, 3.0])
            .solve(())
            .unwrap();
        prop_assert!(result.is_singular);
        prop_assert!(result.solution.is_none());
    }

    #[test]
    fn test_lagrange_newton_agree(points in samples(), t in 0.0f64..1.0) {
        let lagrange = Interpolator::new(points.clone(), InterpolationMethod::Lagrange).solve(()).unwrap();
        let newton = Interpolator::new(points.clone(), InterpolationMethod::Newton).solve(()).unwrap();
        let (lo, hi) = (points[0].x, points[points.len() - 1].x);
        let x = lo + t * (hi - lo);
        let (l, n) = (lagrange.evaluate(x), newton.evaluate(x));
        prop_assert!((l - n).abs() <= 1e-9 * (1.0 + l.abs()), "lagrange {} vs newton {} at {}", l, n, x);
    }

    #[test]
    fn test_interpolants_reproduce_samples(points in samples()) {
        for method in [InterpolationMethod::Lagrange, InterpolationMethod::Newton, InterpolationMethod::Spline] {
            if points.len() < method.min_points() {
                continue;
            }
            let result = Interpolator::new(points.clone(), method).solve(()).unwrap();
            for p in &points {
                let y = result.evaluate(p.x);
                prop_assert!((y - p.y).abs() <= 1e-9 * (1.0 + p.y.abs()), "{:?} at {}: {} vs {}", method, p.x, y, p.y);
            }
        }
    }

    #[test]
    fn test_ode_lands_on_end_point(
        x0 in -5.0f64..5.0,
        length in 0.01f64..10.0,
        step in 0.01f64..1.0,
        rk4 in any::<bool>(),
    ) {
        let method = if rk4 { OdeMethod::Rk4 } else { OdeMethod::Euler };
        let x_end = x0 + length;
        let solver = DifferentialEquationSolver::new(MathFunction::binary(|x, _y| x.cos()), method)
            .with_config(OdeConfig::new(step));
        let solution = solver.solve(InitialValueProblem::new(x0, 0.0, x_end)).unwrap();

        prop_assert_eq!(solution.points[0].x, x0);
        prop_assert_eq!(solution.points[solution.points.len() - 1].x, x_end);
        prop_assert!(solution.points.windows(2).all(|w| w[0].x < w[1].x));
        // Never more steps than the nominal grid needs
        let steps = solution.points.len() - 1;
        prop_assert!(steps as f64 <= (length / step).ceil() + 1.0);
    }

    #[test]
    fn test_trapezoid_exact_for_lines(
        slope in -10.0f64..10.0,
        intercept in -10.0f64..10.0,
        a in -5.0f64..5.0,
        width in 0.1f64..5.0,
    ) {
        let b = a + width;
        let f = MathFunction::unary(move |x| slope * x + intercept);
        let result = Integrator::new(f, QuadratureMethod::Trapezoid)
            .solve(IntegrationBounds::new(a, b))
            .unwrap();
        let exact = slope * (b * b - a * a) / 2.0 + intercept * width;
        prop_assert!(result.converged());
        prop_assert!((result.value() - exact).abs() < 1e-9 * (1.0 + exact.abs()));
    }

    #[test]
    fn test_simpson_exact_for_cubics(
        c in prop::collection::vec(-3.0f64..3.0, 4),
        a in -2.0f64..2.0,
        width in 0.1f64..3.0,
    ) {
        let b = a + width;
        let coeffs = c.clone();
        let f = MathFunction::unary(move |x| coeffs[0] + coeffs[1] * x + coeffs[2] * x * x + coeffs[3] * x * x * x);
        let antiderivative = |x: f64| c[0] * x + c[1] * x * x / 2.0 + c[2] * x.powi(3) / 3.0 + c[3] * x.powi(4) / 4.0;
        let exact = antiderivative(b) - antiderivative(a);
        let result = Integrator::new(f, QuadratureMethod::Simpson)
            .solve(IntegrationBounds::new(a, b))
            .unwrap();
        prop_assert!(result.converged());
        prop_assert!((result.value() - exact).abs() < 1e-9 * (1.0 + exact.abs()));
    }
}
