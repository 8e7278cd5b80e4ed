//! Validation shared by every interpolation form.

use std::cmp::Ordering;

use num_traits::Float;

use crate::types::{Point, SolverError};

/// Check the point count and that every x-value is unique.
pub(crate) fn validate_samples<T: Float>(points: &[Point<T>], need: usize) -> Result<(), SolverError> {
    if points.len() < need {
        return Err(SolverError::InsufficientPoints {
            got: points.len(),
            need,
        });
    }

    let mut xs: Vec<T> = points.iter().map(|p| p.x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    if let Some(pair) = xs.windows(2).find(|w| w[0] == w[1]) {
        return Err(SolverError::DuplicateAbscissa {
            x: pair[0].to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

/// Smallest and largest x-value of a non-empty sample set.
pub(crate) fn x_range<T: Float>(xs: &[T]) -> (T, T) {
    xs.iter()
        .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &x| (lo.min(x), hi.max(x)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(xs: &[f64]) -> Vec<Point<f64>> {
        xs.iter().map(|&x| Point::new(x, x * x)).collect()
    }

    #[test]
    fn test_accepts_unique_points() {
        assert!(validate_samples(&points(&[2.0, 0.0, 1.0]), 2).is_ok());
    }

    #[test]
    fn test_insufficient_points() {
        assert_eq!(
            validate_samples(&points(&[1.0]), 2),
            Err(SolverError::InsufficientPoints { got: 1, need: 2 })
        );
    }

    #[test]
    fn test_unsorted_duplicates_detected() {
        assert_eq!(
            validate_samples(&points(&[1.0, 0.0, 1.0]), 2),
            Err(SolverError::DuplicateAbscissa { x: 1.0 })
        );
    }

    #[test]
    fn test_x_range() {
        assert_eq!(x_range(&[3.0, -1.0, 2.0]), (-1.0, 3.0));
    }
}
