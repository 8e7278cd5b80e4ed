//! Ordered (x, y) pair.

use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A point in the plane.
///
/// Used for interpolation samples and ODE trajectories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<T> {
    /// Abscissa
    pub x: T,
    /// Ordinate
    pub y: T,
}

impl<T: Float> Point<T> {
    /// Create a new point.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Float> From<(T, T)> for Point<T> {
    #[inline]
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T: Float> From<Point<T>> for (T, T) {
    #[inline]
    fn from(p: Point<T>) -> Self {
        (p.x, p.y)
    }
}
