//! Interpolator trait.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation over a fixed set of knots.
pub trait Interpolator<T: Float> {
    /// Interpolate at `x`.
    ///
    /// Returns `InterpolationError::OutOfBounds` when `x` lies outside
    /// [`domain`](Interpolator::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// The closed interval `(x_min, x_max)` covered by the knots.
    fn domain(&self) -> (T, T);
}
