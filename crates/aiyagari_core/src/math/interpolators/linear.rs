//! Linear interpolation implementation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;
use std::cmp::Ordering;

/// Piecewise linear interpolator.
///
/// Stores strictly increasing knots `xs` with values `ys`. Inside the knot
/// range the value is the usual linear blend of the two neighbouring knots;
/// [`interpolate_flat`](LinearInterpolator::interpolate_flat) additionally
/// extends the first and last values flat outside the range, which is how
/// policy functions are evaluated off the asset grid.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use aiyagari_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 3.0));
/// assert_eq!(interp.interpolate_flat(-1.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    /// Strictly increasing x-coordinates
    xs: Vec<T>,
    /// Corresponding y-values
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct a linear interpolator from x and y data points.
    ///
    /// # Returns
    ///
    /// * `Ok(LinearInterpolator)` - Successfully constructed interpolator
    /// * `Err(InterpolationError::InvalidInput)` - Mismatched array lengths
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 2 data points
    /// * `Err(InterpolationError::NonMonotonicData)` - `xs` not strictly increasing
    ///
    /// # Example
    ///
    /// ```
    /// use aiyagari_core::math::interpolators::LinearInterpolator;
    ///
    /// assert!(LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).is_ok());
    /// assert!(LinearInterpolator::new(&[0.0], &[0.0]).is_err());
    /// assert!(LinearInterpolator::new(&[1.0, 0.0], &[0.0, 1.0]).is_err());
    /// ```
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        if let Some(index) = xs
            .windows(2)
            .position(|w| w[1].partial_cmp(&w[0]) != Some(Ordering::Greater))
        {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Returns a reference to the x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns a reference to the y-values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the interpolator has no data points.
    /// Note: This should never be true for a valid interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Interpolate with flat extrapolation.
    ///
    /// Queries below the first knot return the first value, queries above the
    /// last knot return the last value. Never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use aiyagari_core::math::interpolators::LinearInterpolator;
    ///
    /// let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0], &[1.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(interp.interpolate_flat(-5.0), 1.0);
    /// assert_eq!(interp.interpolate_flat(0.5), 2.0);
    /// assert_eq!(interp.interpolate_flat(7.0), 4.0);
    /// ```
    #[inline]
    pub fn interpolate_flat(&self, x: T) -> T {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        self.blend(self.find_segment(x), x)
    }

    /// Find the segment index for interpolation using binary search.
    ///
    /// Returns the index `i` such that `xs[i] <= x < xs[i+1]`,
    /// clamped to valid segment range [0, n-2].
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);

        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }

    #[inline]
    fn blend(&self, i: usize, x: T) -> T {
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        y0 + (y1 - y0) * ((x - x0) / (x1 - x0))
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// Interpolate value at point `x` using piecewise linear interpolation.
    ///
    /// # Formula
    ///
    /// ```text
    /// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    /// ```
    ///
    /// # Example
    ///
    /// ```
    /// use aiyagari_core::math::interpolators::{Interpolator, LinearInterpolator};
    ///
    /// let interp = LinearInterpolator::<f64>::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
    /// assert!((interp.interpolate(0.5).unwrap() - 1.0).abs() < 1e-10);
    /// assert!(interp.interpolate(2.5).is_err());
    /// ```
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();

        if x < x_min || x > x_max {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(self.blend(self.find_segment(x), x))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
