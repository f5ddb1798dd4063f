//! Power-spaced asset grids.
//!
//! Savings policies bend sharply near the borrowing limit and are almost
//! linear for rich households, so grid points are concentrated at the bottom:
//!
//! ```text
//! grid[i] = min + (max - min) * (i / (n - 1))^curvature,   0 < i < n - 1
//! ```
//!
//! with both endpoints set exactly. A curvature of 1 gives a uniform grid.

use crate::types::GridError;

/// Build a power-spaced grid of `n` points on `[min, max]`.
///
/// # Errors
///
/// - `GridError::TooFewPoints` when `n < 2`
/// - `GridError::InvalidBounds` when `max <= min` or a bound is not finite
/// - `GridError::InvalidCurvature` when `curvature` is not positive and finite
/// - `GridError::Collapsed` when adjacent points coincide in floating point
///
/// # Example
///
/// ```
/// use aiyagari_core::math::grid::make_grid;
///
/// let grid = make_grid(0.0, 1.0, 3, 2.0).unwrap();
/// assert_eq!(grid, vec![0.0, 0.25, 1.0]);
/// ```
pub fn make_grid(min: f64, max: f64, n: usize, curvature: f64) -> Result<Vec<f64>, GridError> {
    if n < 2 {
        return Err(GridError::TooFewPoints { got: n });
    }
    if !(min.is_finite() && max.is_finite()) || max <= min {
        return Err(GridError::InvalidBounds { min, max });
    }
    if !curvature.is_finite() || curvature <= 0.0 {
        return Err(GridError::InvalidCurvature(curvature));
    }

    let scale = max - min;
    let last = (n - 1) as f64;
    let mut grid: Vec<f64> = (0..n)
        .map(|i| min + scale * (i as f64 / last).powf(curvature))
        .collect();
    grid[0] = min;
    grid[n - 1] = max;

    if let Some(index) = grid.windows(2).position(|w| w[1] <= w[0]) {
        return Err(GridError::Collapsed { index });
    }

    Ok(grid)
}

/// Where an off-grid asset level lands on a grid.
///
/// Mass sitting at `x` is split between `lower` and `upper` with weight
/// `upper_weight` on `upper`. Points at or beyond either edge put all mass on
/// that edge (`lower == upper`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lottery {
    /// Index of the grid point at or below `x`
    pub lower: usize,
    /// Index of the grid point above `x`
    pub upper: usize,
    /// Share of mass assigned to `upper`, in `[0, 1]`
    pub upper_weight: f64,
}

impl Lottery {
    /// Share of mass assigned to `lower`.
    #[inline]
    pub fn lower_weight(&self) -> f64 {
        1.0 - self.upper_weight
    }
}

/// Immutable, strictly increasing asset grid.
///
/// # Example
///
/// ```
/// use aiyagari_core::math::grid::AssetGrid;
///
/// let grid = AssetGrid::new(0.0, 10.0, 11, 1.0).unwrap();
/// let lottery = grid.lottery(2.25);
/// assert_eq!((lottery.lower, lottery.upper), (2, 3));
/// assert!((lottery.upper_weight - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AssetGrid {
    points: Vec<f64>,
    curvature: f64,
}

impl AssetGrid {
    /// Build a grid with [`make_grid`].
    pub fn new(min: f64, max: f64, n: usize, curvature: f64) -> Result<Self, GridError> {
        Ok(Self {
            points: make_grid(min, max, n, curvature)?,
            curvature,
        })
    }

    /// Grid points in increasing order.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of grid points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First grid point (the borrowing limit for savings grids).
    #[inline]
    pub fn min(&self) -> f64 {
        self.points[0]
    }

    /// Last grid point.
    #[inline]
    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Curvature the grid was built with.
    #[inline]
    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    /// Same bounds and curvature with `n` points.
    pub fn resized(&self, n: usize) -> Result<Self, GridError> {
        Self::new(self.min(), self.max(), n, self.curvature)
    }

    /// Linear lottery of `x` over the two neighbouring grid points.
    pub fn lottery(&self, x: f64) -> Lottery {
        let n = self.points.len();
        if x <= self.points[0] {
            return Lottery {
                lower: 0,
                upper: 0,
                upper_weight: 0.0,
            };
        }
        if x >= self.points[n - 1] {
            return Lottery {
                lower: n - 1,
                upper: n - 1,
                upper_weight: 1.0,
            };
        }

        // points[upper - 1] <= x < points[upper]
        let upper = self.points.partition_point(|&p| p <= x);
        let lower = upper - 1;
        let upper_weight =
            (x - self.points[lower]) / (self.points[upper] - self.points[lower]);

        Lottery {
            lower,
            upper,
            upper_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints_are_exact() {
        let grid = make_grid(-2.0, 100.0, 200, 3.0).unwrap();
        assert_eq!(grid.len(), 200);
        assert_eq!(grid[0], -2.0);
        assert_eq!(grid[199], 100.0);
    }

    #[test]
    fn test_power_spacing() {
        let grid = make_grid(0.0, 100.0, 5, 3.0).unwrap();
        assert_relative_eq!(grid[1], 100.0 * 0.25_f64.powi(3), epsilon = 1e-12);
        assert_relative_eq!(grid[2], 100.0 * 0.5_f64.powi(3), epsilon = 1e-12);
    }

    #[test]
    fn test_unit_curvature_is_uniform() {
        let grid = make_grid(1.0, 3.0, 5, 1.0).unwrap();
        assert_eq!(grid, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn test_two_points() {
        assert_eq!(make_grid(0.0, 1.0, 2, 3.0).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(
            make_grid(0.0, 1.0, 1, 1.0),
            Err(GridError::TooFewPoints { got: 1 })
        );
        assert!(matches!(
            make_grid(1.0, 1.0, 10, 1.0),
            Err(GridError::InvalidBounds { .. })
        ));
        assert!(matches!(
            make_grid(0.0, f64::INFINITY, 10, 1.0),
            Err(GridError::InvalidBounds { .. })
        ));
        assert_eq!(
            make_grid(0.0, 1.0, 10, 0.0),
            Err(GridError::InvalidCurvature(0.0))
        );
    }

    #[test]
    fn test_lottery_inside() {
        let grid = AssetGrid::new(0.0, 4.0, 5, 1.0).unwrap();
        let lottery = grid.lottery(1.75);
        assert_eq!(lottery.lower, 1);
        assert_eq!(lottery.upper, 2);
        assert_relative_eq!(lottery.upper_weight, 0.75, epsilon = 1e-12);
        assert_relative_eq!(lottery.lower_weight(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_lottery_on_interior_knot() {
        let grid = AssetGrid::new(0.0, 4.0, 5, 1.0).unwrap();
        let lottery = grid.lottery(2.0);
        assert_eq!((lottery.lower, lottery.upper), (2, 3));
        assert_eq!(lottery.upper_weight, 0.0);
    }

    #[test]
    fn test_lottery_edges() {
        let grid = AssetGrid::new(0.0, 4.0, 5, 1.0).unwrap();

        let below = grid.lottery(-1.0);
        assert_eq!((below.lower, below.upper), (0, 0));
        assert_eq!(below.lower_weight(), 1.0);

        let at_min = grid.lottery(0.0);
        assert_eq!((at_min.lower, at_min.upper), (0, 0));

        let above = grid.lottery(10.0);
        assert_eq!((above.lower, above.upper), (4, 4));
        assert_eq!(above.upper_weight, 1.0);
    }

    #[test]
    fn test_resized_keeps_bounds() {
        let grid = AssetGrid::new(0.0, 50.0, 20, 2.0).unwrap();
        let fine = grid.resized(60).unwrap();
        assert_eq!(fine.len(), 60);
        assert_eq!(fine.min(), grid.min());
        assert_eq!(fine.max(), grid.max());
        assert_eq!(fine.curvature(), 2.0);
    }
}
