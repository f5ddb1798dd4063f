//! Interpolation methods for numerical computation.
//!
//! Policy functions are only known on the asset grid; the Euler equation,
//! the density push-forward and the simulation all need them at arbitrary
//! asset levels. Everything here is generic over `T: num_traits::Float`.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points,
//!   with optional flat extrapolation outside the knots
//!
//! ## Core Trait
//!
//! All 1D interpolators implement the [`Interpolator`] trait, which defines:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`: Compute interpolated value
//! - `domain() -> (T, T)`: Return valid interpolation range
//!
//! ## Example
//!
//! ```
//! use aiyagari_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let interp = LinearInterpolator::new(&xs, &ys).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//!
//! let y = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//!
//! // Flat extrapolation beyond the last knot
//! assert_eq!(interp.interpolate_flat(10.0), 9.0);
//! ```

mod linear;
mod traits;

// Re-export public types at module level
pub use linear::LinearInterpolator;
pub use traits::Interpolator;
