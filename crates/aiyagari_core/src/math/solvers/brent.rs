//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Guaranteed to
/// converge for continuous functions with a valid bracket.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Algorithm
///
/// The iterate `b` is the best estimate so far and `c` the contrapoint, so
/// that `f(b)` and `f(c)` always have opposite signs. Each step tries inverse
/// quadratic interpolation (three distinct function values) or the secant
/// step, and falls back to bisection when the interpolated step would leave
/// the bracket or shrink too slowly.
///
/// # Example
///
/// ```
/// use aiyagari_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// Requires that `f(a)` and `f(b)` have opposite signs (a valid bracket);
    /// an endpoint where `f` is exactly zero is returned immediately.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance` or the bracket is narrower than `tolerance`
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::NumericalInstability)` - `f` returned a non-finite value
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    ///
    /// # Example
    ///
    /// ```
    /// use aiyagari_core::math::solvers::{BrentSolver, SolverConfig};
    ///
    /// let solver = BrentSolver::new(SolverConfig::default());
    /// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    /// ```
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let mut a = a;
        let mut b = b;
        let mut fa = checked(f(a), a)?;
        let mut fb = checked(f(b), b)?;

        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        // b is the best estimate: |f(b)| <= |f(a)|
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        let two = T::one() + T::one();
        let three = two + T::one();
        let tol = self.config.tolerance;

        for _ in 0..self.config.max_iterations {
            if fb.abs() < tol {
                return Ok(b);
            }

            let m = (c - b) / two;
            if m.abs() <= tol {
                return Ok(b);
            }

            let mut step = None;
            if e.abs() > tol && fa.abs() > fb.abs() {
                let (p, q) = if fa != fc && fb != fc {
                    // Inverse quadratic interpolation through (a, b, c)
                    let r = fb / fc;
                    let s = fb / fa;
                    let t = fa / fc;
                    (
                        s * (t * (r - t) * (c - b) - (T::one() - r) * (b - a)),
                        (t - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                } else {
                    // Secant through (a, b)
                    let s = fb / fa;
                    ((b - a) * s, T::one() - s)
                };

                if p.abs() < (three * m * q).abs() / two && p.abs() < (e * q).abs() / two {
                    step = Some(p / q);
                }
            }

            match step {
                Some(interpolated) => {
                    e = d;
                    d = interpolated;
                }
                None => {
                    d = m;
                    e = m;
                }
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol {
                b + d
            } else if m > T::zero() {
                b + tol
            } else {
                b - tol
            };
            fb = checked(f(b), b)?;

            // Restore the sign change between b and c
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

fn checked<T: Float>(fx: T, x: T) -> Result<T, SolverError> {
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(SolverError::NumericalInstability(format!(
            "non-finite function value at x = {}",
            x.to_f64().unwrap_or(f64::NAN)
        )))
    }
}
