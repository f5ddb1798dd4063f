//! Root-finding solvers for numerical computation.
//!
//! The household problem reduces, at every grid point, to locating the zero
//! of an Euler-equation residual on a known bracket `[a_min, cash_on_hand]`.
//! A derivative-free bracketing method is the right tool: the residual is
//! monotone but steep near zero consumption, where Newton steps overshoot.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use aiyagari_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = BrentSolver::new(SolverConfig::default());
//!
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;
mod config;

// Re-export public types at module level
pub use brent::BrentSolver;
pub use config::SolverConfig;
