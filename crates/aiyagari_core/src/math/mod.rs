//! Numerical building blocks shared by the household, distribution and
//! equilibrium solvers.
//!
//! - [`solvers`]: Brent's bracketing root finder
//! - [`interpolators`]: piecewise linear interpolation
//! - [`grid`]: power-spaced asset grids and lottery brackets
//! - [`markov`]: finite-state Markov chains
//! - [`stats`]: NaN-aware reductions used by the accuracy diagnostics

pub mod grid;
pub mod interpolators;
pub mod markov;
pub mod solvers;
pub mod stats;
