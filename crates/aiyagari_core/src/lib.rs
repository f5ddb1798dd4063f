//! # aiyagari_core: Numerical Foundation for the Aiyagari Equilibrium Solver
//!
//! ## Layer 1 (Foundation) Role
//!
//! aiyagari_core is the bottom layer of the workspace, providing:
//! - Bracketing root finding (`math::solvers`)
//! - Piecewise linear interpolation with flat extrapolation (`math::interpolators`)
//! - Power-spaced asset grids (`math::grid`)
//! - Finite Markov chains and their stationary distribution (`math::markov`)
//! - NaN-aware reductions (`math::stats`)
//! - Error types: `SolverError`, `InterpolationError`, `GridError`, `MarkovError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other aiyagari_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - nalgebra: Dense LU factorisation for the Markov stationary distribution
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use aiyagari_core::math::grid::AssetGrid;
//! use aiyagari_core::math::markov::MarkovChain;
//!
//! let grid = AssetGrid::new(0.0, 100.0, 50, 3.0).unwrap();
//! assert_eq!(grid.len(), 50);
//! assert_eq!(grid.max(), 100.0);
//!
//! let chain = MarkovChain::new(
//!     vec![0.5, 1.5],
//!     vec![vec![0.75, 0.25], vec![0.25, 0.75]],
//! )
//! .unwrap();
//! let pi = chain.stationary();
//! assert!((pi[0] - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
