//! # aiyagari_solver: Stationary Equilibrium of the Aiyagari Economy
//!
//! ## Layer 3 (Solver) Role
//!
//! aiyagari_solver ties the numerical foundation (L1, `aiyagari_core`) and
//! the model primitives (L2, `aiyagari_models`) into the full solution:
//!
//! - `config`: serde-backed run configuration with defaults and validation
//! - `economy`: grids, income chain and primitives built from a config
//! - `household`: policy-function iteration on the Euler equation
//! - `distribution`: discrete, eigenvector and Monte Carlo stationary
//!   distribution engines behind one trait
//! - `equilibrium`: damped fixed point on the interest rate, capital
//!   market schedule, complete-markets benchmark
//! - `diagnostics`: Euler equation errors on the fine grid and the panel
//! - `error`: stage error types
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use aiyagari_solver::prelude::*;
//!
//! let mut config = EconomyConfig::default();
//! config.distribution.method = DistributionMethod::Eigenvector;
//! let economy = Economy::new(config)?;
//!
//! let equilibrium = EquilibriumSolver::new(&economy).solve()?;
//! println!("r* = {:.4}, K* = {:.3}", equilibrium.rate(), equilibrium.capital());
//!
//! let errors = full_grid_euler_errors(&economy, &equilibrium.policy)?;
//! println!("max log10 Euler error = {:.2}", errors.summary().max);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Parallelism
//!
//! Household sweeps, Monte Carlo agent updates and full-grid diagnostics run
//! on the global rayon pool. Results do not depend on the number of threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod diagnostics;
pub mod distribution;
pub mod economy;
pub mod equilibrium;
pub mod error;
pub mod household;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{DampingRule, DistributionMethod, EconomyConfig};
    pub use crate::diagnostics::{full_grid_euler_errors, simulation_euler_errors, ErrorSummary, EulerErrors};
    pub use crate::distribution::{
        DiscreteIteration, DistributionEngine, EigenvectorMethod, MonteCarloSimulation, StationaryDensity,
        StationaryDistribution, StationaryOutcome,
    };
    pub use crate::economy::Economy;
    pub use crate::equilibrium::{capital_schedule, default_rates, Equilibrium, EquilibriumSolver, SchedulePoint};
    pub use crate::error::{ConfigError, DistributionError, HouseholdError, SolveError};
    pub use crate::household::{HouseholdSolver, Policy};
}
