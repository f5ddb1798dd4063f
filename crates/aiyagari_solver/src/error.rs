//! Error types for the solver layer.
//!
//! This module provides:
//! - `ConfigError`: invalid configuration, detected before any computation
//! - `HouseholdError`: failures of policy-function iteration
//! - `DistributionError`: failures of the stationary distribution engines
//! - `SolveError`: umbrella error for a full equilibrium run

use aiyagari_core::types::{GridError, InterpolationError, MarkovError, SolverError};
use aiyagari_models::ModelError;
use thiserror::Error;

/// Configuration errors.
///
/// # Examples
/// ```
/// use aiyagari_solver::error::ConfigError;
///
/// let err = ConfigError::Validation(vec!["a".to_string(), "b".to_string()]);
/// assert_eq!(err.to_string(), "Validation errors: a; b");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// One or more fields are out of range.
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Unknown stationary distribution method name.
    #[error("Unknown distribution method '{0}'. Choose 'discrete', 'eigenvector' or 'monte carlo'")]
    UnknownMethod(String),

    /// Unknown damping rule name.
    #[error("Unknown damping rule '{0}'. Choose 'adaptive' or 'fixed'")]
    UnknownDampingRule(String),

    /// Preference or technology parameters rejected.
    #[error("Model parameters: {0}")]
    Model(#[from] ModelError),

    /// Asset grid could not be built.
    #[error("Asset grid: {0}")]
    Grid(#[from] GridError),

    /// Income process rejected.
    #[error("Income process: {0}")]
    Markov(#[from] MarkovError),
}

/// Household problem errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HouseholdError {
    /// The Euler residual does not change sign on `[a_min, cash on hand]`.
    #[error("Euler equation has no interior root at income state {state}, assets {assets}: {source}")]
    NoInteriorRoot {
        /// Income state index
        state: usize,
        /// Current asset level
        assets: f64,
        /// Underlying root-finder failure
        source: SolverError,
    },

    /// The root finder failed inside a valid bracket.
    #[error("Euler root search failed at income state {state}, assets {assets}: {source}")]
    RootFinder {
        /// Income state index
        state: usize,
        /// Current asset level
        assets: f64,
        /// Underlying root-finder failure
        source: SolverError,
    },

    /// Savings policy still moving after the iteration cap.
    #[error("No policy function convergence after {iterations} iterations (sup-norm change {distance:e})")]
    NotConverged {
        /// Sweeps performed
        iterations: usize,
        /// Last sup-norm change
        distance: f64,
    },

    /// Policy table could not be interpolated.
    #[error("Policy interpolation: {0}")]
    Interpolation(#[from] InterpolationError),
}

/// Stationary distribution errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DistributionError {
    /// Forward iteration did not settle.
    #[error("No density function convergence after {iterations} iterations (sup-norm change {distance:e})")]
    NotConverged {
        /// Sweeps performed
        iterations: usize,
        /// Last sup-norm change
        distance: f64,
    },

    /// A row of the joint transition matrix does not sum to one.
    #[error("Transition matrix row {row} sums to {sum}, expected 1")]
    TransitionRowSum {
        /// Row index
        row: usize,
        /// Row sum
        sum: f64,
    },

    /// The eigenvalue selected as the unit eigenvalue is not real.
    #[error("Stationary eigenvector is complex: eigenvalue {re} + {im}i")]
    ComplexEigenvector {
        /// Real part of the selected eigenvalue
        re: f64,
        /// Imaginary part of the selected eigenvalue
        im: f64,
    },

    /// The eigenvector could not be extracted or normalised.
    #[error("Eigenvector extraction failed: {0}")]
    Eigen(String),

    /// Too many simulated agents hit the top of the asset grid.
    #[error("{share:.4} of simulated observations reach the top of the asset grid (limit {limit}); increase the asset grid maximum")]
    GridTooSmall {
        /// Share of post-burn-in observations at the edge
        share: f64,
        /// Permitted share
        limit: f64,
    },

    /// Monte Carlo panel dimensions cannot produce any observations.
    #[error("Invalid Monte Carlo panel: {0}")]
    InvalidPanel(String),

    /// An explicit initial density does not match the grid or is not a density.
    #[error("Invalid initial density: {0}")]
    InvalidInitialDensity(String),

    /// Savings policy could not be interpolated.
    #[error("Policy interpolation: {0}")]
    Interpolation(#[from] InterpolationError),
}

/// Errors of a full equilibrium run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SolveError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Household problem failed.
    #[error(transparent)]
    Household(#[from] HouseholdError),

    /// Distribution engine failed.
    #[error(transparent)]
    Distribution(#[from] DistributionError),

    /// The interest rate guess violates `(1 + r) β < 1`.
    #[error("Interest rate {rate} violates (1 + r)β < 1 ((1 + r)β = {patience})")]
    UnstableRate {
        /// Offending rate
        rate: f64,
        /// `(1 + r) β`
        patience: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_household_error_mentions_root() {
        let err = HouseholdError::NoInteriorRoot {
            state: 1,
            assets: 2.5,
            source: SolverError::NoBracket { a: 0.0, b: 3.0 },
        };
        let msg = err.to_string();
        assert!(msg.contains("no interior root"));
        assert!(msg.contains("income state 1"));
    }

    #[test]
    fn test_grid_too_small_message() {
        let err = DistributionError::GridTooSmall {
            share: 0.05,
            limit: 0.01,
        };
        assert!(err.to_string().contains("increase the asset grid maximum"));
    }

    #[test]
    fn test_umbrella_conversions() {
        let err: SolveError = HouseholdError::NotConverged {
            iterations: 2000,
            distance: 1e-3,
        }
        .into();
        assert!(err.to_string().contains("No policy function convergence"));

        let err: SolveError = ConfigError::from(ModelError::InvalidDiscountFactor { beta: 2.0 }).into();
        assert!(matches!(err, SolveError::Config(ConfigError::Model(_))));
    }
}
