//! Forward iteration on a discretised density.
//!
//! Mass at each fine-grid cell moves to the savings choice of that cell,
//! split linearly between the two bracketing fine-grid points, and across
//! next-period income states with the transition matrix. Sweeps repeat
//! until the sup-norm change falls below the tolerance.

use super::lottery::{policy_lotteries, push_forward};
use super::StationaryDensity;
use crate::config::DistributionConfig;
use crate::economy::Economy;
use crate::error::DistributionError;
use crate::household::Policy;
use aiyagari_core::math::stats::sup_norm_distance;
use std::time::Instant;
use tracing::{debug, trace};

/// Discrete forward-iteration engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteIteration {
    tolerance: f64,
    max_iterations: usize,
}

impl Default for DiscreteIteration {
    fn default() -> Self {
        Self::from_config(&DistributionConfig::default())
    }
}

impl DiscreteIteration {
    /// Engine with explicit tolerance and sweep cap.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Engine using the configured tolerance and cap.
    pub fn from_config(config: &DistributionConfig) -> Self {
        Self::new(config.tolerance, config.max_iterations)
    }

    /// Stationary density starting from the uniform guess weighted by the
    /// stationary income distribution.
    pub fn solve(&self, economy: &Economy, policy: &Policy) -> Result<StationaryDensity, DistributionError> {
        self.iterate_from(economy, policy, None)
    }

    /// Stationary density starting from `initial` when given.
    ///
    /// # Errors
    ///
    /// - `DistributionError::InvalidInitialDensity` if `initial` has the
    ///   wrong shape, negative or non-finite mass, or zero total mass
    /// - `DistributionError::NotConverged` after the sweep cap
    pub fn iterate_from(
        &self,
        economy: &Economy,
        policy: &Policy,
        initial: Option<&StationaryDensity>,
    ) -> Result<StationaryDensity, DistributionError> {
        let start = Instant::now();
        let n_fine = economy.fine_grid().len();
        let n_states = economy.income().n_states();

        let mut current = match initial {
            Some(density) => checked_initial(density, economy.n_cells())?,
            None => economy
                .income()
                .stationary()
                .iter()
                .flat_map(|p| std::iter::repeat(p / n_fine as f64).take(n_fine))
                .collect(),
        };
        let mut next = vec![0.0; current.len()];

        let rule = policy.savings_rule()?;
        let lotteries = policy_lotteries(economy, &rule);
        let mut distance = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            push_forward(economy, &lotteries, &current, &mut next);
            distance = sup_norm_distance(&next, &current);
            std::mem::swap(&mut current, &mut next);
            trace!(iteration, distance, "density sweep");

            if distance < self.tolerance {
                debug!(
                    iterations = iteration,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "discrete density converged"
                );
                return Ok(StationaryDensity::new(
                    economy.fine_grid().points().to_vec(),
                    n_states,
                    current,
                    iteration,
                ));
            }
        }

        Err(DistributionError::NotConverged {
            iterations: self.max_iterations,
            distance,
        })
    }
}

fn checked_initial(density: &StationaryDensity, n_cells: usize) -> Result<Vec<f64>, DistributionError> {
    let mass = density.mass();
    if mass.len() != n_cells {
        return Err(DistributionError::InvalidInitialDensity(format!(
            "expected {} cells, got {}",
            n_cells,
            mass.len()
        )));
    }
    if let Some(m) = mass.iter().find(|m| !(m.is_finite() && **m >= 0.0)) {
        return Err(DistributionError::InvalidInitialDensity(format!(
            "mass must be non-negative and finite, found {}",
            m
        )));
    }
    let total: f64 = mass.iter().sum();
    if total <= 0.0 {
        return Err(DistributionError::InvalidInitialDensity(
            "total mass is zero".to_string(),
        ));
    }
    Ok(mass.iter().map(|m| m / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;
    use crate::household::HouseholdSolver;

    fn solved() -> (Economy, Policy) {
        let mut config = EconomyConfig::default();
        config.grid.points = 60;
        config.grid.max_assets = 60.0;
        let economy = Economy::new(config).unwrap();
        let policy = HouseholdSolver::new(&economy)
            .solve(economy.prices(0.03))
            .unwrap();
        (economy, policy)
    }

    #[test]
    fn test_density_is_normalised() {
        let (economy, policy) = solved();
        let density = DiscreteIteration::default().solve(&economy, &policy).unwrap();
        assert!((density.total() - 1.0).abs() < 1e-10);
        assert!(density.mass().iter().all(|m| *m >= 0.0));
        assert_eq!(density.mass().len(), economy.n_cells());
    }

    #[test]
    fn test_income_marginal_matches_markov_chain() {
        let (economy, policy) = solved();
        let density = DiscreteIteration::default().solve(&economy, &policy).unwrap();
        let marginal = density.income_marginal();
        for (got, want) in marginal.iter().zip(economy.income().stationary()) {
            assert!((got - want).abs() < 1e-8);
        }
    }

    #[test]
    fn test_restart_from_converged_density_takes_one_sweep() {
        let (economy, policy) = solved();
        let engine = DiscreteIteration::default();
        let density = engine.solve(&economy, &policy).unwrap();
        let restarted = engine.iterate_from(&economy, &policy, Some(&density)).unwrap();
        assert_eq!(restarted.iterations(), 1);
        assert!((restarted.aggregate_capital() - density.aggregate_capital()).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_mismatched_initial_density() {
        let (economy, policy) = solved();
        let bogus = StationaryDensity::new(vec![0.0, 1.0], 1, vec![0.5, 0.5], 0);
        let result = DiscreteIteration::default().iterate_from(&economy, &policy, Some(&bogus));
        assert!(matches!(result, Err(DistributionError::InvalidInitialDensity(_))));
    }

    #[test]
    fn test_sweep_cap_is_fatal() {
        let (economy, policy) = solved();
        let result = DiscreteIteration::new(1e-6, 2).solve(&economy, &policy);
        assert!(matches!(
            result,
            Err(DistributionError::NotConverged { iterations: 2, .. })
        ));
    }
}
