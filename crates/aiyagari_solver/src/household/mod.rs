//! Household problem: policy-function iteration on the Euler equation.
//!
//! Given prices `(r, w)` the savings policy `a'(z, a)` solves
//!
//! ```text
//! u'(c) = (1 + r) β Σ_j P[z][j] u'(c'_j),   c = (1 + r) a + w z - a',   a' >= a_min
//! ```
//!
//! Each sweep holds the previous policy fixed (interpolated off-grid with
//! flat extrapolation), checks the borrowing constraint at every grid point
//! and otherwise finds the interior root with Brent's method. Sweeps run in
//! parallel over grid points and alternate between two buffers.

mod policy;

pub use policy::{Policy, SavingsRule};

use crate::economy::Economy;
use crate::error::HouseholdError;
use aiyagari_core::math::markov::MarkovChain;
use aiyagari_core::math::solvers::{BrentSolver, SolverConfig};
use aiyagari_core::math::stats::sup_norm_distance;
use aiyagari_core::types::SolverError;
use aiyagari_models::{Crra, Prices};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, trace};

/// Expected marginal utility next period, `Σ_j P[z][j] u'(c'_j)`, for an
/// agent in state `z` carrying `next_assets` forward under `rule`.
pub fn expected_marginal_utility(
    preferences: &Crra,
    income: &MarkovChain,
    prices: &Prices,
    rule: &SavingsRule,
    z: usize,
    next_assets: f64,
) -> f64 {
    income
        .row(z)
        .iter()
        .enumerate()
        .map(|(j, p)| {
            let next_consumption = prices.cash_on_hand(next_assets, income.value(j))
                - rule.next_assets(j, next_assets);
            p * preferences.marginal_utility(next_consumption)
        })
        .sum()
}

/// Euler residual `u'(cash - a') - (1 + r) β E[u'(c')]`.
///
/// Decreasing in the candidate `next_assets`; a non-negative value at the
/// borrowing limit means the constraint binds.
pub fn euler_residual(
    preferences: &Crra,
    income: &MarkovChain,
    prices: &Prices,
    rule: &SavingsRule,
    z: usize,
    cash: f64,
    next_assets: f64,
) -> f64 {
    preferences.marginal_utility(cash - next_assets)
        - preferences.gross_patience(prices.rate)
            * expected_marginal_utility(preferences, income, prices, rule, z, next_assets)
}

/// Consumption-equivalent Euler equation error
/// `1 - u'^{-1}((1 + r) β E[u'(c')]) / c`.
pub fn euler_equation_error(
    preferences: &Crra,
    income: &MarkovChain,
    prices: &Prices,
    rule: &SavingsRule,
    z: usize,
    next_assets: f64,
    consumption: f64,
) -> f64 {
    let expected = expected_marginal_utility(preferences, income, prices, rule, z, next_assets);
    1.0 - preferences.inverse_marginal_utility(preferences.gross_patience(prices.rate) * expected)
        / consumption
}

/// Policy-function iteration for one set of prices.
///
/// # Examples
///
/// ```no_run
/// use aiyagari_solver::config::EconomyConfig;
/// use aiyagari_solver::economy::Economy;
/// use aiyagari_solver::household::HouseholdSolver;
///
/// let economy = Economy::new(EconomyConfig::default()).unwrap();
/// let policy = HouseholdSolver::new(&economy)
///     .solve(economy.prices(0.03))
///     .unwrap();
/// assert!(policy.iterations() < 2000);
/// ```
#[derive(Debug, Clone)]
pub struct HouseholdSolver<'a> {
    economy: &'a Economy,
    root_finder: BrentSolver<f64>,
    tolerance: f64,
    max_iterations: usize,
}

impl<'a> HouseholdSolver<'a> {
    /// Solver using the economy's household settings.
    pub fn new(economy: &'a Economy) -> Self {
        let settings = &economy.config().household;
        Self {
            economy,
            root_finder: BrentSolver::new(SolverConfig::euler_root()),
            tolerance: settings.tolerance,
            max_iterations: settings.max_iterations,
        }
    }

    /// Iterate the savings policy to its fixed point at `prices`.
    ///
    /// # Errors
    ///
    /// - `HouseholdError::NoInteriorRoot` when a grid point has no bracket
    /// - `HouseholdError::RootFinder` when the root search fails inside a bracket
    /// - `HouseholdError::NotConverged` after the sweep cap
    pub fn solve(&self, prices: Prices) -> Result<Policy, HouseholdError> {
        let start = Instant::now();
        let grid = self.economy.grid().points();
        let n_points = grid.len();
        let n_states = self.economy.income().n_states();
        let floor = self.economy.borrowing_limit();

        // Initial guess: save nothing
        let mut current = vec![0.0; n_states * n_points];
        let mut next = vec![0.0; n_states * n_points];
        let mut distance = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            let rule = SavingsRule::from_table(grid, &current, floor)?;

            next.par_iter_mut()
                .enumerate()
                .try_for_each(|(k, slot)| -> Result<(), HouseholdError> {
                    let (z, i) = (k / n_points, k % n_points);
                    *slot = self.optimal_savings(&prices, &rule, z, grid[i])?;
                    Ok(())
                })?;

            distance = sup_norm_distance(&next, &current);
            std::mem::swap(&mut current, &mut next);
            trace!(iteration, distance, "policy sweep");

            if distance < self.tolerance {
                let consumption = self.consumption(&prices, &current);
                debug!(
                    iterations = iteration,
                    rate = prices.rate,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "household problem solved"
                );
                return Ok(Policy::new(
                    grid.to_vec(),
                    n_states,
                    current,
                    consumption,
                    prices,
                    iteration,
                ));
            }
        }

        Err(HouseholdError::NotConverged {
            iterations: self.max_iterations,
            distance,
        })
    }

    /// Savings at one grid point given last sweep's rule.
    fn optimal_savings(
        &self,
        prices: &Prices,
        rule: &SavingsRule,
        z: usize,
        assets: f64,
    ) -> Result<f64, HouseholdError> {
        let preferences = self.economy.preferences();
        let income = self.economy.income();
        let floor = self.economy.borrowing_limit();
        let cash = prices.cash_on_hand(assets, income.value(z));

        let residual =
            |a_next: f64| euler_residual(preferences, income, prices, rule, z, cash, a_next);

        if residual(floor) >= 0.0 {
            return Ok(floor);
        }

        interior_root(&self.root_finder, residual, floor, cash, z, assets)
    }

    fn consumption(&self, prices: &Prices, savings: &[f64]) -> Vec<f64> {
        let grid = self.economy.grid().points();
        let income = self.economy.income();
        savings
            .iter()
            .enumerate()
            .map(|(k, a_next)| {
                let (z, i) = (k / grid.len(), k % grid.len());
                prices.cash_on_hand(grid[i], income.value(z)) - a_next
            })
            .collect()
    }
}

/// Root of the Euler residual on `[floor, cash]`.
///
/// A bracket without a sign change is reported as `NoInteriorRoot`; any
/// other root-finder failure keeps its own cause under `RootFinder`.
fn interior_root<F>(
    root_finder: &BrentSolver<f64>,
    residual: F,
    floor: f64,
    cash: f64,
    state: usize,
    assets: f64,
) -> Result<f64, HouseholdError>
where
    F: Fn(f64) -> f64,
{
    root_finder
        .find_root(residual, floor, cash)
        .map_err(|source| match source {
            SolverError::NoBracket { .. } => HouseholdError::NoInteriorRoot { state, assets, source },
            _ => HouseholdError::RootFinder { state, assets, source },
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;

    fn small_economy() -> Economy {
        let mut config = EconomyConfig::default();
        config.grid.points = 60;
        config.grid.max_assets = 60.0;
        Economy::new(config).unwrap()
    }

    #[test]
    fn test_root_without_sign_change() {
        let solver = BrentSolver::new(SolverConfig::euler_root());
        let result = interior_root(&solver, |_| -1.0, 0.0, 1.0, 1, 0.5);
        match result {
            Err(HouseholdError::NoInteriorRoot { state, assets, source }) => {
                assert_eq!(state, 1);
                assert_eq!(assets, 0.5);
                assert!(matches!(source, SolverError::NoBracket { .. }));
            }
            other => panic!("expected NoInteriorRoot, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_residual_keeps_its_cause() {
        let solver = BrentSolver::new(SolverConfig::euler_root());
        let result = interior_root(&solver, |_| f64::NAN, 0.0, 1.0, 0, 2.0);
        match result {
            Err(HouseholdError::RootFinder { state, source, .. }) => {
                assert_eq!(state, 0);
                assert!(matches!(source, SolverError::NumericalInstability(_)));
            }
            other => panic!("expected RootFinder, got {other:?}"),
        }
    }

    #[test]
    fn test_interior_root_is_found() {
        let solver = BrentSolver::new(SolverConfig::euler_root());
        let root = interior_root(&solver, |a| 0.25 - a, 0.0, 1.0, 0, 0.0).unwrap();
        assert!((root - 0.25).abs() < 1e-8);
    }

    #[test]
    fn test_policy_is_budget_feasible() {
        let economy = small_economy();
        let prices = economy.prices(0.03);
        let policy = HouseholdSolver::new(&economy).solve(prices).unwrap();
        let grid = economy.grid().points();

        for z in 0..policy.n_states() {
            let zval = economy.income().value(z);
            for (i, a) in grid.iter().enumerate() {
                let s = policy.savings_row(z)[i];
                let c = policy.consumption_row(z)[i];
                assert!(s >= economy.borrowing_limit());
                assert!(c > 0.0);
                assert!((c + s - prices.cash_on_hand(*a, zval)).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_interior_points_satisfy_euler_equation() {
        let economy = small_economy();
        let prices = economy.prices(0.03);
        let policy = HouseholdSolver::new(&economy).solve(prices).unwrap();
        let rule = policy.savings_rule().unwrap();
        let grid = economy.grid().points();

        for z in 0..policy.n_states() {
            for (i, a) in grid.iter().enumerate() {
                let s = policy.savings_row(z)[i];
                if s <= economy.borrowing_limit() {
                    continue;
                }
                let cash = prices.cash_on_hand(*a, economy.income().value(z));
                let r = euler_residual(
                    economy.preferences(),
                    economy.income(),
                    &prices,
                    &rule,
                    z,
                    cash,
                    s,
                );
                // Relative to u'(c); the fixed point is reached to 1e-6 in savings
                let scale = economy.preferences().marginal_utility(cash - s);
                assert!((r / scale).abs() < 1e-4, "z={} i={} residual={}", z, i, r);
            }
        }
    }

    #[test]
    fn test_poor_low_income_households_are_constrained() {
        let economy = small_economy();
        let policy = HouseholdSolver::new(&economy)
            .solve(economy.prices(0.03))
            .unwrap();
        assert_eq!(policy.savings_row(0)[0], economy.borrowing_limit());
        // Savings increase with assets
        for w in policy.savings_row(1).windows(2) {
            assert!(w[1] >= w[0] - 1e-9);
        }
    }

    #[test]
    fn test_iteration_cap_is_fatal() {
        let mut config = EconomyConfig::default();
        config.grid.points = 30;
        config.household.max_iterations = 3;
        let economy = Economy::new(config).unwrap();
        let result = HouseholdSolver::new(&economy).solve(economy.prices(0.03));
        assert!(matches!(
            result,
            Err(HouseholdError::NotConverged { iterations: 3, .. })
        ));
    }
}
