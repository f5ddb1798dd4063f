//! Accuracy diagnostics for a converged savings policy.
//!
//! The Euler equation error `1 - u'^{-1}((1 + r) β E[u'(c')]) / c` measures
//! the relative consumption mistake implied by the approximate policy.
//! Errors are reported as `log10 |error|`; `-3` means a one-in-a-thousand
//! consumption mistake. Cells where the borrowing constraint binds have no
//! Euler equation to satisfy and are marked `NaN`.

use crate::distribution::PanelSimulation;
use crate::economy::Economy;
use crate::error::HouseholdError;
use crate::household::{euler_equation_error, Policy};
use aiyagari_core::math::stats::{count_valid, nan_max, nan_mean};
use rayon::prelude::*;
use serde::Serialize;

/// Max, mean and sample size of a set of `log10` Euler errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorSummary {
    /// Largest `log10` error
    pub max: f64,
    /// Mean `log10` error
    pub mean: f64,
    /// Number of unmasked observations
    pub valid: usize,
}

impl ErrorSummary {
    /// NaN-aware summary of `log10_errors`.
    pub fn from_log10(log10_errors: &[f64]) -> Self {
        Self {
            max: nan_max(log10_errors),
            mean: nan_mean(log10_errors),
            valid: count_valid(log10_errors),
        }
    }
}

/// `log10` Euler errors over the fine grid, row-major by income state.
#[derive(Debug, Clone, PartialEq)]
pub struct EulerErrors {
    grid: Vec<f64>,
    n_states: usize,
    log10_errors: Vec<f64>,
    summary: ErrorSummary,
}

impl EulerErrors {
    /// Evaluation grid.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Number of income states.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// All errors, `NaN` where masked.
    pub fn log10_errors(&self) -> &[f64] {
        &self.log10_errors
    }

    /// Errors for income state `z`.
    pub fn row(&self, z: usize) -> &[f64] {
        let n = self.grid.len();
        &self.log10_errors[z * n..(z + 1) * n]
    }

    /// Max and mean over unmasked cells.
    pub fn summary(&self) -> ErrorSummary {
        self.summary
    }
}

/// Euler errors of `policy` at every (income state, fine-grid point).
///
/// # Errors
///
/// Fails only if the policy table cannot be interpolated.
pub fn full_grid_euler_errors(economy: &Economy, policy: &Policy) -> Result<EulerErrors, HouseholdError> {
    let rule = policy.savings_rule()?;
    let prices = policy.prices();
    let fine = economy.fine_grid().points();
    let n_states = economy.income().n_states();
    let floor = economy.borrowing_limit();

    let log10_errors: Vec<f64> = (0..n_states * fine.len())
        .into_par_iter()
        .map(|k| {
            let (z, a) = (k / fine.len(), fine[k % fine.len()]);
            let a_plus = rule.next_assets(z, a);
            if a_plus <= floor {
                return f64::NAN;
            }
            let consumption = prices.cash_on_hand(a, economy.income().value(z)) - a_plus;
            euler_equation_error(
                economy.preferences(),
                economy.income(),
                &prices,
                &rule,
                z,
                a_plus,
                consumption,
            )
            .abs()
            .log10()
        })
        .collect();

    let summary = ErrorSummary::from_log10(&log10_errors);
    Ok(EulerErrors {
        grid: fine.to_vec(),
        n_states,
        log10_errors,
        summary,
    })
}

/// Summary of the Euler errors recorded in the last simulated period.
pub fn simulation_euler_errors(panel: &PanelSimulation) -> ErrorSummary {
    let log10: Vec<f64> = panel
        .euler_errors()
        .into_iter()
        .map(|e| e.abs().log10())
        .collect();
    ErrorSummary::from_log10(&log10)
}
